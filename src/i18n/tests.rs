use super::*;

const LABEL_KEYS: &[&str] = &[
    "btn_today",
    "btn_schedule",
    "btn_contexts",
    "btn_inbox",
    "btn_new_task",
    "btn_new_context",
    "btn_search",
    "btn_main_menu",
    "btn_complete",
    "btn_view",
    "btn_edit",
    "btn_change_due",
    "btn_delete",
    "btn_reopen",
    "btn_back_to_tasks",
    "btn_tasks",
    "btn_context_tasks",
    "btn_back_to_contexts",
    "btn_confirm",
    "btn_cancel",
    "btn_prev_day",
    "btn_schedule_today",
    "btn_next_day",
    "date_today",
    "date_tomorrow",
    "date_in_2_days",
    "date_in_3_days",
    "date_in_a_week",
    "date_skip",
    "status_open",
    "status_done",
    "today_label",
];

const MESSAGE_KEYS: &[&str] = &[
    "welcome",
    "main_menu",
    "help_text",
    "unknown_command",
    "cancelled",
    "nothing_to_cancel",
    "no_tasks",
    "no_contexts",
    "inbox_empty",
    "inbox_hint",
    "free_day",
    "new_task_title_prompt",
    "new_context_title_prompt",
    "title_required",
    "edit_task_title_prompt",
    "edit_context_title_prompt",
    "edit_description_prompt",
    "search_prompt",
    "search_usage",
    "no_task_wizard",
    "bad_date",
    "choose_due_date",
    "task_deleted",
    "context_deleted",
    "task_updated",
    "context_updated",
    "notice_task_completed",
    "notice_task_reopened",
    "notice_task_deleted",
    "notice_context_deleted",
    "notice_editing_task",
    "notice_editing_context",
    "notice_due_updated",
    "task_not_found",
    "context_not_found",
    "task_access_denied",
    "context_access_denied",
    "error_user",
    "error_tasks",
    "error_contexts",
    "error_search",
    "error_update",
    "error_update_context",
    "error_delete",
    "error_generic",
];

#[test]
fn test_every_key_is_translated() {
    for key in LABEL_KEYS.iter().chain(MESSAGE_KEYS) {
        let en = t(key, "English");
        let ru = t(key, "Russian");
        assert_ne!(en, "???", "missing English for {key}");
        assert_ne!(ru, "???", "missing Russian for {key}");
        assert_ne!(en, ru, "untranslated {key}");
    }
}

#[test]
fn test_unsupported_language_falls_back_to_english() {
    assert_eq!(t("main_menu", "Klingon"), t("main_menu", "English"));
    assert_eq!(t("btn_today", "French"), t("btn_today", "English"));
}

#[test]
fn test_unknown_key() {
    assert_eq!(t("no_such_key", "English"), "???");
}

#[test]
fn test_supported_languages() {
    assert_eq!(SUPPORTED_LANGUAGES, &["English", "Russian"]);
}

#[test]
fn test_context_prompt_numbers_contexts() {
    let out = task_context_prompt("English", "Essay", &["Math", "History"]);
    assert!(out.contains("Title: Essay"));
    assert!(out.contains("1. 📂 Math"));
    assert!(out.contains("2. 📂 History"));

    let none = task_context_prompt("English", "Essay", &[]);
    assert!(!none.contains("1."));
}

#[test]
fn test_task_created_omits_empty_parts() {
    let full = task_created("English", "Essay", "Draft intro", Some("05.03.2026"));
    assert!(full.contains("📄 Draft intro"));
    assert!(full.contains("Due 05.03.2026"));

    let bare = task_created("Russian", "Эссе", "", None);
    assert!(bare.contains("Задача создана"));
    assert!(!bare.contains("📄"));
    assert!(!bare.contains("⏰"));
}

#[test]
fn test_due_updated_variants() {
    assert!(due_updated("English", "Essay", Some("01.01.2027")).contains("set to 01.01.2027"));
    assert!(due_updated("English", "Essay", None).contains("cleared"));
    assert!(due_updated("Russian", "Эссе", None).contains("убран"));
}
