//! Inline keyboard builders.

use super::router::{
    Callback, ContextAction, DueChoice, MenuAction, TaskAction, MAX_SCHEDULE_OFFSET,
};
use crate::i18n::t;
use uniflow_core::message::{Button, Keyboard};
use uniflow_core::models::{Context, Task};
use uuid::Uuid;

/// Buttons shown per list.
pub(crate) const LIST_BUTTONS: usize = 5;

const TASK_LABEL_MAX: usize = 30;
const CONTEXT_LABEL_MAX: usize = 25;

/// Offsets offered by the due-date keyboard, two per row.
const DUE_OFFSETS: [(&str, i64); 5] = [
    ("date_today", 0),
    ("date_tomorrow", 1),
    ("date_in_2_days", 2),
    ("date_in_3_days", 3),
    ("date_in_a_week", 7),
];

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn button(label: impl Into<String>, callback: Callback) -> Button {
    Button::new(label, callback.payload())
}

fn menu(label: &str, action: MenuAction) -> Button {
    button(label, Callback::Menu(action))
}

fn task(label: impl Into<String>, action: TaskAction, id: Uuid) -> Button {
    button(label, Callback::Task { action, id })
}

fn context(label: impl Into<String>, action: ContextAction, id: Uuid) -> Button {
    button(label, Callback::Context { action, id })
}

fn back_to_menu(lang: &str) -> Vec<Button> {
    vec![menu(t("btn_main_menu", lang), MenuAction::Main)]
}

pub fn main_menu(lang: &str) -> Keyboard {
    Keyboard::new()
        .row(vec![
            menu(t("btn_today", lang), MenuAction::Today),
            menu(t("btn_schedule", lang), MenuAction::Schedule(0)),
        ])
        .row(vec![
            menu(t("btn_contexts", lang), MenuAction::Contexts),
            menu(t("btn_inbox", lang), MenuAction::Inbox),
        ])
        .row(vec![
            menu(t("btn_new_task", lang), MenuAction::NewTask),
            menu(t("btn_new_context", lang), MenuAction::NewContext),
        ])
        .row(vec![menu(t("btn_search", lang), MenuAction::Search)])
}

/// One row per task (at most [`LIST_BUTTONS`]): completed tasks can only be
/// viewed, active ones completed or viewed.
pub fn task_list(lang: &str, tasks: &[&Task]) -> Keyboard {
    let mut kb = Keyboard::new();
    for item in tasks.iter().take(LIST_BUTTONS) {
        kb = if item.is_completed() {
            kb.row(vec![task(
                format!("✅ {}", truncate(&item.title, TASK_LABEL_MAX)),
                TaskAction::View,
                item.id,
            )])
        } else {
            kb.row(vec![
                task(t("btn_complete", lang), TaskAction::Complete, item.id),
                task(t("btn_view", lang), TaskAction::View, item.id),
            ])
        };
    }
    kb.row(back_to_menu(lang))
}

pub fn task_detail(lang: &str, item: &Task) -> Keyboard {
    let kb = if item.is_completed() {
        Keyboard::new().row(vec![
            task(t("btn_reopen", lang), TaskAction::Reopen, item.id),
            task(t("btn_delete", lang), TaskAction::Delete, item.id),
        ])
    } else {
        Keyboard::new()
            .row(vec![
                task(t("btn_complete", lang), TaskAction::Complete, item.id),
                task(t("btn_edit", lang), TaskAction::Edit, item.id),
            ])
            .row(vec![
                task(t("btn_change_due", lang), TaskAction::Due, item.id),
                task(t("btn_delete", lang), TaskAction::Delete, item.id),
            ])
    };
    kb.row(vec![menu(t("btn_back_to_tasks", lang), MenuAction::Tasks)])
}

pub fn context_list(lang: &str, contexts: &[Context]) -> Keyboard {
    let mut kb = Keyboard::new();
    for c in contexts.iter().take(LIST_BUTTONS) {
        kb = kb.row(vec![
            context(
                format!("📂 {}", truncate(&c.title, CONTEXT_LABEL_MAX)),
                ContextAction::View,
                c.id,
            ),
            context(t("btn_tasks", lang), ContextAction::Tasks, c.id),
        ]);
    }
    kb.row(vec![menu(t("btn_new_context", lang), MenuAction::NewContext)])
        .row(back_to_menu(lang))
}

pub fn context_detail(lang: &str, c: &Context) -> Keyboard {
    Keyboard::new()
        .row(vec![
            context(t("btn_context_tasks", lang), ContextAction::Tasks, c.id),
            context(t("btn_edit", lang), ContextAction::Edit, c.id),
        ])
        .row(vec![context(t("btn_delete", lang), ContextAction::Delete, c.id)])
        .row(vec![menu(
            t("btn_back_to_contexts", lang),
            MenuAction::Contexts,
        )])
}

/// Confirm/cancel pair for a pending delete.
pub fn confirm(lang: &str, confirm: Callback, cancel: Callback) -> Keyboard {
    Keyboard::new().row(vec![
        button(t("btn_confirm", lang), confirm),
        button(t("btn_cancel", lang), cancel),
    ])
}

pub fn schedule(lang: &str, offset: i64) -> Keyboard {
    let step = |delta: i64| {
        offset
            .saturating_add(delta)
            .clamp(-MAX_SCHEDULE_OFFSET, MAX_SCHEDULE_OFFSET)
    };
    Keyboard::new()
        .row(vec![
            menu(t("btn_prev_day", lang), MenuAction::Schedule(step(-1))),
            menu(t("btn_schedule_today", lang), MenuAction::Schedule(0)),
            menu(t("btn_next_day", lang), MenuAction::Schedule(step(1))),
        ])
        .row(back_to_menu(lang))
}

/// Due-date keyboard shared by the create-task wizard and the change-due
/// flow; `wrap` turns a choice into the callback for its button.
fn due_choices(lang: &str, wrap: impl Fn(DueChoice) -> Callback) -> Keyboard {
    let mut buttons: Vec<Button> = DUE_OFFSETS
        .iter()
        .map(|(key, days)| button(t(key, lang), wrap(DueChoice::InDays(*days))))
        .collect();
    buttons.push(button(t("date_skip", lang), wrap(DueChoice::Skip)));

    buttons
        .chunks(2)
        .fold(Keyboard::new(), |kb, pair| kb.row(pair.to_vec()))
}

/// Due-date keyboard inside the create-task wizard.
pub fn date_selection(lang: &str) -> Keyboard {
    due_choices(lang, Callback::Date)
}

/// Due-date keyboard for an existing task.
pub fn due_selection(lang: &str, task_id: Uuid) -> Keyboard {
    due_choices(lang, |choice| Callback::Task {
        action: TaskAction::SetDue(choice),
        id: task_id,
    })
}

/// Complete/view row per active inbox task.
pub fn inbox(lang: &str, active: &[&Task]) -> Keyboard {
    let mut kb = Keyboard::new();
    for item in active.iter().take(LIST_BUTTONS) {
        kb = kb.row(vec![
            task(
                format!("✓ {}", truncate(&item.title, CONTEXT_LABEL_MAX)),
                TaskAction::Complete,
                item.id,
            ),
            task("👁", TaskAction::View, item.id),
        ]);
    }
    kb.row(back_to_menu(lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_on_char_boundaries() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        let cyr = "Домашнее задание по математике";
        let out = truncate(cyr, 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_main_menu_payloads() {
        let kb = main_menu("English");
        let payloads: Vec<&str> = kb.payloads().collect();
        assert_eq!(
            payloads,
            vec![
                "menu_today",
                "menu_schedule_0",
                "menu_contexts",
                "menu_inbox",
                "menu_newtask",
                "menu_newcontext",
                "menu_search",
            ]
        );
    }

    #[test]
    fn test_date_selection_layout() {
        let kb = date_selection("English");
        assert_eq!(kb.rows.len(), 3);
        let payloads: Vec<&str> = kb.payloads().collect();
        assert_eq!(
            payloads,
            vec!["date_0", "date_1", "date_2", "date_3", "date_7", "date_skip"]
        );
    }

    #[test]
    fn test_due_selection_targets_task() {
        let id = Uuid::new_v4();
        let kb = due_selection("English", id);
        assert!(kb
            .payloads()
            .all(|p| p.starts_with(&format!("task_setdue_{id}_"))));
    }

    #[test]
    fn test_schedule_navigation_offsets() {
        let payloads: Vec<String> = schedule("English", 2)
            .payloads()
            .map(str::to_string)
            .collect();
        assert_eq!(
            payloads,
            vec!["menu_schedule_1", "menu_schedule_0", "menu_schedule_3", "menu_main"]
        );
    }

    #[test]
    fn test_schedule_navigation_clamps_at_bound() {
        let kb = schedule("English", MAX_SCHEDULE_OFFSET);
        let edge: Vec<&str> = kb.payloads().collect();
        assert_eq!(edge[..3], ["menu_schedule_3649", "menu_schedule_0", "menu_schedule_3650"]);

        let kb = schedule("English", i64::MIN);
        let wild: Vec<&str> = kb.payloads().collect();
        assert_eq!(wild[..3], ["menu_schedule_-3650", "menu_schedule_0", "menu_schedule_-3650"]);
    }

    #[test]
    fn test_task_list_caps_buttons() {
        let user = Uuid::new_v4();
        let tasks: Vec<Task> = (0..8)
            .map(|i| Task::new(user, None, &format!("task {i}"), "", None).unwrap())
            .collect();
        let refs: Vec<&Task> = tasks.iter().collect();
        let kb = task_list("English", &refs);
        // Five task rows plus the back-to-menu row.
        assert_eq!(kb.rows.len(), LIST_BUTTONS + 1);
    }
}
