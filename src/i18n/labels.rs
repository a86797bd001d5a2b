//! Button labels and short status words.

use super::pick;

pub(super) fn lookup(key: &str, lang: &str) -> Option<&'static str> {
    let (en, ru) = match key {
        // Main menu.
        "btn_today" => ("📋 Today", "📋 Сегодня"),
        "btn_schedule" => ("📅 Schedule", "📅 Расписание"),
        "btn_contexts" => ("📁 Contexts", "📁 Контексты"),
        "btn_inbox" => ("📥 Inbox", "📥 Входящие"),
        "btn_new_task" => ("➕ New task", "➕ Новая задача"),
        "btn_new_context" => ("📂 New context", "📂 Новый контекст"),
        "btn_search" => ("🔍 Search", "🔍 Поиск"),
        "btn_main_menu" => ("🏠 Main menu", "🏠 Главное меню"),

        // Task actions.
        "btn_complete" => ("✓ Complete", "✓ Завершить"),
        "btn_view" => ("👁 View", "👁 Просмотр"),
        "btn_edit" => ("✏️ Edit", "✏️ Редактировать"),
        "btn_change_due" => ("⏰ Change due date", "⏰ Изменить срок"),
        "btn_delete" => ("🗑 Delete", "🗑 Удалить"),
        "btn_reopen" => ("↩️ Reopen", "↩️ Возобновить"),
        "btn_back_to_tasks" => ("◀️ Back to tasks", "◀️ Назад к задачам"),

        // Context actions.
        "btn_tasks" => ("📋 Tasks", "📋 Задачи"),
        "btn_context_tasks" => ("📋 Context tasks", "📋 Задачи контекста"),
        "btn_back_to_contexts" => ("◀️ Back to contexts", "◀️ Назад к контекстам"),

        // Confirmation.
        "btn_confirm" => ("✓ Confirm", "✓ Подтвердить"),
        "btn_cancel" => ("✗ Cancel", "✗ Отмена"),

        // Schedule navigation.
        "btn_prev_day" => ("⬅️ Previous", "⬅️ Предыдущий"),
        "btn_schedule_today" => ("Today", "Сегодня"),
        "btn_next_day" => ("Next ➡️", "Следующий ➡️"),

        // Due-date choices.
        "date_today" => ("Today", "Сегодня"),
        "date_tomorrow" => ("Tomorrow", "Завтра"),
        "date_in_2_days" => ("In 2 days", "Послезавтра"),
        "date_in_3_days" => ("In 3 days", "Через 3 дня"),
        "date_in_a_week" => ("In a week", "Через неделю"),
        "date_skip" => ("Skip", "Пропустить"),

        // Status words.
        "status_open" => ("⭕ In progress", "⭕ В работе"),
        "status_done" => ("✅ Completed", "✅ Завершена"),
        "today_label" => ("Today", "Сегодня"),

        _ => return None,
    };
    Some(pick(lang, en, ru))
}
