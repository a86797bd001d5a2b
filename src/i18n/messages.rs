//! Static reply texts.

use super::pick;

pub(super) fn lookup(key: &str, lang: &str) -> Option<&'static str> {
    let (en, ru) = match key {
        "welcome" => (
            "🎯 Welcome to UniFlow!\n\n\
             I'll help you organize your studies and tasks.\n\n\
             What I can do:\n\
             ✅ Manage tasks by context\n\
             📅 Track deadlines\n\
             📥 Keep an inbox of unsorted tasks\n\
             🔍 Search everything\n\n\
             Use the buttons below to get around!",
            "🎯 Добро пожаловать в UniFlow!\n\n\
             Я помогу тебе организовать учебу и задачи.\n\n\
             Доступные функции:\n\
             ✅ Управление задачами по контекстам\n\
             📅 Отслеживание дедлайнов\n\
             📥 Входящие для неразобранных задач\n\
             🔍 Поиск по всему\n\n\
             Используй кнопки ниже для навигации!",
        ),
        "main_menu" => (
            "📱 Main menu\n\nPick a section:",
            "📱 Главное меню\n\nВыбери нужный раздел:",
        ),
        "help_text" => (
            "📖 Commands:\n\n\
             🏠 General:\n\
             /start — welcome and menu\n\
             /menu — main menu\n\
             /help — this help\n\n\
             ✅ Tasks:\n\
             /today — tasks due today\n\
             /tasks — all tasks\n\
             /inbox — tasks without a context\n\
             /newtask — create a task\n\
             /search <query> — search tasks and contexts\n\n\
             📁 Contexts:\n\
             /contexts — all contexts\n\
             /newcontext — create a context\n\n\
             ⚙️ Other:\n\
             /cancel — cancel the current action",
            "📖 Справка по командам:\n\n\
             🏠 Основное:\n\
             /start — приветствие и меню\n\
             /menu — главное меню\n\
             /help — эта справка\n\n\
             ✅ Задачи:\n\
             /today — задачи на сегодня\n\
             /tasks — все задачи\n\
             /inbox — задачи без контекста\n\
             /newtask — создать задачу\n\
             /search <запрос> — поиск задач и контекстов\n\n\
             📁 Контексты:\n\
             /contexts — все контексты\n\
             /newcontext — создать контекст\n\n\
             ⚙️ Другое:\n\
             /cancel — отменить текущее действие",
        ),
        "unknown_command" => (
            "❓ Unknown command. Send /help for the list of commands.",
            "❓ Неизвестная команда. Напиши /help для списка команд.",
        ),
        "cancelled" => ("❌ Action cancelled.", "❌ Действие отменено."),
        "nothing_to_cancel" => ("Nothing to cancel.", "Нечего отменять."),

        // Listings.
        "no_tasks" => (
            "📝 You have no tasks yet!\n\nCreate your first one with /newtask",
            "📝 У тебя пока нет задач!\n\nСоздай первую задачу с помощью /newtask",
        ),
        "no_contexts" => (
            "📁 You have no contexts yet!\n\nCreate your first one with /newcontext",
            "📁 У тебя пока нет контекстов!\n\nСоздай первый контекст с помощью /newcontext",
        ),
        "inbox_empty" => (
            "📥 Inbox is empty!\n\nEvery task has a context 👍",
            "📥 Входящие пусты!\n\nВсе задачи распределены по контекстам 👍",
        ),
        "inbox_hint" => (
            "💡 Tap a button to complete a task",
            "💡 Нажми на кнопку, чтобы завершить задачу",
        ),
        "free_day" => (
            "A great day to rest 😊",
            "Отличный день для отдыха 😊",
        ),

        // Wizards.
        "new_task_title_prompt" => (
            "📝 New task\n\nStep 1/4: Enter the task title\n\nOr /cancel to abort",
            "📝 Создание новой задачи\n\nШаг 1/4: Введи название задачи\n\nИли /cancel для отмены",
        ),
        "new_context_title_prompt" => (
            "📁 New context\n\nStep 1/2: Enter the context title\n\n\
             For example: Studies, Work, Projects\n\nOr /cancel to abort",
            "📁 Создание нового контекста\n\nШаг 1/2: Введи название контекста\n\n\
             Например: Учеба, Работа, Проекты\n\nИли /cancel для отмены",
        ),
        "title_required" => (
            "⚠️ The title can't be empty. Try again:",
            "⚠️ Название не может быть пустым. Попробуй ещё раз:",
        ),
        "edit_task_title_prompt" => (
            "✏️ Editing task\n\nStep 1/2: Enter a new title\n\n\
             Send '-' to keep the current one, or /cancel to abort",
            "✏️ Редактирование задачи\n\nШаг 1/2: Введи новое название\n\n\
             Напиши '-' чтобы оставить текущее, или /cancel для отмены",
        ),
        "edit_context_title_prompt" => (
            "✏️ Editing context\n\nStep 1/2: Enter a new title\n\n\
             Send '-' to keep the current one, or /cancel to abort",
            "✏️ Редактирование контекста\n\nШаг 1/2: Введи новое название\n\n\
             Напиши '-' чтобы оставить текущее, или /cancel для отмены",
        ),
        "edit_description_prompt" => (
            "Step 2/2: Enter a new description\n\nSend '-' to keep the current one",
            "Шаг 2/2: Введи новое описание\n\nНапиши '-' чтобы оставить текущее",
        ),
        "search_prompt" => (
            "🔍 Enter a search query:\n\nFor example: math",
            "🔍 Введи запрос для поиска:\n\nНапример: математика",
        ),
        "search_usage" => (
            "🔍 Usage: /search <query>\n\nFor example: /search math",
            "🔍 Использование: /search <запрос>\n\nНапример: /search математика",
        ),
        "no_task_wizard" => (
            "❌ No task creation in progress",
            "❌ Ошибка: не найден процесс создания задачи",
        ),
        "bad_date" => ("❌ Invalid date choice", "❌ Неверный формат даты"),
        "choose_due_date" => ("⏰ Choose a due date:", "⏰ Выбери срок:"),

        // Outcomes.
        "task_deleted" => ("🗑 Task deleted", "🗑 Задача удалена"),
        "context_deleted" => ("🗑 Context deleted", "🗑 Контекст удален"),
        "task_updated" => ("✅ Task updated", "✅ Задача обновлена"),
        "context_updated" => ("✅ Context updated", "✅ Контекст обновлен"),

        // Callback notices (short, shown as a toast).
        "notice_task_completed" => ("✅ Task completed!", "✅ Задача завершена!"),
        "notice_task_reopened" => ("↩️ Task reopened!", "↩️ Задача возобновлена!"),
        "notice_task_deleted" => ("✅ Task deleted", "✅ Задача удалена"),
        "notice_context_deleted" => ("✅ Context deleted", "✅ Контекст удален"),
        "notice_editing_task" => ("✏️ Editing task", "✏️ Редактирование задачи"),
        "notice_editing_context" => ("✏️ Editing context", "✏️ Редактирование контекста"),
        "notice_due_updated" => ("⏰ Due date updated", "⏰ Срок обновлен"),

        // Errors.
        "task_not_found" => ("❌ Task not found", "❌ Задача не найдена"),
        "context_not_found" => ("❌ Context not found", "❌ Контекст не найден"),
        "task_access_denied" => (
            "❌ You don't have access to this task",
            "❌ Нет доступа к этой задаче",
        ),
        "context_access_denied" => (
            "❌ You don't have access to this context",
            "❌ Нет доступа к этому контексту",
        ),
        "error_user" => (
            "❌ Couldn't load your profile.",
            "❌ Ошибка при получении данных пользователя.",
        ),
        "error_tasks" => ("❌ Couldn't load tasks.", "❌ Ошибка при получении задач."),
        "error_contexts" => (
            "❌ Couldn't load contexts.",
            "❌ Ошибка при получении контекстов.",
        ),
        "error_search" => ("❌ Search failed.", "❌ Ошибка при поиске."),
        "error_update" => ("❌ Couldn't update the task", "❌ Ошибка при обновлении задачи"),
        "error_update_context" => (
            "❌ Couldn't update the context",
            "❌ Ошибка при обновлении контекста",
        ),
        "error_delete" => ("❌ Couldn't delete", "❌ Ошибка при удалении"),
        "error_generic" => ("❌ Something went wrong", "❌ Ошибка"),

        _ => return None,
    };
    Some(pick(lang, en, ru))
}
