//! Format helpers for strings with interpolation.

use super::t;

/// "...and N more" tail under a truncated list.
pub fn more_items(lang: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("...и ещё {n}"),
        _ => format!("...and {n} more"),
    }
}

/// Header above the active group of a task list.
pub fn active_header(lang: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("⭕ Активные ({n}):"),
        _ => format!("⭕ Active ({n}):"),
    }
}

/// Header above the completed group of a task list.
pub fn completed_header(lang: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("✅ Завершенные ({n}):"),
        _ => format!("✅ Completed ({n}):"),
    }
}

pub fn completed_count(lang: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("✅ Завершено: {n}"),
        _ => format!("✅ Completed: {n}"),
    }
}

pub fn total_tasks(lang: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("📝 Всего задач: {n}"),
        _ => format!("📝 Total tasks: {n}"),
    }
}

/// Short due suffix for list rows, e.g. " (due 05.03)".
pub fn due_suffix(lang: &str, date: &str) -> String {
    match lang {
        "Russian" => format!(" (до {date})"),
        _ => format!(" (due {date})"),
    }
}

pub fn schedule_header(lang: &str, day: &str) -> String {
    match lang {
        "Russian" => format!("📅 Задачи на {day}:"),
        _ => format!("📅 Tasks for {day}:"),
    }
}

pub fn schedule_empty(lang: &str, day: &str) -> String {
    let rest = t("free_day", lang);
    match lang {
        "Russian" => format!("📅 {day} задач нет!\n\n{rest}"),
        _ => format!("📅 No tasks for {day}!\n\n{rest}"),
    }
}

pub fn inbox_header(lang: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("📥 Входящие ({n}):"),
        _ => format!("📥 Inbox ({n}):"),
    }
}

pub fn contexts_header(lang: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("📁 Твои контексты ({n}):"),
        _ => format!("📁 Your contexts ({n}):"),
    }
}

pub fn search_header(lang: &str, query: &str) -> String {
    match lang {
        "Russian" => format!("🔍 Результаты поиска: '{query}'"),
        _ => format!("🔍 Search results: '{query}'"),
    }
}

pub fn search_empty(lang: &str, query: &str) -> String {
    match lang {
        "Russian" => format!("🔍 По запросу '{query}' ничего не найдено"),
        _ => format!("🔍 Nothing found for '{query}'"),
    }
}

pub fn search_contexts_header(lang: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("📁 Контексты ({n}):"),
        _ => format!("📁 Contexts ({n}):"),
    }
}

pub fn search_tasks_header(lang: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("📝 Задачи ({n}):"),
        _ => format!("📝 Tasks ({n}):"),
    }
}

// --- Wizards ---

/// Create-task step 2 prompt, echoing the saved title.
pub fn task_description_prompt(lang: &str, title: &str) -> String {
    match lang {
        "Russian" => format!(
            "📝 Создание новой задачи\n\nНазвание: {title} ✓\n\n\
             Шаг 2/4: Введи описание задачи\n\nИли напиши '-' чтобы пропустить"
        ),
        _ => format!(
            "📝 New task\n\nTitle: {title} ✓\n\n\
             Step 2/4: Enter a description\n\nOr send '-' to skip"
        ),
    }
}

/// Create-task step 3 prompt with a numbered context list.
pub fn task_context_prompt(lang: &str, title: &str, contexts: &[&str]) -> String {
    let mut out = match lang {
        "Russian" => format!(
            "📝 Создание новой задачи\n\nНазвание: {title} ✓\nОписание: ✓\n\n\
             Шаг 3/4: Выбери контекст или введи '-' чтобы пропустить\n"
        ),
        _ => format!(
            "📝 New task\n\nTitle: {title} ✓\nDescription: ✓\n\n\
             Step 3/4: Pick a context or send '-' to skip\n"
        ),
    };
    if !contexts.is_empty() {
        out.push('\n');
        out.push_str(match lang {
            "Russian" => "Доступные контексты:\n",
            _ => "Available contexts:\n",
        });
        for (i, c) in contexts.iter().enumerate() {
            out.push_str(&format!("{}. 📂 {c}\n", i + 1));
        }
        out.push_str(match lang {
            "Russian" => "\nВведи номер контекста или '-'",
            _ => "\nSend the context number or '-'",
        });
    }
    out
}

/// Create-task step 4 prompt, shown above the due-date keyboard.
pub fn task_due_prompt(lang: &str, title: &str) -> String {
    match lang {
        "Russian" => format!(
            "📝 Создание новой задачи\n\nНазвание: {title} ✓\nОписание: ✓\nКонтекст: ✓\n\n\
             Шаг 4/4: Выбери дедлайн"
        ),
        _ => format!(
            "📝 New task\n\nTitle: {title} ✓\nDescription: ✓\nContext: ✓\n\n\
             Step 4/4: Choose a deadline"
        ),
    }
}

pub fn context_description_prompt(lang: &str, title: &str) -> String {
    match lang {
        "Russian" => format!(
            "📁 Создание нового контекста\n\nНазвание: {title} ✓\n\n\
             Шаг 2/2: Введи описание контекста\n\nИли напиши '-' чтобы пропустить"
        ),
        _ => format!(
            "📁 New context\n\nTitle: {title} ✓\n\n\
             Step 2/2: Enter a description\n\nOr send '-' to skip"
        ),
    }
}

/// Confirmation after a task is created.
pub fn task_created(lang: &str, title: &str, description: &str, due: Option<&str>) -> String {
    let mut out = match lang {
        "Russian" => format!("✅ Задача создана!\n\n📝 {title}\n"),
        _ => format!("✅ Task created!\n\n📝 {title}\n"),
    };
    if !description.is_empty() {
        out.push_str(&format!("📄 {description}\n"));
    }
    if let Some(due) = due {
        out.push_str(&match lang {
            "Russian" => format!("⏰ До {due}\n"),
            _ => format!("⏰ Due {due}\n"),
        });
    }
    out
}

pub fn context_created(lang: &str, title: &str, description: &str) -> String {
    let mut out = match lang {
        "Russian" => format!("✅ Контекст создан!\n\n📁 {title}\n"),
        _ => format!("✅ Context created!\n\n📁 {title}\n"),
    };
    if !description.is_empty() {
        out.push_str(&format!("📄 {description}\n"));
    }
    out
}

/// A failed create, surfacing the underlying error.
pub fn task_create_failed(lang: &str, err: &str) -> String {
    match lang {
        "Russian" => format!("❌ Ошибка при создании задачи: {err}"),
        _ => format!("❌ Failed to create task: {err}"),
    }
}

pub fn context_create_failed(lang: &str, err: &str) -> String {
    match lang {
        "Russian" => format!("❌ Ошибка при создании контекста: {err}"),
        _ => format!("❌ Failed to create context: {err}"),
    }
}

// --- Task and context details ---

pub fn task_completed(lang: &str, title: &str) -> String {
    let head = t("notice_task_completed", lang);
    format!("{head}\n\n📝 {title}")
}

pub fn task_reopened(lang: &str, title: &str) -> String {
    let head = t("notice_task_reopened", lang);
    format!("{head}\n\n📝 {title}")
}

pub fn status_line(lang: &str, status: &str) -> String {
    match lang {
        "Russian" => format!("Статус: {status}"),
        _ => format!("Status: {status}"),
    }
}

pub fn description_block(lang: &str, description: &str) -> String {
    match lang {
        "Russian" => format!("📄 Описание:\n{description}"),
        _ => format!("📄 Description:\n{description}"),
    }
}

pub fn due_line(lang: &str, when: &str) -> String {
    match lang {
        "Russian" => format!("⏰ Срок: {when}"),
        _ => format!("⏰ Due: {when}"),
    }
}

pub fn context_line(lang: &str, title: &str) -> String {
    match lang {
        "Russian" => format!("📂 Контекст: {title}"),
        _ => format!("📂 Context: {title}"),
    }
}

pub fn context_task_counts(lang: &str, total: usize, active: usize, completed: usize) -> String {
    match lang {
        "Russian" => format!(
            "📊 Задач: {total} (активных: {active}, завершено: {completed})"
        ),
        _ => format!("📊 Tasks: {total} (active: {active}, completed: {completed})"),
    }
}

pub fn context_tasks_header(lang: &str, title: &str, n: usize) -> String {
    match lang {
        "Russian" => format!("📂 Контекст: {title}\n\n📋 Задачи ({n}):"),
        _ => format!("📂 Context: {title}\n\n📋 Tasks ({n}):"),
    }
}

pub fn context_tasks_empty(lang: &str, title: &str) -> String {
    match lang {
        "Russian" => format!("📂 Контекст: {title}\n\n📝 В этом контексте пока нет задач"),
        _ => format!("📂 Context: {title}\n\n📝 No tasks in this context yet"),
    }
}

pub fn confirm_delete_task(lang: &str, title: &str) -> String {
    match lang {
        "Russian" => format!("⚠️ Удалить задачу?\n\n📝 {title}\n\nЭто действие нельзя отменить!"),
        _ => format!("⚠️ Delete this task?\n\n📝 {title}\n\nThis can't be undone!"),
    }
}

pub fn confirm_delete_context(lang: &str, title: &str) -> String {
    match lang {
        "Russian" => format!(
            "⚠️ Удалить контекст?\n\n📂 {title}\n\n\
             ⚠️ Все задачи контекста останутся, но потеряют связь с ним!"
        ),
        _ => format!(
            "⚠️ Delete this context?\n\n📂 {title}\n\n\
             ⚠️ Its tasks will be kept but lose their context!"
        ),
    }
}

pub fn due_prompt_for(lang: &str, title: &str) -> String {
    let head = t("choose_due_date", lang);
    format!("{head}\n\n📝 {title}")
}

pub fn due_updated(lang: &str, title: &str, due: Option<&str>) -> String {
    match (lang, due) {
        ("Russian", Some(d)) => format!("⏰ Срок обновлен: {d}\n\n📝 {title}"),
        ("Russian", None) => format!("⏰ Срок убран\n\n📝 {title}"),
        (_, Some(d)) => format!("⏰ Due date set to {d}\n\n📝 {title}"),
        (_, None) => format!("⏰ Due date cleared\n\n📝 {title}"),
    }
}
