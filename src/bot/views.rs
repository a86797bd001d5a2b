//! Message text builders for listings and detail views.
//!
//! Dates are rendered in local time: `DD.MM.YYYY` in confirmations,
//! `DD.MM` as list suffixes, `DD.MM.YYYY HH:MM` in detail views.

use crate::i18n::{self, t};
use chrono::{DateTime, Local, Utc};
use uniflow_core::models::{Context, Task};
use uniflow_core::service::SearchResults;

/// Rows listed before an "...and N more" tail.
pub(crate) const LIST_LIMIT: usize = 10;
/// Active tasks listed by `/tasks`.
pub(crate) const SHORT_LIST_LIMIT: usize = 5;

pub fn date(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d.%m.%Y").to_string()
}

pub fn short_date(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d.%m").to_string()
}

pub fn date_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string()
}

/// Split tasks into (active, completed), keeping order.
pub fn partition(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    tasks.iter().partition(|task| !task.is_completed())
}

fn status_icon(task: &Task) -> &'static str {
    if task.is_completed() {
        "✅"
    } else {
        "⭕"
    }
}

/// Append up to `limit` rows produced by `row`, then a tail if any were cut.
fn push_limited<T>(
    out: &mut String,
    lang: &str,
    items: &[T],
    limit: usize,
    row: impl Fn(usize, &T) -> String,
) {
    for (i, item) in items.iter().take(limit).enumerate() {
        out.push_str(&row(i, item));
        out.push('\n');
    }
    if items.len() > limit {
        out.push_str(&i18n::more_items(lang, items.len() - limit));
        out.push('\n');
    }
}

fn due_suffix(lang: &str, task: &Task) -> String {
    task.due_at
        .as_ref()
        .map(|d| i18n::due_suffix(lang, &short_date(d)))
        .unwrap_or_default()
}

/// `/tasks`: total count, the first few active tasks, and a completed count.
pub fn task_overview(lang: &str, tasks: &[Task]) -> String {
    let (active, completed) = partition(tasks);
    let mut out = format!("{}\n\n", i18n::total_tasks(lang, tasks.len()));

    if !active.is_empty() {
        out.push_str(&i18n::active_header(lang, active.len()));
        out.push('\n');
        push_limited(&mut out, lang, &active, SHORT_LIST_LIMIT, |_, task| {
            format!("• {}{}", task.title, due_suffix(lang, task))
        });
        out.push('\n');
    }
    if !completed.is_empty() {
        out.push_str(&i18n::completed_count(lang, completed.len()));
        out.push('\n');
    }
    out
}

/// Schedule for one day, grouped by status.
pub fn schedule(lang: &str, day: &str, tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return i18n::schedule_empty(lang, day);
    }
    let (active, completed) = partition(tasks);
    let mut out = format!("{}\n\n", i18n::schedule_header(lang, day));

    if !active.is_empty() {
        out.push_str(&i18n::active_header(lang, active.len()));
        out.push('\n');
        push_limited(&mut out, lang, &active, LIST_LIMIT, |_, task| {
            format!("• {}", task.title)
        });
        out.push('\n');
    }
    if !completed.is_empty() {
        out.push_str(&i18n::completed_header(lang, completed.len()));
        out.push('\n');
        push_limited(&mut out, lang, &completed, LIST_LIMIT, |_, task| {
            format!("• {}", task.title)
        });
    }
    out
}

/// Inbox: numbered active tasks with due suffixes, then a completed count.
pub fn inbox(lang: &str, tasks: &[Task]) -> String {
    let (active, completed) = partition(tasks);
    let mut out = format!("{}\n\n", i18n::inbox_header(lang, tasks.len()));

    if !active.is_empty() {
        out.push_str(&i18n::active_header(lang, active.len()));
        out.push('\n');
        push_limited(&mut out, lang, &active, LIST_LIMIT, |i, task| {
            format!("{}. {}{}", i + 1, task.title, due_suffix(lang, task))
        });
        out.push('\n');
    }
    if !completed.is_empty() {
        out.push_str(&i18n::completed_count(lang, completed.len()));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(t("inbox_hint", lang));
    out
}

pub fn contexts(lang: &str, contexts: &[Context]) -> String {
    let mut out = format!("{}\n\n", i18n::contexts_header(lang, contexts.len()));
    for (i, c) in contexts.iter().enumerate() {
        out.push_str(&format!("{}. 📂 {}\n", i + 1, c.title));
        if !c.description.is_empty() {
            out.push_str(&format!("   {}\n", c.description));
        }
    }
    out
}

pub fn search(lang: &str, query: &str, results: &SearchResults) -> String {
    if results.is_empty() {
        return i18n::search_empty(lang, query);
    }
    let mut out = format!("{}\n\n", i18n::search_header(lang, query));

    if !results.contexts.is_empty() {
        out.push_str(&i18n::search_contexts_header(lang, results.contexts.len()));
        out.push('\n');
        push_limited(
            &mut out,
            lang,
            &results.contexts,
            SHORT_LIST_LIMIT,
            |i, c| format!("{}. 📂 {}", i + 1, c.title),
        );
        out.push('\n');
    }
    if !results.tasks.is_empty() {
        out.push_str(&i18n::search_tasks_header(lang, results.tasks.len()));
        out.push('\n');
        push_limited(&mut out, lang, &results.tasks, LIST_LIMIT, |i, task| {
            format!("{}. {} {}", i + 1, status_icon(task), task.title)
        });
    }
    out
}

pub fn task_detail(lang: &str, task: &Task, context_title: Option<&str>) -> String {
    let status = if task.is_completed() {
        t("status_done", lang)
    } else {
        t("status_open", lang)
    };
    let mut out = format!("📝 *{}*\n\n{}\n", task.title, i18n::status_line(lang, status));
    if !task.description.is_empty() {
        out.push_str(&format!("\n{}\n", i18n::description_block(lang, &task.description)));
    }
    if let Some(ref due) = task.due_at {
        out.push_str(&format!("\n{}\n", i18n::due_line(lang, &date_time(due))));
    }
    if let Some(title) = context_title {
        out.push_str(&format!("\n{}\n", i18n::context_line(lang, title)));
    }
    out
}

pub fn context_detail(lang: &str, context: &Context, tasks: &[Task]) -> String {
    let (active, completed) = partition(tasks);
    let mut out = format!("📂 *{}*\n\n", context.title);
    if !context.description.is_empty() {
        out.push_str(&format!("📄 {}\n\n", context.description));
    }
    out.push_str(&i18n::context_task_counts(
        lang,
        tasks.len(),
        active.len(),
        completed.len(),
    ));
    out
}

pub fn context_tasks(lang: &str, context: &Context, tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return i18n::context_tasks_empty(lang, &context.title);
    }
    let mut out = format!(
        "{}\n\n",
        i18n::context_tasks_header(lang, &context.title, tasks.len())
    );
    push_limited(&mut out, lang, tasks, LIST_LIMIT, |i, task| {
        format!("{}. {} {}", i + 1, status_icon(task), task.title)
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniflow_core::models::TaskStatus;
    use uuid::Uuid;

    fn tasks(n: usize) -> Vec<Task> {
        let user = Uuid::new_v4();
        (0..n)
            .map(|i| Task::new(user, None, &format!("task {i}"), "", None).unwrap())
            .collect()
    }

    #[test]
    fn test_schedule_groups_and_counts() {
        let mut list = tasks(3);
        list[1].change_status(TaskStatus::Completed);
        let text = schedule("English", "Today", &list);
        assert!(text.contains("Active (2):"));
        assert!(text.contains("Completed (1):"));
        for task in &list {
            assert_eq!(text.matches(&format!("• {}\n", task.title)).count(), 1);
        }
    }

    #[test]
    fn test_schedule_empty_day() {
        let text = schedule("English", "05.03", &[]);
        assert!(text.starts_with("📅 No tasks for 05.03!"));
    }

    #[test]
    fn test_overview_truncates_active_list() {
        let list = tasks(8);
        let text = task_overview("English", &list);
        assert!(text.contains("Total tasks: 8"));
        assert!(text.contains("• task 4\n"));
        assert!(!text.contains("• task 5\n"));
        assert!(text.contains("...and 3 more"));
    }

    #[test]
    fn test_inbox_numbers_rows_and_tails() {
        let list = tasks(12);
        let text = inbox("Russian", &list);
        assert!(text.contains("1. task 0"));
        assert!(text.contains("10. task 9"));
        assert!(!text.contains("11. task 10"));
        assert!(text.contains("...и ещё 2"));
    }

    #[test]
    fn test_task_detail_shows_context_and_status() {
        let mut list = tasks(1);
        list[0].description = "pages 1-5".into();
        let text = task_detail("English", &list[0], Some("Math"));
        assert!(text.contains("In progress"));
        assert!(text.contains("pages 1-5"));
        assert!(text.contains("Context: Math"));
    }
}
