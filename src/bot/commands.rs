//! Top-level command handlers and the read-side listings they share with
//! menu buttons.

use super::keyboards::{self, LIST_BUTTONS};
use super::router::Command;
use super::session::Wizard;
use super::views;
use super::{Bot, Reply};
use crate::i18n::{self, t};
use chrono::{Duration, Local};
use tracing::info;
use uniflow_core::models::Context;
use uuid::Uuid;

impl Bot {
    pub(super) async fn run_command(
        &self,
        key: &str,
        sender: &str,
        cmd: Command,
        had_session: bool,
    ) -> Vec<Reply> {
        let lang = self.lang.as_str();
        match cmd {
            Command::Start => vec![Reply::with_keyboard(
                t("welcome", lang),
                keyboards::main_menu(lang),
            )],
            Command::Menu => vec![self.main_menu()],
            Command::Today => self.schedule(sender, 0).await,
            Command::Tasks => self.tasks(sender).await,
            Command::Inbox => self.inbox(sender).await,
            Command::NewTask => self.begin_task_wizard(key),
            Command::Contexts => self.contexts(sender).await,
            Command::NewContext => self.begin_context_wizard(key),
            Command::Search(query) if query.is_empty() => {
                vec![Reply::text(t("search_usage", lang))]
            }
            Command::Search(query) => self.search(sender, &query).await,
            Command::Cancel => {
                let text = if had_session {
                    t("cancelled", lang)
                } else {
                    t("nothing_to_cancel", lang)
                };
                vec![Reply::with_keyboard(text, keyboards::main_menu(lang))]
            }
            Command::Help => vec![Reply::with_keyboard(
                t("help_text", lang),
                keyboards::main_menu(lang),
            )],
            Command::Unknown(name) => {
                info!("unknown command {name} from {key}");
                vec![Reply::text(t("unknown_command", lang))]
            }
        }
    }

    pub(super) fn begin_task_wizard(&self, key: &str) -> Vec<Reply> {
        self.sessions.begin(key, Wizard::create_task());
        vec![Reply::text(t("new_task_title_prompt", &self.lang))]
    }

    pub(super) fn begin_context_wizard(&self, key: &str) -> Vec<Reply> {
        self.sessions.begin(key, Wizard::create_context());
        vec![Reply::text(t("new_context_title_prompt", &self.lang))]
    }

    pub(super) fn begin_search(&self, key: &str) -> Vec<Reply> {
        self.sessions.begin(key, Wizard::Search);
        vec![Reply::text(t("search_prompt", &self.lang))]
    }

    /// Tasks due on today plus `offset` days, with day navigation.
    pub(super) async fn schedule(&self, sender: &str, offset: i64) -> Vec<Reply> {
        let lang = self.lang.as_str();
        let user = match self.user(sender).await {
            Ok(u) => u,
            Err(reply) => return vec![reply],
        };

        let today = Local::now().date_naive();
        let day = Duration::try_days(offset)
            .and_then(|d| today.checked_add_signed(d))
            .unwrap_or(today);
        let due = if offset == 0 {
            self.service.tasks_due_today(user.id).await
        } else {
            self.service.tasks_due_on(user.id, day).await
        };
        let tasks = match due {
            Ok(tasks) => tasks,
            Err(e) => {
                self.log_failure(&e);
                return vec![Reply::text(t("error_tasks", lang))];
            }
        };

        let label = if offset == 0 {
            t("today_label", lang).to_string()
        } else {
            day.format("%d.%m").to_string()
        };
        vec![Reply::with_keyboard(
            views::schedule(lang, &label, &tasks),
            keyboards::schedule(lang, offset),
        )]
    }

    pub(super) async fn tasks(&self, sender: &str) -> Vec<Reply> {
        let lang = self.lang.as_str();
        let user = match self.user(sender).await {
            Ok(u) => u,
            Err(reply) => return vec![reply],
        };
        let tasks = match self.service.tasks_by_user(user.id).await {
            Ok(tasks) => tasks,
            Err(e) => {
                self.log_failure(&e);
                return vec![Reply::text(t("error_tasks", lang))];
            }
        };
        if tasks.is_empty() {
            return vec![Reply::with_keyboard(
                t("no_tasks", lang),
                keyboards::main_menu(lang),
            )];
        }

        let (active, _) = views::partition(&tasks);
        let shown = &active[..active.len().min(LIST_BUTTONS)];
        vec![Reply::with_keyboard(
            views::task_overview(lang, &tasks),
            keyboards::task_list(lang, shown),
        )]
    }

    /// Tasks with no context.
    pub(super) async fn inbox(&self, sender: &str) -> Vec<Reply> {
        let lang = self.lang.as_str();
        let user = match self.user(sender).await {
            Ok(u) => u,
            Err(reply) => return vec![reply],
        };
        let tasks: Vec<_> = match self.service.tasks_by_user(user.id).await {
            Ok(tasks) => tasks
                .into_iter()
                .filter(|task| task.context_id.is_none())
                .collect(),
            Err(e) => {
                self.log_failure(&e);
                return vec![Reply::text(t("error_tasks", lang))];
            }
        };
        if tasks.is_empty() {
            return vec![Reply::with_keyboard(
                t("inbox_empty", lang),
                keyboards::main_menu(lang),
            )];
        }

        let (active, _) = views::partition(&tasks);
        vec![Reply::with_keyboard(
            views::inbox(lang, &tasks),
            keyboards::inbox(lang, &active),
        )]
    }

    pub(super) async fn contexts(&self, sender: &str) -> Vec<Reply> {
        let lang = self.lang.as_str();
        let user = match self.user(sender).await {
            Ok(u) => u,
            Err(reply) => return vec![reply],
        };
        let contexts = match self.service.contexts_by_user(user.id).await {
            Ok(contexts) => contexts,
            Err(e) => {
                self.log_failure(&e);
                return vec![Reply::text(t("error_contexts", lang))];
            }
        };
        if contexts.is_empty() {
            return vec![Reply::with_keyboard(
                t("no_contexts", lang),
                keyboards::main_menu(lang),
            )];
        }
        vec![Reply::with_keyboard(
            views::contexts(lang, &contexts),
            keyboards::context_list(lang, &contexts),
        )]
    }

    pub(super) async fn search(&self, sender: &str, query: &str) -> Vec<Reply> {
        let lang = self.lang.as_str();
        let user = match self.user(sender).await {
            Ok(u) => u,
            Err(reply) => return vec![reply],
        };
        match self.service.search(user.id, query).await {
            Ok(results) if results.is_empty() => {
                vec![Reply::text(i18n::search_empty(lang, query))]
            }
            Ok(results) => vec![Reply::with_keyboard(
                views::search(lang, query, &results),
                keyboards::main_menu(lang),
            )],
            Err(e) => {
                self.log_failure(&e);
                vec![Reply::text(t("error_search", lang))]
            }
        }
    }

    /// Tasks filed under one context, as shown from the context view.
    pub(super) async fn context_task_list(
        &self,
        context: &Context,
    ) -> Vec<Reply> {
        let lang = self.lang.as_str();
        let tasks = match self.service.tasks_by_context(&context.id.to_string()).await {
            Ok(tasks) => tasks,
            Err(e) => {
                self.log_failure(&e);
                return vec![Reply::text(t("error_tasks", lang))];
            }
        };
        if tasks.is_empty() {
            return vec![Reply::with_keyboard(
                views::context_tasks(lang, context, &tasks),
                keyboards::main_menu(lang),
            )];
        }
        let shown: Vec<_> = tasks.iter().take(LIST_BUTTONS).collect();
        vec![Reply::with_keyboard(
            views::context_tasks(lang, context, &tasks),
            keyboards::task_list(lang, &shown),
        )]
    }

    /// Title of a task's context, if it still exists.
    pub(super) async fn context_title(&self, context_id: Option<Uuid>) -> Option<String> {
        let id = context_id?;
        self.service
            .get_context(&id.to_string())
            .await
            .ok()
            .map(|c| c.title)
    }
}
