//! Button-callback handlers.
//!
//! Every handler produces an [`Answered`]: the notice used to acknowledge
//! the tap plus any replies. Acknowledging is left to the caller so it
//! happens exactly once per tap, whatever the handler did.

use super::keyboards;
use super::router::{Callback, ContextAction, DueChoice, MenuAction, TaskAction};
use super::session::{TaskStep, Wizard};
use super::views;
use super::wizard::due_at;
use super::{Bot, Reply};
use crate::i18n::{self, t};
use tracing::warn;
use uniflow_core::error::ErrorKind;
use uniflow_core::models::{Context, Task, TaskStatus, TaskUpdate, User};
use uuid::Uuid;

/// Result of handling one tap.
#[derive(Debug, Default)]
pub(super) struct Answered {
    pub notice: String,
    pub replies: Vec<Reply>,
}

impl Answered {
    pub fn silent(replies: Vec<Reply>) -> Self {
        Self {
            notice: String::new(),
            replies,
        }
    }

    pub fn notice(notice: &str) -> Self {
        Self {
            notice: notice.to_string(),
            replies: Vec::new(),
        }
    }

    pub fn new(notice: &str, replies: Vec<Reply>) -> Self {
        Self {
            notice: notice.to_string(),
            replies,
        }
    }
}

impl Bot {
    pub(super) async fn run_callback(&self, key: &str, sender: &str, cb: Callback) -> Answered {
        match cb {
            Callback::Menu(action) => {
                // Menu buttons are top-level navigation, like commands.
                self.sessions.end(key);
                Answered::silent(self.run_menu(key, sender, action).await)
            }
            Callback::Date(choice) => self.on_date(key, sender, choice).await,
            Callback::Task { action, id } => {
                let user = match self.user(sender).await {
                    Ok(u) => u,
                    Err(_) => return Answered::notice(t("error_user", &self.lang)),
                };
                match self.owned_task(&user, id).await {
                    Ok(task) => self.on_task(key, sender, action, task).await,
                    Err(denied) => Answered::notice(t(denied, &self.lang)),
                }
            }
            Callback::Context { action, id } => {
                let user = match self.user(sender).await {
                    Ok(u) => u,
                    Err(_) => return Answered::notice(t("error_user", &self.lang)),
                };
                match self.owned_context(&user, id).await {
                    Ok(context) => self.on_context(key, sender, action, context).await,
                    Err(denied) => Answered::notice(t(denied, &self.lang)),
                }
            }
        }
    }

    async fn run_menu(&self, key: &str, sender: &str, action: MenuAction) -> Vec<Reply> {
        match action {
            MenuAction::Main => vec![self.main_menu()],
            MenuAction::Today => self.schedule(sender, 0).await,
            MenuAction::Schedule(offset) => self.schedule(sender, offset).await,
            MenuAction::Tasks => self.tasks(sender).await,
            MenuAction::Inbox => self.inbox(sender).await,
            MenuAction::NewTask => self.begin_task_wizard(key),
            MenuAction::Contexts => self.contexts(sender).await,
            MenuAction::NewContext => self.begin_context_wizard(key),
            MenuAction::Search => self.begin_search(key),
        }
    }

    /// Due-date choice for the task being created.
    async fn on_date(&self, key: &str, sender: &str, choice: DueChoice) -> Answered {
        match self.sessions.get(key).map(|s| s.wizard) {
            Some(Wizard::CreateTask {
                step: TaskStep::DueDate,
                draft,
            }) => Answered::silent(self.finish_task(key, sender, draft, due_at(choice)).await),
            _ => Answered::silent(vec![Reply::text(t("no_task_wizard", &self.lang))]),
        }
    }

    async fn on_task(&self, key: &str, sender: &str, action: TaskAction, task: Task) -> Answered {
        let lang = self.lang.as_str();
        let id = task.id.to_string();

        match action {
            TaskAction::View => {
                let context_title = self.context_title(task.context_id).await;
                Answered::silent(vec![Reply::with_keyboard(
                    views::task_detail(lang, &task, context_title.as_deref()),
                    keyboards::task_detail(lang, &task),
                )])
            }
            TaskAction::Complete | TaskAction::Reopen => {
                let (status, notice) = if action == TaskAction::Complete {
                    (TaskStatus::Completed, "notice_task_completed")
                } else {
                    (TaskStatus::Todo, "notice_task_reopened")
                };
                match self.service.update_task_status(&id, status).await {
                    Ok(updated) => {
                        let text = if updated.is_completed() {
                            i18n::task_completed(lang, &updated.title)
                        } else {
                            i18n::task_reopened(lang, &updated.title)
                        };
                        Answered::new(
                            t(notice, lang),
                            vec![Reply::with_keyboard(text, keyboards::main_menu(lang))],
                        )
                    }
                    Err(e) => {
                        self.log_failure(&e);
                        Answered::notice(t("error_update", lang))
                    }
                }
            }
            TaskAction::Edit => {
                self.sessions.begin(key, Wizard::edit_task(task.id));
                Answered::new(
                    t("notice_editing_task", lang),
                    vec![Reply::text(t("edit_task_title_prompt", lang))],
                )
            }
            TaskAction::Delete => Answered::silent(vec![Reply::with_keyboard(
                i18n::confirm_delete_task(lang, &task.title),
                keyboards::confirm(
                    lang,
                    Callback::Task {
                        action: TaskAction::Confirm,
                        id: task.id,
                    },
                    Callback::Task {
                        action: TaskAction::Cancel,
                        id: task.id,
                    },
                ),
            )]),
            TaskAction::Confirm => match self.service.delete_task(&id).await {
                Ok(()) => {
                    let mut replies = vec![Reply::text(t("task_deleted", lang))];
                    replies.extend(self.tasks(sender).await);
                    Answered::new(t("notice_task_deleted", lang), replies)
                }
                Err(e) => {
                    self.log_failure(&e);
                    Answered::notice(t("error_delete", lang))
                }
            },
            TaskAction::Cancel => Answered::new(t("cancelled", lang), vec![self.main_menu()]),
            TaskAction::Due => Answered::silent(vec![Reply::with_keyboard(
                i18n::due_prompt_for(lang, &task.title),
                keyboards::due_selection(lang, task.id),
            )]),
            TaskAction::SetDue(choice) => {
                let update = TaskUpdate {
                    due_at: Some(due_at(choice)),
                    ..TaskUpdate::default()
                };
                match self.service.update_task(&id, update).await {
                    Ok(updated) => {
                        let due = updated.due_at.as_ref().map(views::date);
                        Answered::new(
                            t("notice_due_updated", lang),
                            vec![Reply::with_keyboard(
                                i18n::due_updated(lang, &updated.title, due.as_deref()),
                                keyboards::task_detail(lang, &updated),
                            )],
                        )
                    }
                    Err(e) => {
                        self.log_failure(&e);
                        Answered::notice(t("error_update", lang))
                    }
                }
            }
        }
    }

    async fn on_context(
        &self,
        key: &str,
        sender: &str,
        action: ContextAction,
        context: Context,
    ) -> Answered {
        let lang = self.lang.as_str();
        let id = context.id.to_string();

        match action {
            ContextAction::View => match self.service.tasks_by_context(&id).await {
                Ok(tasks) => Answered::silent(vec![Reply::with_keyboard(
                    views::context_detail(lang, &context, &tasks),
                    keyboards::context_detail(lang, &context),
                )]),
                Err(e) => {
                    self.log_failure(&e);
                    Answered::silent(vec![Reply::text(t("error_tasks", lang))])
                }
            },
            ContextAction::Tasks => Answered::silent(self.context_task_list(&context).await),
            ContextAction::Edit => {
                self.sessions.begin(key, Wizard::edit_context(context.id));
                Answered::new(
                    t("notice_editing_context", lang),
                    vec![Reply::text(t("edit_context_title_prompt", lang))],
                )
            }
            ContextAction::Delete => Answered::silent(vec![Reply::with_keyboard(
                i18n::confirm_delete_context(lang, &context.title),
                keyboards::confirm(
                    lang,
                    Callback::Context {
                        action: ContextAction::Confirm,
                        id: context.id,
                    },
                    Callback::Context {
                        action: ContextAction::Cancel,
                        id: context.id,
                    },
                ),
            )]),
            ContextAction::Confirm => match self.service.delete_context(&id).await {
                Ok(()) => {
                    let mut replies = vec![Reply::text(t("context_deleted", lang))];
                    replies.extend(self.contexts(sender).await);
                    Answered::new(t("notice_context_deleted", lang), replies)
                }
                Err(e) => {
                    self.log_failure(&e);
                    Answered::notice(t("error_delete", lang))
                }
            },
            ContextAction::Cancel => {
                Answered::new(t("cancelled", lang), self.contexts(sender).await)
            }
        }
    }

    /// Load a task and check that `user` owns it. The error is the i18n key
    /// of the message to show.
    pub(super) async fn owned_task(&self, user: &User, id: Uuid) -> Result<Task, &'static str> {
        match self.service.get_task(&id.to_string()).await {
            Ok(task) if task.user_id == user.id => Ok(task),
            Ok(_) => {
                warn!("user {} denied access to task {id}", user.id);
                Err("task_access_denied")
            }
            Err(e) if e.is(ErrorKind::NotFound) => Err("task_not_found"),
            Err(e) => {
                self.log_failure(&e);
                Err("error_generic")
            }
        }
    }

    /// Load a context and check that `user` owns it.
    pub(super) async fn owned_context(
        &self,
        user: &User,
        id: Uuid,
    ) -> Result<Context, &'static str> {
        match self.service.get_context(&id.to_string()).await {
            Ok(context) if context.user_id == user.id => Ok(context),
            Ok(_) => {
                warn!("user {} denied access to context {id}", user.id);
                Err("context_access_denied")
            }
            Err(e) if e.is(ErrorKind::NotFound) => Err("context_not_found"),
            Err(e) => {
                self.log_failure(&e);
                Err("error_generic")
            }
        }
    }
}
