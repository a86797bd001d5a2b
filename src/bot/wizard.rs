//! Free-text input while a wizard is active.

use super::keyboards;
use super::router::DueChoice;
use super::session::{TaskDraft, TaskStep, TitleDraft, TwoStep, Wizard};
use super::views;
use super::{Bot, Reply};
use crate::i18n::{self, t};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use uniflow_core::models::{ContextType, ContextUpdate, TaskUpdate};
use uniflow_core::service::{NewContext, NewTask};
use uuid::Uuid;

/// Typed in place of an optional value to skip it.
const SKIP: &str = "-";

/// Due timestamp for a date choice, counted from now.
pub(super) fn due_at(choice: DueChoice) -> Option<DateTime<Utc>> {
    match choice {
        DueChoice::InDays(days) => Some(Utc::now() + Duration::days(days)),
        DueChoice::Skip => None,
    }
}

/// Resolve a 1-based context number against the listed choices.
/// Anything else files the task in the inbox.
fn pick_context(draft: &TaskDraft, input: &str) -> Option<Uuid> {
    let n: usize = input.trim().parse().ok()?;
    draft.context_choices.get(n.checked_sub(1)?).copied()
}

/// `None` when the user typed the skip marker.
fn kept(input: &str) -> Option<String> {
    if input == SKIP {
        None
    } else {
        Some(input.to_string())
    }
}

impl Bot {
    pub(super) async fn continue_wizard(
        &self,
        key: &str,
        sender: &str,
        wizard: Wizard,
        text: &str,
    ) -> Vec<Reply> {
        let input = text.trim();
        debug!("{key} in {} step {}", wizard.name(), wizard.step());

        match wizard {
            Wizard::CreateTask { step, draft } => {
                self.task_step(key, sender, step, draft, input).await
            }
            Wizard::CreateContext { step, draft } => {
                self.context_step(key, sender, step, draft, input).await
            }
            Wizard::EditTask { step, draft } => {
                self.edit_task_step(key, sender, step, draft, input).await
            }
            Wizard::EditContext { step, draft } => {
                self.edit_context_step(key, sender, step, draft, input).await
            }
            Wizard::Search => {
                self.sessions.end(key);
                self.search(sender, input).await
            }
        }
    }

    /// Store the next wizard state. A session that vanished in between
    /// (expired or cancelled) drops the user back to the menu.
    fn advance(&self, key: &str, next: Wizard, reply: Reply) -> Vec<Reply> {
        match self.sessions.advance(key, next) {
            Ok(()) => vec![reply],
            Err(e) => {
                warn!("{e}");
                vec![self.main_menu()]
            }
        }
    }

    async fn task_step(
        &self,
        key: &str,
        sender: &str,
        step: TaskStep,
        mut draft: TaskDraft,
        input: &str,
    ) -> Vec<Reply> {
        let lang = self.lang.as_str();
        match step {
            TaskStep::Title => {
                if input.is_empty() {
                    return vec![Reply::text(t("title_required", lang))];
                }
                draft.title = input.to_string();
                let prompt = Reply::text(i18n::task_description_prompt(lang, &draft.title));
                self.advance(
                    key,
                    Wizard::CreateTask {
                        step: TaskStep::Description,
                        draft,
                    },
                    prompt,
                )
            }
            TaskStep::Description => {
                draft.description = kept(input).unwrap_or_default();

                let contexts = match self.user(sender).await {
                    Ok(user) => match self.service.contexts_by_user(user.id).await {
                        Ok(contexts) => contexts,
                        Err(e) => {
                            self.log_failure(&e);
                            Vec::new()
                        }
                    },
                    Err(_) => Vec::new(),
                };
                draft.context_choices = contexts.iter().map(|c| c.id).collect();
                let titles: Vec<&str> = contexts.iter().map(|c| c.title.as_str()).collect();
                let prompt = Reply::text(i18n::task_context_prompt(lang, &draft.title, &titles));
                self.advance(
                    key,
                    Wizard::CreateTask {
                        step: TaskStep::Context,
                        draft,
                    },
                    prompt,
                )
            }
            TaskStep::Context => {
                draft.context_id = pick_context(&draft, input);
                let prompt = Reply::with_keyboard(
                    i18n::task_due_prompt(lang, &draft.title),
                    keyboards::date_selection(lang),
                );
                self.advance(
                    key,
                    Wizard::CreateTask {
                        step: TaskStep::DueDate,
                        draft,
                    },
                    prompt,
                )
            }
            TaskStep::DueDate if input == SKIP => {
                self.finish_task(key, sender, draft, None).await
            }
            TaskStep::DueDate => vec![Reply::with_keyboard(
                t("choose_due_date", lang),
                keyboards::date_selection(lang),
            )],
        }
    }

    /// Create the drafted task and close the wizard either way.
    pub(super) async fn finish_task(
        &self,
        key: &str,
        sender: &str,
        draft: TaskDraft,
        due: Option<DateTime<Utc>>,
    ) -> Vec<Reply> {
        let lang = self.lang.as_str();
        self.sessions.end(key);

        let user = match self.user(sender).await {
            Ok(u) => u,
            Err(reply) => return vec![reply],
        };
        let new = NewTask {
            context_id: draft.context_id,
            title: draft.title,
            description: draft.description,
            due_at: due,
        };
        match self.service.create_task(user.id, new).await {
            Ok(task) => {
                let due = task.due_at.as_ref().map(views::date);
                vec![Reply::with_keyboard(
                    i18n::task_created(lang, &task.title, &task.description, due.as_deref()),
                    keyboards::main_menu(lang),
                )]
            }
            Err(e) => {
                self.log_failure(&e);
                vec![Reply::with_keyboard(
                    i18n::task_create_failed(lang, &e.to_string()),
                    keyboards::main_menu(lang),
                )]
            }
        }
    }

    async fn context_step(
        &self,
        key: &str,
        sender: &str,
        step: TwoStep,
        mut draft: TitleDraft,
        input: &str,
    ) -> Vec<Reply> {
        let lang = self.lang.as_str();
        match step {
            TwoStep::Title => {
                if input.is_empty() {
                    return vec![Reply::text(t("title_required", lang))];
                }
                let prompt = Reply::text(i18n::context_description_prompt(lang, input));
                draft.title = Some(input.to_string());
                self.advance(
                    key,
                    Wizard::CreateContext {
                        step: TwoStep::Description,
                        draft,
                    },
                    prompt,
                )
            }
            TwoStep::Description => {
                self.sessions.end(key);
                let user = match self.user(sender).await {
                    Ok(u) => u,
                    Err(reply) => return vec![reply],
                };
                let new = NewContext {
                    kind: ContextType::Other,
                    title: draft.title.unwrap_or_default(),
                    description: kept(input).unwrap_or_default(),
                    color: self.context_color.clone(),
                    ..NewContext::default()
                };
                match self.service.create_context(user.id, new).await {
                    Ok(context) => vec![Reply::with_keyboard(
                        i18n::context_created(lang, &context.title, &context.description),
                        keyboards::main_menu(lang),
                    )],
                    Err(e) => {
                        self.log_failure(&e);
                        vec![Reply::with_keyboard(
                            i18n::context_create_failed(lang, &e.to_string()),
                            keyboards::main_menu(lang),
                        )]
                    }
                }
            }
        }
    }

    async fn edit_task_step(
        &self,
        key: &str,
        sender: &str,
        step: TwoStep,
        mut draft: TitleDraft,
        input: &str,
    ) -> Vec<Reply> {
        let lang = self.lang.as_str();
        let Some(id) = draft.target else {
            self.sessions.end(key);
            return vec![self.main_menu()];
        };

        match step {
            TwoStep::Title => {
                if input.is_empty() {
                    return vec![Reply::text(t("title_required", lang))];
                }
                draft.title = kept(input);
                self.advance(
                    key,
                    Wizard::EditTask {
                        step: TwoStep::Description,
                        draft,
                    },
                    Reply::text(t("edit_description_prompt", lang)),
                )
            }
            TwoStep::Description => {
                self.sessions.end(key);
                let user = match self.user(sender).await {
                    Ok(u) => u,
                    Err(reply) => return vec![reply],
                };
                // The task may have changed hands or vanished since the
                // wizard started.
                if let Err(denied) = self.owned_task(&user, id).await {
                    return vec![Reply::text(t(denied, lang))];
                }
                let update = TaskUpdate {
                    title: draft.title,
                    description: kept(input),
                    ..TaskUpdate::default()
                };
                match self.service.update_task(&id.to_string(), update).await {
                    Ok(task) => {
                        let context_title = self.context_title(task.context_id).await;
                        vec![
                            Reply::text(t("task_updated", lang)),
                            Reply::with_keyboard(
                                views::task_detail(lang, &task, context_title.as_deref()),
                                keyboards::task_detail(lang, &task),
                            ),
                        ]
                    }
                    Err(e) => {
                        self.log_failure(&e);
                        vec![Reply::text(t("error_update", lang))]
                    }
                }
            }
        }
    }

    async fn edit_context_step(
        &self,
        key: &str,
        sender: &str,
        step: TwoStep,
        mut draft: TitleDraft,
        input: &str,
    ) -> Vec<Reply> {
        let lang = self.lang.as_str();
        let Some(id) = draft.target else {
            self.sessions.end(key);
            return vec![self.main_menu()];
        };

        match step {
            TwoStep::Title => {
                if input.is_empty() {
                    return vec![Reply::text(t("title_required", lang))];
                }
                draft.title = kept(input);
                self.advance(
                    key,
                    Wizard::EditContext {
                        step: TwoStep::Description,
                        draft,
                    },
                    Reply::text(t("edit_description_prompt", lang)),
                )
            }
            TwoStep::Description => {
                self.sessions.end(key);
                let user = match self.user(sender).await {
                    Ok(u) => u,
                    Err(reply) => return vec![reply],
                };
                if let Err(denied) = self.owned_context(&user, id).await {
                    return vec![Reply::text(t(denied, lang))];
                }
                let update = ContextUpdate {
                    title: draft.title,
                    description: kept(input),
                    ..ContextUpdate::default()
                };
                match self.service.update_context(&id.to_string(), update).await {
                    Ok(context) => {
                        let tasks = match self.service.tasks_by_context(&id.to_string()).await {
                            Ok(tasks) => tasks,
                            Err(e) => {
                                self.log_failure(&e);
                                Vec::new()
                            }
                        };
                        vec![
                            Reply::text(t("context_updated", lang)),
                            Reply::with_keyboard(
                                views::context_detail(lang, &context, &tasks),
                                keyboards::context_detail(lang, &context),
                            ),
                        ]
                    }
                    Err(e) => {
                        self.log_failure(&e);
                        vec![Reply::text(t("error_update_context", lang))]
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_context_is_one_based() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let draft = TaskDraft {
            context_choices: vec![a, b],
            ..TaskDraft::default()
        };
        assert_eq!(pick_context(&draft, "1"), Some(a));
        assert_eq!(pick_context(&draft, " 2 "), Some(b));
        assert_eq!(pick_context(&draft, "0"), None);
        assert_eq!(pick_context(&draft, "3"), None);
        assert_eq!(pick_context(&draft, "-"), None);
        assert_eq!(pick_context(&draft, "math"), None);
    }

    #[test]
    fn test_due_at_counts_days_from_now() {
        assert_eq!(due_at(DueChoice::Skip), None);
        let due = due_at(DueChoice::InDays(7)).unwrap();
        let hours = (due - Utc::now()).num_hours();
        assert!((167..=168).contains(&hours));
    }

    #[test]
    fn test_skip_marker() {
        assert_eq!(kept("-"), None);
        assert_eq!(kept("new title"), Some("new title".to_string()));
    }
}
