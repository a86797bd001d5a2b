//! Event classification: slash commands, button callbacks, and free text.
//!
//! Callback payloads are `domain_action[_arg...]` strings split on `_`.
//! Entity ids are UUIDs, which never contain the delimiter.

use uniflow_core::message::IncomingMessage;
use uuid::Uuid;

const DELIMITER: char = '_';

/// Largest due-date offset a button may carry, in days.
const MAX_DUE_OFFSET: i64 = 365;

/// Furthest the schedule view may page from today, either way, in days.
pub(crate) const MAX_SCHEDULE_OFFSET: i64 = 3650;

/// Top-level slash commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Menu,
    Today,
    Tasks,
    Inbox,
    NewTask,
    Contexts,
    NewContext,
    /// `/search <query>`; the query may be empty.
    Search(String),
    Cancel,
    Help,
    Unknown(String),
}

impl Command {
    /// Parse a command from message text. Returns `None` when the text is
    /// not a command at all.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }
        let (first, rest) = match text.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, rest.trim()),
            None => (text, ""),
        };
        // Strip @botname suffix (e.g. "/help@uniflow_bot" → "/help").
        let cmd = first.split('@').next().unwrap_or(first);
        Some(match cmd {
            "/start" => Self::Start,
            "/menu" => Self::Menu,
            "/today" => Self::Today,
            "/tasks" => Self::Tasks,
            "/inbox" => Self::Inbox,
            "/newtask" => Self::NewTask,
            "/contexts" => Self::Contexts,
            "/newcontext" => Self::NewContext,
            "/search" => Self::Search(rest.to_string()),
            "/cancel" => Self::Cancel,
            "/help" => Self::Help,
            other => Self::Unknown(other.to_string()),
        })
    }
}

/// A due-date choice: an offset in days from now, or no due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueChoice {
    InDays(i64),
    Skip,
}

impl DueChoice {
    fn parse(raw: &str) -> Option<Self> {
        if raw == "skip" {
            return Some(Self::Skip);
        }
        let days: i64 = raw.parse().ok()?;
        (0..=MAX_DUE_OFFSET).contains(&days).then_some(Self::InDays(days))
    }

    fn encode(self) -> String {
        match self {
            Self::InDays(n) => n.to_string(),
            Self::Skip => "skip".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Complete,
    View,
    Edit,
    Delete,
    Reopen,
    /// Delete after confirmation.
    Confirm,
    /// Abort a pending delete.
    Cancel,
    /// Offer the due-date keyboard for an existing task.
    Due,
    SetDue(DueChoice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    View,
    Tasks,
    Edit,
    Delete,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Main,
    Today,
    Tasks,
    Inbox,
    NewTask,
    Contexts,
    NewContext,
    Search,
    /// Schedule for today plus an offset in days (may be negative).
    Schedule(i64),
}

/// A parsed button payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    Task { action: TaskAction, id: Uuid },
    Context { action: ContextAction, id: Uuid },
    Menu(MenuAction),
    /// Due-date choice inside the create-task wizard.
    Date(DueChoice),
}

impl Callback {
    /// Parse a payload. Unknown domains, actions, or malformed ids yield `None`.
    pub fn parse(payload: &str) -> Option<Self> {
        let parts: Vec<&str> = payload.trim().split(DELIMITER).collect();
        match parts.as_slice() {
            ["task", "setdue", id, choice] => Some(Self::Task {
                action: TaskAction::SetDue(DueChoice::parse(choice)?),
                id: Uuid::parse_str(id).ok()?,
            }),
            ["task", action, id] => {
                let action = match *action {
                    "complete" => TaskAction::Complete,
                    "view" => TaskAction::View,
                    "edit" => TaskAction::Edit,
                    "delete" => TaskAction::Delete,
                    "reopen" => TaskAction::Reopen,
                    "confirm" => TaskAction::Confirm,
                    "cancel" => TaskAction::Cancel,
                    "due" => TaskAction::Due,
                    _ => return None,
                };
                Some(Self::Task {
                    action,
                    id: Uuid::parse_str(id).ok()?,
                })
            }
            ["context", action, id] => {
                let action = match *action {
                    "view" => ContextAction::View,
                    "tasks" => ContextAction::Tasks,
                    "edit" => ContextAction::Edit,
                    "delete" => ContextAction::Delete,
                    "confirm" => ContextAction::Confirm,
                    "cancel" => ContextAction::Cancel,
                    _ => return None,
                };
                Some(Self::Context {
                    action,
                    id: Uuid::parse_str(id).ok()?,
                })
            }
            ["menu", "schedule"] => Some(Self::Menu(MenuAction::Schedule(0))),
            ["menu", "schedule", offset] => {
                let offset: i64 = offset.parse().ok()?;
                (offset.abs() <= MAX_SCHEDULE_OFFSET)
                    .then_some(Self::Menu(MenuAction::Schedule(offset)))
            }
            ["menu", action] => {
                let action = match *action {
                    "main" => MenuAction::Main,
                    "today" => MenuAction::Today,
                    "tasks" => MenuAction::Tasks,
                    "inbox" => MenuAction::Inbox,
                    "newtask" => MenuAction::NewTask,
                    "contexts" => MenuAction::Contexts,
                    "newcontext" => MenuAction::NewContext,
                    "search" => MenuAction::Search,
                    _ => return None,
                };
                Some(Self::Menu(action))
            }
            ["date", choice] => Some(Self::Date(DueChoice::parse(choice)?)),
            _ => None,
        }
    }

    /// Encode back into the payload string carried by a button.
    pub fn payload(&self) -> String {
        match self {
            Self::Task { action, id } => {
                let action = match action {
                    TaskAction::Complete => "complete",
                    TaskAction::View => "view",
                    TaskAction::Edit => "edit",
                    TaskAction::Delete => "delete",
                    TaskAction::Reopen => "reopen",
                    TaskAction::Confirm => "confirm",
                    TaskAction::Cancel => "cancel",
                    TaskAction::Due => "due",
                    TaskAction::SetDue(choice) => {
                        return format!("task_setdue_{id}_{}", choice.encode());
                    }
                };
                format!("task_{action}_{id}")
            }
            Self::Context { action, id } => {
                let action = match action {
                    ContextAction::View => "view",
                    ContextAction::Tasks => "tasks",
                    ContextAction::Edit => "edit",
                    ContextAction::Delete => "delete",
                    ContextAction::Confirm => "confirm",
                    ContextAction::Cancel => "cancel",
                };
                format!("context_{action}_{id}")
            }
            Self::Menu(action) => match action {
                MenuAction::Main => "menu_main".to_string(),
                MenuAction::Today => "menu_today".to_string(),
                MenuAction::Tasks => "menu_tasks".to_string(),
                MenuAction::Inbox => "menu_inbox".to_string(),
                MenuAction::NewTask => "menu_newtask".to_string(),
                MenuAction::Contexts => "menu_contexts".to_string(),
                MenuAction::NewContext => "menu_newcontext".to_string(),
                MenuAction::Search => "menu_search".to_string(),
                MenuAction::Schedule(offset) => format!("menu_schedule_{offset}"),
            },
            Self::Date(choice) => format!("date_{}", choice.encode()),
        }
    }
}

/// The single handling path chosen for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Command(Command),
    /// Button tap. `callback` is `None` when the payload did not parse; the
    /// tap must still be acknowledged.
    Callback {
        callback_id: String,
        callback: Option<Callback>,
    },
    /// Free text: continues a wizard, or shows the menu when none is active.
    Text(String),
}

/// Classify an incoming event.
pub fn classify(incoming: &IncomingMessage) -> Route {
    if let Some(cmd) = Command::parse(&incoming.text) {
        return Route::Command(cmd);
    }
    if let Some(ref query) = incoming.callback {
        return Route::Callback {
            callback_id: query.id.clone(),
            callback: Callback::parse(&query.payload),
        };
    }
    Route::Text(incoming.text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    fn id() -> Uuid {
        Uuid::parse_str(ID).unwrap()
    }

    #[test]
    fn test_parse_all_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/menu"), Some(Command::Menu));
        assert_eq!(Command::parse("/today"), Some(Command::Today));
        assert_eq!(Command::parse("/tasks"), Some(Command::Tasks));
        assert_eq!(Command::parse("/inbox"), Some(Command::Inbox));
        assert_eq!(Command::parse("/newtask"), Some(Command::NewTask));
        assert_eq!(Command::parse("/contexts"), Some(Command::Contexts));
        assert_eq!(Command::parse("/newcontext"), Some(Command::NewContext));
        assert_eq!(Command::parse("/cancel"), Some(Command::Cancel));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
    }

    #[test]
    fn test_parse_search_keeps_query() {
        assert_eq!(
            Command::parse("/search  linear algebra "),
            Some(Command::Search("linear algebra".into()))
        );
        assert_eq!(Command::parse("/search"), Some(Command::Search(String::new())));
    }

    #[test]
    fn test_parse_strips_botname() {
        assert_eq!(Command::parse("/help@uniflow_bot"), Some(Command::Help));
    }

    #[test]
    fn test_parse_non_commands() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("-"), None);
        assert_eq!(
            Command::parse("/frobnicate"),
            Some(Command::Unknown("/frobnicate".into()))
        );
    }

    #[test]
    fn test_parse_task_callbacks() {
        assert_eq!(
            Callback::parse(&format!("task_complete_{ID}")),
            Some(Callback::Task {
                action: TaskAction::Complete,
                id: id()
            })
        );
        assert_eq!(
            Callback::parse(&format!("task_setdue_{ID}_3")),
            Some(Callback::Task {
                action: TaskAction::SetDue(DueChoice::InDays(3)),
                id: id()
            })
        );
        assert_eq!(
            Callback::parse(&format!("task_setdue_{ID}_skip")),
            Some(Callback::Task {
                action: TaskAction::SetDue(DueChoice::Skip),
                id: id()
            })
        );
    }

    #[test]
    fn test_parse_menu_schedule_offsets() {
        assert_eq!(
            Callback::parse("menu_schedule_0"),
            Some(Callback::Menu(MenuAction::Schedule(0)))
        );
        assert_eq!(
            Callback::parse("menu_schedule_-2"),
            Some(Callback::Menu(MenuAction::Schedule(-2)))
        );
        assert_eq!(
            Callback::parse("menu_schedule"),
            Some(Callback::Menu(MenuAction::Schedule(0)))
        );
        assert_eq!(Callback::parse("menu_schedule_x"), None);
    }

    #[test]
    fn test_parse_date_callbacks() {
        assert_eq!(
            Callback::parse("date_1"),
            Some(Callback::Date(DueChoice::InDays(1)))
        );
        assert_eq!(Callback::parse("date_skip"), Some(Callback::Date(DueChoice::Skip)));
        assert_eq!(Callback::parse("date_-1"), None);
        assert_eq!(Callback::parse("date_abc"), None);
    }

    #[test]
    fn test_parse_bounds_schedule_offset() {
        assert_eq!(
            Callback::parse("menu_schedule_3650"),
            Some(Callback::Menu(MenuAction::Schedule(MAX_SCHEDULE_OFFSET)))
        );
        assert_eq!(
            Callback::parse("menu_schedule_-3650"),
            Some(Callback::Menu(MenuAction::Schedule(-MAX_SCHEDULE_OFFSET)))
        );
        assert_eq!(Callback::parse("menu_schedule_3651"), None);
        assert_eq!(Callback::parse("menu_schedule_9223372036854775807"), None);
        assert_eq!(Callback::parse("menu_schedule_-9223372036854775808"), None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Callback::parse(""), None);
        assert_eq!(Callback::parse("task_complete"), None);
        assert_eq!(Callback::parse("task_complete_not-a-uuid"), None);
        assert_eq!(Callback::parse(&format!("task_explode_{ID}")), None);
        assert_eq!(Callback::parse(&format!("widget_view_{ID}")), None);
    }

    #[test]
    fn test_payload_parses_back() {
        let samples = [
            Callback::Task {
                action: TaskAction::Due,
                id: id(),
            },
            Callback::Task {
                action: TaskAction::SetDue(DueChoice::Skip),
                id: id(),
            },
            Callback::Context {
                action: ContextAction::Tasks,
                id: id(),
            },
            Callback::Menu(MenuAction::Schedule(-1)),
            Callback::Menu(MenuAction::NewContext),
            Callback::Date(DueChoice::InDays(7)),
        ];
        for cb in samples {
            assert_eq!(Callback::parse(&cb.payload()), Some(cb));
        }
    }

    #[test]
    fn test_classify_priority() {
        let cmd = IncomingMessage::text("telegram", "1", "1", "/today");
        assert_eq!(classify(&cmd), Route::Command(Command::Today));

        let tap = IncomingMessage::callback("telegram", "1", "1", "cb", "bogus");
        assert_eq!(
            classify(&tap),
            Route::Callback {
                callback_id: "cb".into(),
                callback: None
            }
        );

        let text = IncomingMessage::text("telegram", "1", "1", "  Write report ");
        assert_eq!(classify(&text), Route::Text("Write report".into()));
    }
}
