//! Per-user dialogue sessions.
//!
//! A session records which wizard a user is in and the fields collected so
//! far. Sessions are process-local and lost on restart.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no active session for {0}")]
    NoActiveSession(String),
}

/// Create-task wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStep {
    Title,
    Description,
    Context,
    DueDate,
}

/// Fields collected by the create-task wizard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub context_id: Option<Uuid>,
    /// Context ids in the order they were listed at the description step,
    /// so a typed number resolves against what the user actually saw.
    pub context_choices: Vec<Uuid>,
}

/// Two-step wizards share this shape: a title, then a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoStep {
    Title,
    Description,
}

/// Fields collected while creating or editing a titled entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleDraft {
    /// Entity being edited; `None` when creating.
    pub target: Option<Uuid>,
    /// New title. `None` when the user kept the current one.
    pub title: Option<String>,
}

/// The wizard a user is in, with its step and collected fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Wizard {
    CreateTask { step: TaskStep, draft: TaskDraft },
    CreateContext { step: TwoStep, draft: TitleDraft },
    EditTask { step: TwoStep, draft: TitleDraft },
    EditContext { step: TwoStep, draft: TitleDraft },
    /// Waiting for a search query.
    Search,
}

impl Wizard {
    pub fn create_task() -> Self {
        Self::CreateTask {
            step: TaskStep::Title,
            draft: TaskDraft::default(),
        }
    }

    pub fn create_context() -> Self {
        Self::CreateContext {
            step: TwoStep::Title,
            draft: TitleDraft::default(),
        }
    }

    pub fn edit_task(task_id: Uuid) -> Self {
        Self::EditTask {
            step: TwoStep::Title,
            draft: TitleDraft {
                target: Some(task_id),
                title: None,
            },
        }
    }

    pub fn edit_context(context_id: Uuid) -> Self {
        Self::EditContext {
            step: TwoStep::Title,
            draft: TitleDraft {
                target: Some(context_id),
                title: None,
            },
        }
    }

    /// State name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateTask { .. } => "creating_task",
            Self::CreateContext { .. } => "creating_context",
            Self::EditTask { .. } => "editing_task",
            Self::EditContext { .. } => "editing_context",
            Self::Search => "searching",
        }
    }

    /// 1-based step number.
    pub fn step(&self) -> u8 {
        match self {
            Self::CreateTask { step, .. } => match step {
                TaskStep::Title => 1,
                TaskStep::Description => 2,
                TaskStep::Context => 3,
                TaskStep::DueDate => 4,
            },
            Self::CreateContext { step, .. }
            | Self::EditTask { step, .. }
            | Self::EditContext { step, .. } => match step {
                TwoStep::Title => 1,
                TwoStep::Description => 2,
            },
            Self::Search => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub wizard: Wizard,
    pub last_update: DateTime<Utc>,
}

/// Map from user key to at most one active session.
///
/// Implementations must be safe to share across tasks. The in-memory store
/// is the only one shipped.
pub trait SessionStore: Send + Sync {
    /// Start a session, silently replacing any prior one.
    fn begin(&self, key: &str, wizard: Wizard);

    fn get(&self, key: &str) -> Option<Session>;

    /// Replace the wizard state of an existing session and bump its timestamp.
    fn advance(&self, key: &str, wizard: Wizard) -> Result<(), SessionError>;

    /// Remove the session. Ending a missing session is not an error.
    fn end(&self, key: &str);

    /// Drop sessions idle for longer than `ttl`. Returns how many were removed.
    fn sweep_expired(&self, ttl: Duration) -> usize;
}

/// Session store backed by a single synchronized map.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.map().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn begin(&self, key: &str, wizard: Wizard) {
        self.map().insert(
            key.to_string(),
            Session {
                wizard,
                last_update: Utc::now(),
            },
        );
    }

    fn get(&self, key: &str) -> Option<Session> {
        self.map().get(key).cloned()
    }

    fn advance(&self, key: &str, wizard: Wizard) -> Result<(), SessionError> {
        let mut map = self.map();
        let session = map
            .get_mut(key)
            .ok_or_else(|| SessionError::NoActiveSession(key.to_string()))?;
        session.wizard = wizard;
        session.last_update = Utc::now();
        Ok(())
    }

    fn end(&self, key: &str) {
        self.map().remove(key);
    }

    fn sweep_expired(&self, ttl: Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let mut map = self.map();
        let before = map.len();
        map.retain(|_, s| s.last_update >= cutoff);
        before - map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_starts_at_step_one() {
        let store = MemorySessionStore::new();
        store.begin("u1", Wizard::create_task());
        let s = store.get("u1").unwrap();
        assert_eq!(s.wizard.step(), 1);
        assert_eq!(s.wizard.name(), "creating_task");
    }

    #[test]
    fn test_begin_replaces_prior_session() {
        let store = MemorySessionStore::new();
        store.begin("u1", Wizard::create_task());
        store.begin("u1", Wizard::create_context());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("u1").unwrap().wizard.name(), "creating_context");
    }

    #[test]
    fn test_advance_without_begin_fails() {
        let store = MemorySessionStore::new();
        let err = store.advance("u1", Wizard::Search).unwrap_err();
        assert_eq!(err, SessionError::NoActiveSession("u1".into()));
        assert!(store.get("u1").is_none());
    }

    #[test]
    fn test_advance_updates_wizard_and_timestamp() {
        let store = MemorySessionStore::new();
        store.begin("u1", Wizard::create_task());
        let before = store.get("u1").unwrap().last_update;

        let next = Wizard::CreateTask {
            step: TaskStep::Description,
            draft: TaskDraft {
                title: "Write report".into(),
                ..TaskDraft::default()
            },
        };
        store.advance("u1", next.clone()).unwrap();

        let s = store.get("u1").unwrap();
        assert_eq!(s.wizard, next);
        assert_eq!(s.wizard.step(), 2);
        assert!(s.last_update >= before);
    }

    #[test]
    fn test_end_is_idempotent() {
        let store = MemorySessionStore::new();
        store.end("nobody");
        store.begin("u1", Wizard::Search);
        store.end("u1");
        store.end("u1");
        assert!(store.is_empty());
    }

    #[test]
    fn test_sweep_removes_only_stale_sessions() {
        let store = MemorySessionStore::new();
        store.begin("fresh", Wizard::Search);
        store.begin("stale", Wizard::create_task());
        store
            .map()
            .get_mut("stale")
            .unwrap()
            .last_update = Utc::now() - Duration::minutes(45);

        assert_eq!(store.sweep_expired(Duration::minutes(30)), 1);
        assert!(store.get("stale").is_none());
        assert!(store.get("fresh").is_some());
    }

    #[test]
    fn test_sessions_are_per_user() {
        let store = MemorySessionStore::new();
        store.begin("u1", Wizard::create_task());
        store.begin("u2", Wizard::create_context());
        store.end("u1");
        assert!(store.get("u1").is_none());
        assert_eq!(store.get("u2").unwrap().wizard.name(), "creating_context");
    }
}
