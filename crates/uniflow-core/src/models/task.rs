use super::ModelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ModelError::InvalidTaskStatus(other.to_string())),
        }
    }
}

/// A unit of work owned by a user, optionally filed under a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub context_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_at: Option<DateTime<Utc>>,
    /// Set iff `status == Completed`.
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a task. `None` leaves a field untouched.
///
/// `context_id` and `due_at` are doubly optional so a caller can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub context_id: Option<Option<Uuid>>,
    pub due_at: Option<Option<DateTime<Utc>>>,
}

impl Task {
    /// Create a new `todo` task.
    pub fn new(
        user_id: Uuid,
        context_id: Option<Uuid>,
        title: &str,
        description: &str,
        due_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ModelError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ModelError::EmptyTaskTitle);
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            context_id,
            title: title.to_string(),
            description: description.to_string(),
            status: TaskStatus::Todo,
            due_at,
            completed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update. Rejects a blank title without touching anything.
    pub fn apply(&mut self, update: TaskUpdate) -> Result<(), ModelError> {
        if let Some(ref title) = update.title {
            if title.trim().is_empty() {
                return Err(ModelError::EmptyTaskTitle);
            }
        }
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(context_id) = update.context_id {
            self.context_id = context_id;
        }
        if let Some(due_at) = update.due_at {
            self.due_at = due_at;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Move the task to `status`, maintaining `completed_at`.
    pub fn change_status(&mut self, status: TaskStatus) {
        let now = Utc::now();
        self.status = status;
        self.completed_at = match status {
            TaskStatus::Completed => Some(now),
            _ => None,
        };
        self.updated_at = now;
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
