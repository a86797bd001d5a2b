use super::ModelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// What kind of grouping a context represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    Subject,
    Project,
    Personal,
    Work,
    #[default]
    Other,
}

impl ContextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Project => "project",
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subject" => Ok(Self::Subject),
            "project" => Ok(Self::Project),
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "other" => Ok(Self::Other),
            other => Err(ModelError::InvalidContextType(other.to_string())),
        }
    }
}

/// A user-defined grouping (subject, project, ...) that tasks may belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: ContextType,
    pub title: String,
    pub description: String,
    pub subject_id: Option<String>,
    /// Display color as a hex string (e.g. `#3B82F6`).
    pub color: String,
    pub deadline_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a context. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextUpdate {
    pub kind: Option<ContextType>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub subject_id: Option<Option<String>>,
    pub deadline_at: Option<Option<DateTime<Utc>>>,
}

impl Context {
    pub fn new(
        user_id: Uuid,
        kind: ContextType,
        title: &str,
        description: &str,
        color: &str,
        subject_id: Option<String>,
        deadline_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ModelError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ModelError::EmptyContextTitle);
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            title: title.to_string(),
            description: description.to_string(),
            subject_id,
            color: color.to_string(),
            deadline_at,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update. Rejects a blank title without touching anything.
    pub fn apply(&mut self, update: ContextUpdate) -> Result<(), ModelError> {
        if let Some(ref title) = update.title {
            if title.trim().is_empty() {
                return Err(ModelError::EmptyContextTitle);
            }
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(subject_id) = update.subject_id {
            self.subject_id = subject_id;
        }
        if let Some(deadline_at) = update.deadline_at {
            self.deadline_at = deadline_at;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
