use super::ModelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user, keyed internally by UUID and externally by messenger id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Platform-specific user id (e.g. Telegram `from.id`). Unique.
    pub external_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(external_id: &str) -> Result<Self, ModelError> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(ModelError::EmptyExternalId);
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            external_id: external_id.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}
