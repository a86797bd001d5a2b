//! Domain entities: users, contexts, and tasks.
//!
//! Constructors enforce the invariants (non-empty titles, non-empty external
//! ids); mutators bump `updated_at`.

mod context;
mod task;
mod user;

#[cfg(test)]
mod tests;

pub use context::{Context, ContextType, ContextUpdate};
pub use task::{Task, TaskStatus, TaskUpdate};
pub use user::User;

use thiserror::Error;

/// Validation failure when constructing or mutating an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid task title: title cannot be empty")]
    EmptyTaskTitle,

    #[error("invalid context title: title cannot be empty")]
    EmptyContextTitle,

    #[error("invalid external user id: cannot be empty")]
    EmptyExternalId,

    #[error("invalid task status: {0}")]
    InvalidTaskStatus(String),

    #[error("invalid context type: {0}")]
    InvalidContextType(String),
}
