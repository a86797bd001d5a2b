use crate::{
    error::UniflowError,
    message::{IncomingMessage, OutgoingMessage},
    models::{Context, Task, User},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Messaging Channel trait.
///
/// Every messaging platform implements this trait to receive events and
/// send replies (optionally with an inline keyboard).
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming events.
    /// Returns a receiver that yields incoming messages and button taps.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, UniflowError>;

    /// Send a message (with its keyboard, if any) back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), UniflowError>;

    /// Acknowledge a button tap so the client stops showing it as pending.
    /// An empty `text` acknowledges silently.
    async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<(), UniflowError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), UniflowError>;
}

/// Persistence port for users, contexts, and tasks.
///
/// Lookups return `Ok(None)` for absent rows; `Err` is reserved for
/// infrastructure failures.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Insert a user unless one with the same external id exists.
    /// Returns `true` if a row was inserted.
    async fn create_user(&self, user: &User) -> Result<bool, UniflowError>;
    async fn get_user_by_external_id(&self, external_id: &str)
        -> Result<Option<User>, UniflowError>;

    async fn create_context(&self, context: &Context) -> Result<(), UniflowError>;
    async fn get_context(&self, id: Uuid) -> Result<Option<Context>, UniflowError>;
    async fn get_contexts_by_user(&self, user_id: Uuid) -> Result<Vec<Context>, UniflowError>;
    async fn search_contexts(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<Context>, UniflowError>;
    async fn update_context(&self, context: &Context) -> Result<(), UniflowError>;
    /// Delete a context, detaching (not deleting) its tasks.
    /// Returns `true` if a row was removed.
    async fn delete_context(&self, id: Uuid) -> Result<bool, UniflowError>;

    async fn create_task(&self, task: &Task) -> Result<(), UniflowError>;
    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, UniflowError>;
    /// All tasks of a user, newest first.
    async fn get_tasks_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, UniflowError>;
    async fn get_tasks_by_context(&self, context_id: Uuid) -> Result<Vec<Task>, UniflowError>;
    /// Tasks with `start <= due_at < end`, earliest first.
    async fn get_tasks_due_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Task>, UniflowError>;
    async fn search_tasks(&self, user_id: Uuid, query: &str) -> Result<Vec<Task>, UniflowError>;
    async fn update_task(&self, task: &Task) -> Result<(), UniflowError>;
    /// Returns `true` if a row was removed.
    async fn delete_task(&self, id: Uuid) -> Result<bool, UniflowError>;
}
