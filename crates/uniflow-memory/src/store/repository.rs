//! `Repository` port backed by the SQLite store.

use super::Store;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uniflow_core::{
    error::UniflowError,
    models::{Context, Task, User},
    traits::Repository,
};
use uuid::Uuid;

#[async_trait]
impl Repository for Store {
    async fn create_user(&self, user: &User) -> Result<bool, UniflowError> {
        self.insert_user(user).await
    }

    async fn get_user_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, UniflowError> {
        self.find_user_by_external_id(external_id).await
    }

    async fn create_context(&self, context: &Context) -> Result<(), UniflowError> {
        self.insert_context(context).await
    }

    async fn get_context(&self, id: Uuid) -> Result<Option<Context>, UniflowError> {
        self.find_context(id).await
    }

    async fn get_contexts_by_user(&self, user_id: Uuid) -> Result<Vec<Context>, UniflowError> {
        self.list_contexts(user_id).await
    }

    async fn search_contexts(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<Context>, UniflowError> {
        self.find_contexts_matching(user_id, query).await
    }

    async fn update_context(&self, context: &Context) -> Result<(), UniflowError> {
        self.save_context(context).await
    }

    async fn delete_context(&self, id: Uuid) -> Result<bool, UniflowError> {
        self.remove_context(id).await
    }

    async fn create_task(&self, task: &Task) -> Result<(), UniflowError> {
        self.insert_task(task).await
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, UniflowError> {
        self.find_task(id).await
    }

    async fn get_tasks_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, UniflowError> {
        self.list_tasks(user_id).await
    }

    async fn get_tasks_by_context(&self, context_id: Uuid) -> Result<Vec<Task>, UniflowError> {
        self.list_tasks_in_context(context_id).await
    }

    async fn get_tasks_due_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Task>, UniflowError> {
        self.list_tasks_due_between(user_id, start, end).await
    }

    async fn search_tasks(&self, user_id: Uuid, query: &str) -> Result<Vec<Task>, UniflowError> {
        self.find_tasks_matching(user_id, query).await
    }

    async fn update_task(&self, task: &Task) -> Result<(), UniflowError> {
        self.save_task(task).await
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, UniflowError> {
        self.remove_task(id).await
    }
}
