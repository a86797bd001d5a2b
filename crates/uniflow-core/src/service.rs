//! Use-case layer: validation, id parsing, and error classification on top
//! of the [`Repository`] port.
//!
//! Every method tags failures with its operation name so callers can log
//! `op` and branch on [`ErrorKind`](crate::error::ErrorKind).

use crate::error::ServiceError;
use crate::models::{Context, ContextType, ContextUpdate, Task, TaskStatus, TaskUpdate, User};
use crate::traits::Repository;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Fields for a task about to be created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub context_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub due_at: Option<DateTime<Utc>>,
}

/// Fields for a context about to be created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewContext {
    pub kind: ContextType,
    pub title: String,
    pub description: String,
    pub color: String,
    pub subject_id: Option<String>,
    pub deadline_at: Option<DateTime<Utc>>,
}

/// Result of a combined task/context search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub tasks: Vec<Task>,
    pub contexts: Vec<Context>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.contexts.is_empty()
    }
}

/// Application service shared by every front end.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn Repository>,
}

fn parse_id(op: &'static str, raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|e| ServiceError::invalid(op, e))
}

/// UTC bounds `[start, end)` of a calendar day in the local time zone.
pub fn local_day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let to_utc = |naive: NaiveDateTime| {
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc())
    };
    let start = date.and_time(NaiveTime::MIN);
    let end = date.succ_opt().unwrap_or(date).and_time(NaiveTime::MIN);
    (to_utc(start), to_utc(end))
}

impl Service {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    // --- Users ---

    /// Look a user up by external id, creating it on first contact.
    ///
    /// Safe against concurrent first contact: the store ignores a duplicate
    /// insert and the winner's row is re-read.
    pub async fn get_or_create_user(&self, external_id: &str) -> Result<User, ServiceError> {
        const OP: &str = "service.get_or_create_user";

        if let Some(user) = self
            .repo
            .get_user_by_external_id(external_id)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?
        {
            return Ok(user);
        }

        let user = User::new(external_id).map_err(|e| ServiceError::invalid(OP, e))?;
        let inserted = self
            .repo
            .create_user(&user)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?;
        if inserted {
            tracing::info!("created user {} for external id {external_id}", user.id);
            return Ok(user);
        }

        self.repo
            .get_user_by_external_id(&user.external_id)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?
            .ok_or_else(|| ServiceError::not_found(OP))
    }

    // --- Contexts ---

    pub async fn create_context(
        &self,
        user_id: Uuid,
        new: NewContext,
    ) -> Result<Context, ServiceError> {
        const OP: &str = "service.create_context";

        let context = Context::new(
            user_id,
            new.kind,
            &new.title,
            &new.description,
            &new.color,
            new.subject_id,
            new.deadline_at,
        )
        .map_err(|e| ServiceError::invalid(OP, e))?;

        self.repo
            .create_context(&context)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?;
        Ok(context)
    }

    pub async fn get_context(&self, id: &str) -> Result<Context, ServiceError> {
        const OP: &str = "service.get_context";
        let id = parse_id(OP, id)?;
        self.repo
            .get_context(id)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?
            .ok_or_else(|| ServiceError::not_found(OP))
    }

    pub async fn contexts_by_user(&self, user_id: Uuid) -> Result<Vec<Context>, ServiceError> {
        const OP: &str = "service.contexts_by_user";
        self.repo
            .get_contexts_by_user(user_id)
            .await
            .map_err(|e| ServiceError::internal(OP, e))
    }

    pub async fn update_context(
        &self,
        id: &str,
        update: ContextUpdate,
    ) -> Result<Context, ServiceError> {
        const OP: &str = "service.update_context";
        let mut context = self.get_context(id).await.map_err(|e| retag(OP, e))?;
        context
            .apply(update)
            .map_err(|e| ServiceError::invalid(OP, e))?;
        self.repo
            .update_context(&context)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?;
        Ok(context)
    }

    pub async fn delete_context(&self, id: &str) -> Result<(), ServiceError> {
        const OP: &str = "service.delete_context";
        let id = parse_id(OP, id)?;
        match self.repo.delete_context(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ServiceError::not_found(OP)),
            Err(e) => Err(ServiceError::internal(OP, e)),
        }
    }

    // --- Tasks ---

    pub async fn create_task(&self, user_id: Uuid, new: NewTask) -> Result<Task, ServiceError> {
        const OP: &str = "service.create_task";

        let task = Task::new(
            user_id,
            new.context_id,
            &new.title,
            &new.description,
            new.due_at,
        )
        .map_err(|e| ServiceError::invalid(OP, e))?;

        self.repo
            .create_task(&task)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?;
        Ok(task)
    }

    pub async fn get_task(&self, id: &str) -> Result<Task, ServiceError> {
        const OP: &str = "service.get_task";
        let id = parse_id(OP, id)?;
        self.repo
            .get_task(id)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?
            .ok_or_else(|| ServiceError::not_found(OP))
    }

    pub async fn tasks_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, ServiceError> {
        const OP: &str = "service.tasks_by_user";
        self.repo
            .get_tasks_by_user(user_id)
            .await
            .map_err(|e| ServiceError::internal(OP, e))
    }

    pub async fn tasks_by_context(&self, context_id: &str) -> Result<Vec<Task>, ServiceError> {
        const OP: &str = "service.tasks_by_context";
        let id = parse_id(OP, context_id)?;
        self.repo
            .get_tasks_by_context(id)
            .await
            .map_err(|e| ServiceError::internal(OP, e))
    }

    /// Tasks due on the current local calendar day.
    pub async fn tasks_due_today(&self, user_id: Uuid) -> Result<Vec<Task>, ServiceError> {
        self.tasks_due_on(user_id, Local::now().date_naive()).await
    }

    /// Tasks due on a local calendar day, earliest first.
    pub async fn tasks_due_on(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Task>, ServiceError> {
        const OP: &str = "service.tasks_due_on";
        let (start, end) = local_day_bounds(date);
        self.repo
            .get_tasks_due_between(user_id, start, end)
            .await
            .map_err(|e| ServiceError::internal(OP, e))
    }

    pub async fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Task, ServiceError> {
        const OP: &str = "service.update_task";
        let mut task = self.get_task(id).await.map_err(|e| retag(OP, e))?;
        task.apply(update).map_err(|e| ServiceError::invalid(OP, e))?;
        self.repo
            .update_task(&task)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?;
        Ok(task)
    }

    pub async fn update_task_status(
        &self,
        id: &str,
        status: TaskStatus,
    ) -> Result<Task, ServiceError> {
        const OP: &str = "service.update_task_status";
        let mut task = self.get_task(id).await.map_err(|e| retag(OP, e))?;
        task.change_status(status);
        self.repo
            .update_task(&task)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?;
        Ok(task)
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ServiceError> {
        const OP: &str = "service.delete_task";
        let id = parse_id(OP, id)?;
        match self.repo.delete_task(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ServiceError::not_found(OP)),
            Err(e) => Err(ServiceError::internal(OP, e)),
        }
    }

    // --- Search ---

    /// Case-insensitive substring search over titles and descriptions.
    /// A blank query matches nothing.
    pub async fn search(&self, user_id: Uuid, query: &str) -> Result<SearchResults, ServiceError> {
        const OP: &str = "service.search";
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }

        let tasks = self
            .repo
            .search_tasks(user_id, query)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?;
        let contexts = self
            .repo
            .search_contexts(user_id, query)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?;
        Ok(SearchResults { tasks, contexts })
    }
}

/// Re-tag an inner failure with the outer operation, keeping its kind.
fn retag(op: &'static str, inner: ServiceError) -> ServiceError {
    ServiceError::new(inner.kind, op).with_cause(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::Timelike;

    #[test]
    fn test_local_day_bounds_span_one_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let (start, end) = local_day_bounds(date);
        assert!(start < end);
        let local_start = start.with_timezone(&Local);
        assert_eq!(local_start.date_naive(), date);
        assert_eq!(local_start.hour(), 0);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("op", "not-a-uuid").unwrap_err();
        assert!(err.is(ErrorKind::InvalidData));
        assert!(parse_id("op", &Uuid::new_v4().to_string()).is_ok());
    }

    #[test]
    fn test_retag_preserves_kind() {
        let inner = ServiceError::not_found("service.get_task");
        let outer = retag("service.update_task", inner);
        assert!(outer.is(ErrorKind::NotFound));
        assert_eq!(outer.op, "service.update_task");
    }
}
