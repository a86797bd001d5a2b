//! Task persistence.

use super::{decode_id, decode_opt_ts, decode_ts, encode_ts, matches_query, Store};
use chrono::{DateTime, Utc};
use uniflow_core::{error::UniflowError, models::Task};
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, user_id, context_id, title, description, status, due_at, \
                            completed_at, created_at, updated_at";

type TaskRow = (
    String,
    String,
    Option<String>,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    String,
);

fn task_from_row(row: TaskRow) -> Result<Task, UniflowError> {
    let (id, user_id, context_id, title, description, status, due_at, completed_at, created, updated) =
        row;
    Ok(Task {
        id: decode_id(&id)?,
        user_id: decode_id(&user_id)?,
        context_id: context_id.as_deref().map(decode_id).transpose()?,
        title,
        description,
        status: status
            .parse()
            .map_err(|e| UniflowError::Storage(format!("task {id}: {e}")))?,
        due_at: decode_opt_ts(due_at)?,
        completed_at: decode_opt_ts(completed_at)?,
        created_at: decode_ts(&created)?,
        updated_at: decode_ts(&updated)?,
    })
}

impl Store {
    pub async fn insert_task(&self, task: &Task) -> Result<(), UniflowError> {
        sqlx::query(&format!(
            "INSERT INTO tasks ({TASK_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(task.id.to_string())
        .bind(task.user_id.to_string())
        .bind(task.context_id.map(|id| id.to_string()))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.due_at.as_ref().map(encode_ts))
        .bind(task.completed_at.as_ref().map(encode_ts))
        .bind(encode_ts(&task.created_at))
        .bind(encode_ts(&task.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("create task failed: {e}")))?;
        Ok(())
    }

    pub async fn find_task(&self, id: Uuid) -> Result<Option<Task>, UniflowError> {
        let row: Option<TaskRow> =
            sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UniflowError::Storage(format!("get task failed: {e}")))?;

        row.map(task_from_row).transpose()
    }

    /// All tasks of a user, newest first.
    pub async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, UniflowError> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ? ORDER BY created_at DESC"
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("list tasks failed: {e}")))?;

        rows.into_iter().map(task_from_row).collect()
    }

    pub async fn list_tasks_in_context(&self, context_id: Uuid) -> Result<Vec<Task>, UniflowError> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE context_id = ? ORDER BY created_at DESC"
        ))
        .bind(context_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("list context tasks failed: {e}")))?;

        rows.into_iter().map(task_from_row).collect()
    }

    /// Tasks due in `[start, end)`, earliest first.
    pub async fn list_tasks_due_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Task>, UniflowError> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE user_id = ? AND due_at IS NOT NULL AND due_at >= ? AND due_at < ? \
             ORDER BY due_at ASC"
        ))
        .bind(user_id.to_string())
        .bind(encode_ts(&start))
        .bind(encode_ts(&end))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("list due tasks failed: {e}")))?;

        rows.into_iter().map(task_from_row).collect()
    }

    /// Tasks whose title or description contains `query`, ignoring case.
    pub async fn find_tasks_matching(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<Task>, UniflowError> {
        let tasks = self.list_tasks(user_id).await?;
        Ok(tasks
            .into_iter()
            .filter(|t| matches_query(&[&t.title, &t.description], query))
            .collect())
    }

    pub async fn save_task(&self, task: &Task) -> Result<(), UniflowError> {
        sqlx::query(
            "UPDATE tasks SET context_id = ?, title = ?, description = ?, status = ?, \
             due_at = ?, completed_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(task.context_id.map(|id| id.to_string()))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.due_at.as_ref().map(encode_ts))
        .bind(task.completed_at.as_ref().map(encode_ts))
        .bind(encode_ts(&task.updated_at))
        .bind(task.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("update task failed: {e}")))?;
        Ok(())
    }

    pub async fn remove_task(&self, id: Uuid) -> Result<bool, UniflowError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| UniflowError::Storage(format!("delete task failed: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of tasks (for `uniflow status`).
    pub async fn count_tasks(&self) -> Result<i64, UniflowError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UniflowError::Storage(format!("count tasks failed: {e}")))?;
        Ok(count)
    }
}
