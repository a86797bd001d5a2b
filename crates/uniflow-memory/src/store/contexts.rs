//! Context persistence.

use super::{decode_id, decode_opt_ts, decode_ts, encode_ts, matches_query, Store};
use uniflow_core::{error::UniflowError, models::Context};
use uuid::Uuid;

const CONTEXT_COLUMNS: &str = "id, user_id, type, title, description, subject_id, color, \
                               deadline_at, created_at, updated_at";

type ContextRow = (
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    Option<String>,
    String,
    String,
);

fn context_from_row(row: ContextRow) -> Result<Context, UniflowError> {
    let (id, user_id, kind, title, description, subject_id, color, deadline_at, created, updated) =
        row;
    Ok(Context {
        id: decode_id(&id)?,
        user_id: decode_id(&user_id)?,
        kind: kind
            .parse()
            .map_err(|e| UniflowError::Storage(format!("context {id}: {e}")))?,
        title,
        description,
        subject_id,
        color,
        deadline_at: decode_opt_ts(deadline_at)?,
        created_at: decode_ts(&created)?,
        updated_at: decode_ts(&updated)?,
    })
}

impl Store {
    pub async fn insert_context(&self, context: &Context) -> Result<(), UniflowError> {
        sqlx::query(&format!(
            "INSERT INTO contexts ({CONTEXT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(context.id.to_string())
        .bind(context.user_id.to_string())
        .bind(context.kind.as_str())
        .bind(&context.title)
        .bind(&context.description)
        .bind(&context.subject_id)
        .bind(&context.color)
        .bind(context.deadline_at.as_ref().map(encode_ts))
        .bind(encode_ts(&context.created_at))
        .bind(encode_ts(&context.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("create context failed: {e}")))?;
        Ok(())
    }

    pub async fn find_context(&self, id: Uuid) -> Result<Option<Context>, UniflowError> {
        let row: Option<ContextRow> =
            sqlx::query_as(&format!("SELECT {CONTEXT_COLUMNS} FROM contexts WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UniflowError::Storage(format!("get context failed: {e}")))?;

        row.map(context_from_row).transpose()
    }

    /// All contexts of a user, newest first.
    pub async fn list_contexts(&self, user_id: Uuid) -> Result<Vec<Context>, UniflowError> {
        let rows: Vec<ContextRow> = sqlx::query_as(&format!(
            "SELECT {CONTEXT_COLUMNS} FROM contexts WHERE user_id = ? \
             ORDER BY created_at DESC"
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("list contexts failed: {e}")))?;

        rows.into_iter().map(context_from_row).collect()
    }

    /// Contexts whose title or description contains `query`, ignoring case.
    pub async fn find_contexts_matching(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<Context>, UniflowError> {
        let contexts = self.list_contexts(user_id).await?;
        Ok(contexts
            .into_iter()
            .filter(|c| matches_query(&[&c.title, &c.description], query))
            .collect())
    }

    pub async fn save_context(&self, context: &Context) -> Result<(), UniflowError> {
        sqlx::query(
            "UPDATE contexts SET type = ?, title = ?, description = ?, subject_id = ?, \
             color = ?, deadline_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(context.kind.as_str())
        .bind(&context.title)
        .bind(&context.description)
        .bind(&context.subject_id)
        .bind(&context.color)
        .bind(context.deadline_at.as_ref().map(encode_ts))
        .bind(encode_ts(&context.updated_at))
        .bind(context.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("update context failed: {e}")))?;
        Ok(())
    }

    /// Delete a context. Its tasks are kept with `context_id` cleared.
    pub async fn remove_context(&self, id: Uuid) -> Result<bool, UniflowError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UniflowError::Storage(format!("begin failed: {e}")))?;

        sqlx::query("UPDATE tasks SET context_id = NULL WHERE context_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| UniflowError::Storage(format!("detach tasks failed: {e}")))?;

        let result = sqlx::query("DELETE FROM contexts WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| UniflowError::Storage(format!("delete context failed: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| UniflowError::Storage(format!("commit failed: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
