//! User lookup and creation.

use super::{decode_id, decode_ts, encode_ts, Store};
use uniflow_core::{error::UniflowError, models::User};

type UserRow = (String, String, String, String);

fn user_from_row(row: UserRow) -> Result<User, UniflowError> {
    let (id, external_id, created_at, updated_at) = row;
    Ok(User {
        id: decode_id(&id)?,
        external_id,
        created_at: decode_ts(&created_at)?,
        updated_at: decode_ts(&updated_at)?,
    })
}

impl Store {
    /// Insert a user, ignoring a duplicate external id.
    pub async fn insert_user(&self, user: &User) -> Result<bool, UniflowError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (id, external_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.external_id)
        .bind(encode_ts(&user.created_at))
        .bind(encode_ts(&user.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("create user failed: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_user_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, UniflowError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, external_id, created_at, updated_at FROM users WHERE external_id = ?",
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UniflowError::Storage(format!("get user failed: {e}")))?;

        row.map(user_from_row).transpose()
    }

    /// Total number of users (for `uniflow status`).
    pub async fn count_users(&self) -> Result<i64, UniflowError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UniflowError::Storage(format!("count users failed: {e}")))?;
        Ok(count)
    }
}
