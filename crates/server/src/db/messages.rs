//! Message repository for database operations.

use sqlx::PgPool;

use true_feedback_core::{MessageId, UserId};

use super::RepositoryError;
use crate::models::Message;

/// Repository for anonymous message operations.
pub struct MessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a message to a user's inbox.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user was deleted meanwhile.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user_id: UserId, content: &str) -> Result<Message, RepositoryError> {
        sqlx::query_as(
            "INSERT INTO messages (user_id, content)
             VALUES ($1, $2)
             RETURNING id, user_id, content, created_at",
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })
    }

    /// All messages for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError> {
        let messages = sqlx::query_as(
            "SELECT id, user_id, content, created_at
             FROM messages
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(messages)
    }

    /// Number of messages a user has.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_user(&self, user_id: UserId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Delete a message if, and only if, `owner` owns it.
    ///
    /// Returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_owned(
        &self,
        owner: UserId,
        id: MessageId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
