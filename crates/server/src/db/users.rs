//! User repository for database operations.
//!
//! Queries are built at runtime with `sqlx::query_as` so the crate compiles
//! without a live database.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use true_feedback_core::{Email, UserId, Username};

use super::RepositoryError;
use crate::models::User;
use crate::models::user::UserRow;

const USER_COLUMNS: &str = "id, username, email, password_hash, verify_code, \
     verify_code_expires_at, is_verified, is_accepting_messages, created_at, updated_at";

/// Everything needed to create or re-issue an unverified account.
#[derive(Debug)]
pub struct NewRegistration<'a> {
    pub username: &'a Username,
    pub email: &'a Email,
    pub password_hash: &'a str,
    pub verify_code: &'a str,
    pub verify_code_expires_at: DateTime<Utc>,
}

/// What a sign-up did to the `users` table.
#[derive(Debug)]
pub enum SignUpOutcome {
    /// A new unverified user was inserted.
    Created(User),
    /// An unverified user with this email got a new code, password and username.
    Reissued(User),
    /// The username belongs to a verified user or an unexpired registration.
    UsernameTaken,
    /// The email belongs to a verified user.
    EmailTaken,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        row.map(User::try_from).transpose()
    }

    /// Get a user by their username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1"))
                .bind(username)
                .fetch_optional(self.pool)
                .await?;
        row.map(User::try_from).transpose()
    }

    /// Get a user by username or email, as typed at sign-in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_by_identifier(&self, identifier: &str) -> Result<Option<User>, RepositoryError> {
        let identifier = identifier.trim();
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE email = LOWER($1) OR username = $1
             ORDER BY (email = LOWER($1)) DESC
             LIMIT 1"
        ))
        .bind(identifier)
        .fetch_optional(self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    /// Whether `username` is held at `now`: by a verified user, or by an
    /// unverified user whose code has not expired.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_username_taken(
        &self,
        username: &Username,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM users
                 WHERE username = $1
                   AND (is_verified OR verify_code_expires_at > $2)
             )",
        )
        .bind(username)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(taken)
    }

    /// Create an unverified user, or re-issue an existing unverified one.
    ///
    /// Runs in one transaction with the conflicting rows locked:
    /// 1. a verified user holding the username wins;
    /// 2. a verified user holding the email wins;
    /// 3. an unverified user holding the username under a different email
    ///    wins while its code is valid, and is deleted once it has expired;
    /// 4. an unverified user holding the email is re-issued in place;
    /// 5. otherwise a new user is inserted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn sign_up(
        &self,
        registration: &NewRegistration<'_>,
        now: DateTime<Utc>,
    ) -> Result<SignUpOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let by_username = lock_one(&mut tx, "username", registration.username.as_str()).await?;
        let by_email = lock_one(&mut tx, "email", registration.email.as_str()).await?;

        if by_username.as_ref().is_some_and(|u| u.is_verified) {
            return Ok(SignUpOutcome::UsernameTaken);
        }
        if by_email.as_ref().is_some_and(|u| u.is_verified) {
            return Ok(SignUpOutcome::EmailTaken);
        }

        if let Some(squatter) = by_username
            && by_email.as_ref().is_none_or(|u| u.id != squatter.id)
        {
            if squatter.holds_username(now) {
                return Ok(SignUpOutcome::UsernameTaken);
            }
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(squatter.id)
                .execute(&mut *tx)
                .await?;
            tracing::info!(
                user_id = %squatter.id,
                username = %squatter.username,
                "Released username held by expired registration"
            );
        }

        let outcome = match by_email {
            Some(existing) => {
                let row: UserRow = sqlx::query_as(&format!(
                    "UPDATE users
                     SET username = $2, password_hash = $3, verify_code = $4,
                         verify_code_expires_at = $5
                     WHERE id = $1
                     RETURNING {USER_COLUMNS}"
                ))
                .bind(existing.id)
                .bind(registration.username)
                .bind(registration.password_hash)
                .bind(registration.verify_code)
                .bind(registration.verify_code_expires_at)
                .fetch_one(&mut *tx)
                .await
                .map_err(RepositoryError::from_insert)?;
                SignUpOutcome::Reissued(User::try_from(row)?)
            }
            None => {
                let row: UserRow = sqlx::query_as(&format!(
                    "INSERT INTO users
                         (username, email, password_hash, verify_code, verify_code_expires_at)
                     VALUES ($1, $2, $3, $4, $5)
                     RETURNING {USER_COLUMNS}"
                ))
                .bind(registration.username)
                .bind(registration.email)
                .bind(registration.password_hash)
                .bind(registration.verify_code)
                .bind(registration.verify_code_expires_at)
                .fetch_one(&mut *tx)
                .await
                .map_err(RepositoryError::from_insert)?;
                SignUpOutcome::Created(User::try_from(row)?)
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Mark a user verified and consume their code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user no longer exists.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn mark_verified(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users
             SET is_verified = TRUE, verify_code = NULL, verify_code_expires_at = NULL
             WHERE id = $1",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Set the message-acceptance flag, returning the updated user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn set_accepting_messages(
        &self,
        id: UserId,
        accepting: bool,
    ) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET is_accepting_messages = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(accepting)
        .fetch_optional(self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    /// Delete a user and, through the foreign key, their messages.
    ///
    /// Returns `false` if no such user existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_username(&self, username: &Username) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Fetch and lock the user whose `column` equals `value`.
async fn lock_one(
    tx: &mut Transaction<'_, Postgres>,
    column: &'static str,
    value: &str,
) -> Result<Option<User>, RepositoryError> {
    let row: Option<UserRow> = sqlx::query_as(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE {column} = $1 FOR UPDATE"
    ))
    .bind(value)
    .fetch_optional(&mut **tx)
    .await?;
    row.map(User::try_from).transpose()
}
