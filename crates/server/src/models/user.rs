//! User domain types.

use chrono::{DateTime, Utc};

use true_feedback_core::payloads::UserProfile;
use true_feedback_core::{Email, UserId, Username, VerificationCode};

use crate::db::RepositoryError;

/// An account (domain type).
#[derive(Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Public handle; the address for anonymous messages.
    pub username: Username,
    /// Normalized email address.
    pub email: Email,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Outstanding verification code, cleared once consumed.
    pub verify_code: Option<String>,
    /// When the outstanding code stops being accepted.
    pub verify_code_expires_at: Option<DateTime<Utc>>,
    /// Whether the email has been verified.
    pub is_verified: bool,
    /// Whether anonymous messages are delivered.
    pub is_accepting_messages: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("is_verified", &self.is_verified)
            .field("is_accepting_messages", &self.is_accepting_messages)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Result of checking a submitted verification code against a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    /// Code matches and has not expired.
    Valid,
    /// Code matches but its window has passed.
    Expired,
    /// Code does not match, or no code is outstanding.
    Incorrect,
}

impl User {
    /// Whether an unverified account still holds its username at `now`.
    #[must_use]
    pub fn holds_username(&self, now: DateTime<Utc>) -> bool {
        self.is_verified || self.verify_code_expires_at.is_some_and(|expiry| expiry > now)
    }

    /// Check `code` against the outstanding verification code.
    ///
    /// An expired code is only reported as such when it matches, so a guess
    /// never learns whether the window has passed.
    #[must_use]
    pub fn check_code(&self, code: &VerificationCode, now: DateTime<Utc>) -> CodeCheck {
        let Some(stored) = self.verify_code.as_deref() else {
            return CodeCheck::Incorrect;
        };
        if !code.matches(stored) {
            return CodeCheck::Incorrect;
        }
        match self.verify_code_expires_at {
            Some(expiry) if expiry > now => CodeCheck::Valid,
            _ => CodeCheck::Expired,
        }
    }

    /// Public view of this account.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            is_verified: self.is_verified,
            is_accepting_messages: self.is_accepting_messages,
            created_at: self.created_at,
        }
    }
}

/// Row shape of the `users` table.
#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verify_code: Option<String>,
    pub verify_code_expires_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            username,
            email,
            password_hash: row.password_hash,
            verify_code: row.verify_code,
            verify_code_expires_at: row.verify_code_expires_at,
            is_verified: row.is_verified,
            is_accepting_messages: row.is_accepting_messages,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use chrono::Duration;

    use super::*;

    pub(crate) fn user(username: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(7),
            username: Username::parse(username).unwrap(),
            email: Email::parse(&format!("{username}@example.org")).unwrap(),
            password_hash: String::new(),
            verify_code: Some("123456".to_string()),
            verify_code_expires_at: Some(now + Duration::hours(1)),
            is_verified: false,
            is_accepting_messages: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_check_code() {
        let now = Utc::now();
        let u = user("frank");
        let right = VerificationCode::parse("123456").unwrap();
        let wrong = VerificationCode::parse("654321").unwrap();

        assert_eq!(u.check_code(&right, now), CodeCheck::Valid);
        assert_eq!(u.check_code(&wrong, now), CodeCheck::Incorrect);
        assert_eq!(
            u.check_code(&right, now + Duration::hours(2)),
            CodeCheck::Expired
        );
        assert_eq!(
            u.check_code(&wrong, now + Duration::hours(2)),
            CodeCheck::Incorrect
        );
    }

    #[test]
    fn test_consumed_code_never_matches() {
        let mut u = user("grace");
        u.verify_code = None;
        let code = VerificationCode::parse("123456").unwrap();
        assert_eq!(u.check_code(&code, Utc::now()), CodeCheck::Incorrect);
    }

    #[test]
    fn test_holds_username() {
        let now = Utc::now();
        let mut u = user("heidi");
        assert!(u.holds_username(now));
        assert!(!u.holds_username(now + Duration::hours(2)));
        u.is_verified = true;
        assert!(u.holds_username(now + Duration::hours(2)));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let mut u = user("ivan");
        u.password_hash = "$argon2id$v=19$secret".to_string();
        let debug = format!("{u:?}");
        assert!(!debug.contains("argon2id"));
        assert!(!debug.contains("123456"));
    }
}
