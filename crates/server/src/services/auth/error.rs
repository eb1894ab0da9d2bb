//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::email::EmailError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identifier or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password matched, but the account is not verified yet.
    #[error("account not verified")]
    NotVerified,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// Username held by another account.
    #[error("username already taken")]
    UsernameTaken,

    /// Email belongs to a verified account.
    #[error("email already registered")]
    EmailTaken,

    /// Verification attempted on a verified account.
    #[error("account already verified")]
    AlreadyVerified,

    /// The code matched but its window has passed.
    #[error("verification code expired")]
    CodeExpired,

    /// The code did not match.
    #[error("incorrect verification code")]
    IncorrectCode,

    /// The verification email could not be sent.
    #[error("verification email failed: {0}")]
    Email(#[from] EmailError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
