//! Authentication service.
//!
//! Registration with emailed verification codes, code verification, and
//! credentials sign-in by username or email.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use sqlx::PgPool;

use true_feedback_core::schemas::{SignUp, VerifyCode};
use true_feedback_core::Username;

use crate::db::RepositoryError;
use crate::db::users::{NewRegistration, SignUpOutcome, UserRepository};
use crate::models::User;
use crate::models::user::CodeCheck;
use crate::services::email::{EmailService, generate_verification_code};

/// How long a verification code is accepted.
pub const VERIFICATION_CODE_TTL: Duration = Duration::hours(1);

/// Hash compared against when the identifier is unknown, so both failure
/// paths cost one Argon2 verification.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$7hM5X2yM0vXG0oQe8w0e6tCwW3cHn0m3j6nJt2i0pXQ";

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    email: &'a EmailService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, email: &'a EmailService) -> Self {
        Self {
            users: UserRepository::new(pool),
            email,
        }
    }

    /// Register an unverified account and email it a verification code.
    ///
    /// Re-registering an unverified email replaces its username, password
    /// and code.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UsernameTaken` or `AuthError::EmailTaken` on
    /// conflicts, and `AuthError::Email` if the code could not be sent.
    pub async fn sign_up(&self, request: &SignUp) -> Result<User, AuthError> {
        let password_hash = hash_password(&request.password)?;
        let code = generate_verification_code();
        let now = Utc::now();

        let registration = NewRegistration {
            username: &request.username,
            email: &request.email,
            password_hash: &password_hash,
            verify_code: code.as_str(),
            verify_code_expires_at: now + VERIFICATION_CODE_TTL,
        };

        let user = match self
            .users
            .sign_up(&registration, now)
            .await
            .map_err(conflict_to_auth_error)?
        {
            SignUpOutcome::Created(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "User registered");
                user
            }
            SignUpOutcome::Reissued(user) => {
                tracing::info!(
                    user_id = %user.id,
                    username = %user.username,
                    "Verification re-issued for unverified user"
                );
                user
            }
            SignUpOutcome::UsernameTaken => return Err(AuthError::UsernameTaken),
            SignUpOutcome::EmailTaken => return Err(AuthError::EmailTaken),
        };

        self.email
            .send_verification_code(&user.email, &user.username, &code)
            .await?;

        Ok(user)
    }

    /// Whether `username` is free to register right now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn is_username_available(&self, username: &Username) -> Result<bool, AuthError> {
        Ok(!self.users.is_username_taken(username, Utc::now()).await?)
    }

    /// Consume a verification code.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound`, `AuthError::AlreadyVerified`,
    /// `AuthError::CodeExpired` or `AuthError::IncorrectCode`.
    pub async fn verify_code(&self, request: &VerifyCode) -> Result<User, AuthError> {
        let user = self
            .users
            .get_by_username(&request.username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_verified {
            return Err(AuthError::AlreadyVerified);
        }

        match user.check_code(&request.code, Utc::now()) {
            CodeCheck::Valid => {
                self.users.mark_verified(user.id).await.map_err(|e| match e {
                    RepositoryError::NotFound => AuthError::UserNotFound,
                    other => AuthError::Repository(other),
                })?;
                tracing::info!(user_id = %user.id, "Account verified");
                Ok(User {
                    is_verified: true,
                    verify_code: None,
                    verify_code_expires_at: None,
                    ..user
                })
            }
            CodeCheck::Expired => Err(AuthError::CodeExpired),
            CodeCheck::Incorrect => Err(AuthError::IncorrectCode),
        }
    }

    /// Check credentials for sign-in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown identifier or a
    /// wrong password, and `AuthError::NotVerified` when the password is right
    /// but the account is unverified.
    pub async fn sign_in(&self, identifier: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = self.users.get_by_identifier(identifier).await? else {
            let _ = verify_password(password, DUMMY_PASSWORD_HASH);
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &user.password_hash)?;

        if !user.is_verified {
            return Err(AuthError::NotVerified);
        }

        Ok(user)
    }
}

/// A unique violation raced past the locked checks; report it by constraint.
fn conflict_to_auth_error(e: RepositoryError) -> AuthError {
    match e {
        RepositoryError::Conflict(constraint) if constraint == "users_email_key" => {
            AuthError::EmailTaken
        }
        RepositoryError::Conflict(_) => AuthError::UsernameTaken,
        other => AuthError::Repository(other),
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_dummy_hash_parses_and_rejects() {
        assert!(PasswordHash::new(DUMMY_PASSWORD_HASH).is_ok());
        assert!(matches!(
            verify_password("anything", DUMMY_PASSWORD_HASH),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_conflict_mapping() {
        assert!(matches!(
            conflict_to_auth_error(RepositoryError::Conflict("users_email_key".to_string())),
            AuthError::EmailTaken
        ));
        assert!(matches!(
            conflict_to_auth_error(RepositoryError::Conflict("users_username_key".to_string())),
            AuthError::UsernameTaken
        ));
        assert!(matches!(
            conflict_to_auth_error(RepositoryError::NotFound),
            AuthError::Repository(RepositoryError::NotFound)
        ));
    }
}
