//! Username type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::expect_used)] // Literal pattern, checked by the tests below
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern compiles"));

/// Errors that can occur when parsing a [`Username`].
///
/// The display strings are the messages shown next to the form field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Fewer than [`Username::MIN_LENGTH`] characters.
    #[error("Username must be at least 2 characters")]
    TooShort,
    /// More than [`Username::MAX_LENGTH`] characters.
    #[error("Username must be no more than 20 characters")]
    TooLong,
    /// Characters outside `[a-zA-Z0-9_]`.
    #[error("Username must not contain special characters")]
    InvalidCharacters,
}

/// A public username, also the handle anonymous senders address.
///
/// Usernames are case-sensitive and are never trimmed: a username with
/// surrounding spaces is rejected rather than silently changed.
///
/// ```
/// use true_feedback_core::Username;
///
/// assert!(Username::parse("night_owl42").is_ok());
/// assert!(Username::parse("a").is_err());
/// assert!(Username::parse("no spaces").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Minimum username length in characters.
    pub const MIN_LENGTH: usize = 2;
    /// Maximum username length in characters.
    pub const MAX_LENGTH: usize = 20;

    /// Parse a `Username`.
    ///
    /// # Errors
    ///
    /// Returns a [`UsernameError`] for the first violated constraint, checking
    /// length before the character set.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let len = s.chars().count();
        if len < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort);
        }
        if len > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong);
        }
        if !USERNAME_PATTERN.is_match(s) {
            return Err(UsernameError::InvalidCharacters);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Username {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Username {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        <String as sqlx::Decode<sqlx::Postgres>>::decode(value).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Username {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
