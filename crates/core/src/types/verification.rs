//! Email verification codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`VerificationCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationCodeError {
    /// Not exactly six ASCII digits.
    #[error("Verification code must be 6 digits")]
    Malformed,
}

/// A six-digit one-time code sent to a new account's email address.
///
/// Leading zeros are significant, so the code is kept as text.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Number of digits in a code.
    pub const LENGTH: usize = 6;

    /// Parse a code typed by the user. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationCodeError::Malformed`] unless the input is six
    /// ASCII digits.
    pub fn parse(s: &str) -> Result<Self, VerificationCodeError> {
        let s = s.trim();
        if s.len() != Self::LENGTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VerificationCodeError::Malformed);
        }
        Ok(Self(s.to_owned()))
    }

    /// Build a code from a number in `0..1_000_000`, zero-padded.
    #[must_use]
    pub fn from_number(n: u32) -> Self {
        Self(format!("{:06}", n % 1_000_000))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a stored code without short-circuiting on the first
    /// differing digit.
    #[must_use]
    pub fn matches(&self, stored: &str) -> bool {
        let a = self.0.as_bytes();
        let b = stored.as_bytes();
        a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

// Codes are secrets until consumed.
impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

impl TryFrom<String> for VerificationCode {
    type Error = VerificationCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VerificationCode> for String {
    fn from(code: VerificationCode) -> Self {
        code.0
    }
}
