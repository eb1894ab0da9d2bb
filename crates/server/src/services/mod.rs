//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration, verification and credentials sign-in
//! - `email` - Verification code delivery
//! - `suggestions` - AI-generated conversation starters

pub mod auth;
pub mod email;
pub mod suggestions;
