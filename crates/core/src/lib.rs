//! True Feedback Core - Shared types library.
//!
//! This crate provides the types shared by every True Feedback component:
//! - `server` - HTTP API, pages and persistence
//! - `client` - Typed API client and the sign-up/sign-in/verify flows
//! - `cli` - Migrations and administrative tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. The same validators run on both sides of the wire.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, usernames and verification codes
//! - [`schemas`] - Form payloads and their field validators
//! - [`envelope`] - The `{success, message, ...}` response envelope
//! - [`payloads`] - Response payloads carried inside the envelope
//! - [`sign_in`] - Credentials sign-in request/result shapes
//! - [`suggestions`] - Parsing of AI-suggested questions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod envelope;
pub mod payloads;
pub mod schemas;
pub mod sign_in;
pub mod suggestions;
pub mod types;

pub use envelope::{ApiResponse, NoPayload};
pub use types::*;
