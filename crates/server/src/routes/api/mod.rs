//! JSON API handlers.
//!
//! Every handler answers with the `ApiResponse` envelope; errors go through
//! `AppError`.

pub mod accept_messages;
pub mod check_username;
pub mod messages;
pub mod sign_up;
pub mod suggest_messages;
pub mod verify_code;
