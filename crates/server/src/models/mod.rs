//! Domain models.
//!
//! These types represent validated domain objects separate from database row
//! types and from the wire payloads in `true_feedback_core`.

pub mod message;
pub mod session;
pub mod user;

pub use message::Message;
pub use session::CurrentUser;
pub use user::User;
