//! Page flows: sign-up, sign-in and verification.
//!
//! Each flow validates with the shared schemas, makes a single API call, and
//! turns the answer into a [`FlowOutcome`](crate::FlowOutcome). There are no
//! retries.

mod sign_in;
mod sign_up;
mod verify;

pub use sign_in::SignInFlow;
pub use sign_up::{SignUpFlow, USERNAME_DEBOUNCE, UsernameChecker, UsernameStatus};
pub use verify::VerifyFlow;

#[cfg(test)]
pub(crate) mod fake;
