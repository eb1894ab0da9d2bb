//! True Feedback client.
//!
//! A typed client for the JSON API ([`HttpApi`]) behind the [`FeedbackApi`]
//! trait, and the sign-up, sign-in and verification flows written against
//! that trait. Flows never touch a UI; they return what the page should show
//! ([`Toast`]) and where it should go ([`Navigation`]).
//!
//! # Example
//!
//! ```rust,ignore
//! let api = HttpApi::new("http://localhost:3000")?;
//! let outcome = SignInFlow::new(&api)
//!     .submit(&SignInRequest::new("nina", "hunter22"))
//!     .await;
//! if let Some(Navigation::Replace(path)) = outcome.navigation {
//!     println!("go to {path}");
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod error;
pub mod flows;
pub mod http;
pub mod notify;

pub use api::FeedbackApi;
pub use error::ClientError;
pub use flows::{SignInFlow, SignUpFlow, UsernameChecker, UsernameStatus, VerifyFlow};
pub use http::HttpApi;
pub use notify::{FlowOutcome, Navigation, Toast, ToastKind};
