//! Google Gemini API integration.
//!
//! One-shot text generation through `generateContent`, used for anonymous
//! message suggestions. No streaming, no chat history.

mod client;
mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
