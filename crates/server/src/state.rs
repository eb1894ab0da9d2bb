//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::FeedbackConfig;
use crate::gemini::{GeminiClient, GeminiError};
use crate::services::email::{EmailError, EmailService};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("gemini client: {0}")]
    Gemini(#[from] GeminiError),
    #[error("email service: {0}")]
    Email(#[from] EmailError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: FeedbackConfig,
    pool: PgPool,
    gemini: GeminiClient,
    email: EmailService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gemini client or the SMTP transport cannot be
    /// built from the configuration.
    pub fn new(config: FeedbackConfig, pool: PgPool) -> Result<Self, StateError> {
        let gemini = GeminiClient::new(&config.gemini)?;
        let email = EmailService::new(config.email.as_ref(), &config.base_url)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                gemini,
                email,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &FeedbackConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Gemini API client.
    #[must_use]
    pub fn gemini(&self) -> &GeminiClient {
        &self.inner.gemini
    }

    /// Get a reference to the email service.
    #[must_use]
    pub fn email(&self) -> &EmailService {
        &self.inner.email
    }
}
