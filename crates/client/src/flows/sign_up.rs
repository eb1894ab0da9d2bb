//! Sign-up form and the live username availability check.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use true_feedback_core::schemas::SignUpRequest;

use crate::api::FeedbackApi;
use crate::notify::{FlowOutcome, Toast};

/// Quiet period after the last keystroke before the availability check runs.
pub const USERNAME_DEBOUNCE: Duration = Duration::from_millis(500);

const SIGN_UP_FALLBACK: &str = "There was a problem with your sign-up. Please try again.";
const CHECK_FALLBACK: &str = "Error checking Username";
const UNIQUE: &str = "Username is unique";

/// What the status line under the username field shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameStatus {
    /// Field is empty.
    Idle,
    /// Debounce elapsed and the request is in flight: show the spinner.
    Checking,
    /// Server said the name is free.
    Available(String),
    /// Server rejected the name: taken or invalid.
    Unavailable(String),
}

/// Debounced username availability check.
///
/// Every call to [`on_input`](Self::on_input) takes a new token from a
/// monotonically increasing sequence. A call whose token is no longer the
/// latest when its debounce ends, or when its response arrives, stops
/// reporting, so a slow answer for an old value never overwrites a newer one.
pub struct UsernameChecker<'a, A> {
    api: &'a A,
    sequence: AtomicU64,
    debounce: Duration,
}

impl<'a, A: FeedbackApi> UsernameChecker<'a, A> {
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self {
            api,
            sequence: AtomicU64::new(0),
            debounce: USERNAME_DEBOUNCE,
        }
    }

    /// Handle the field changing to `username`.
    ///
    /// `show` receives each status to display in order: [`UsernameStatus::Idle`]
    /// for an empty field, otherwise [`UsernameStatus::Checking`] once the
    /// debounce elapses and then the server's answer. Nothing is reported
    /// after a later input supersedes this one.
    pub async fn on_input(&self, username: &str, mut show: impl FnMut(UsernameStatus)) {
        let token = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if username.is_empty() {
            show(UsernameStatus::Idle);
            return;
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_latest(token) {
            return;
        }
        show(UsernameStatus::Checking);

        let status = match self.api.check_username(username).await {
            Ok(response) if response.success && response.message == UNIQUE => {
                UsernameStatus::Available(response.message)
            }
            Ok(response) => UsernameStatus::Unavailable(response.message),
            Err(e) => {
                tracing::warn!(error = %e, "Username check failed");
                UsernameStatus::Unavailable(CHECK_FALLBACK.to_string())
            }
        };

        if !self.is_latest(token) {
            tracing::debug!(username, "Discarding stale username check");
            return;
        }
        show(status);
    }

    fn is_latest(&self, token: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == token
    }
}

/// Sign-up form submission.
pub struct SignUpFlow<'a, A> {
    api: &'a A,
}

impl<'a, A: FeedbackApi> SignUpFlow<'a, A> {
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Submit the form. On success the page moves to `/verify/{username}`.
    pub async fn submit(&self, form: &SignUpRequest) -> FlowOutcome {
        if let Err(errors) = form.validate() {
            return FlowOutcome::invalid(&errors);
        }

        match self.api.sign_up(form).await {
            Ok(response) if response.success => FlowOutcome::navigate(
                Toast::success(response.message),
                format!("/verify/{}", urlencoding::encode(&form.username)),
            ),
            Ok(response) => FlowOutcome::toast(Toast::error(response.message)),
            Err(e) => {
                tracing::warn!(error = %e, "Sign-up request failed");
                FlowOutcome::toast(Toast::error(SIGN_UP_FALLBACK))
            }
        }
    }
}
