//! Account verification.

use true_feedback_core::schemas::VerifyCodeRequest;

use crate::api::FeedbackApi;
use crate::notify::{FlowOutcome, Toast};

const VERIFY_FALLBACK: &str = "An error occurred. Please try again.";

/// Verification form submission for one username.
pub struct VerifyFlow<'a, A> {
    api: &'a A,
    username: String,
}

impl<'a, A: FeedbackApi> VerifyFlow<'a, A> {
    /// `username` is the route parameter of the verification page.
    #[must_use]
    pub fn new(api: &'a A, username: impl Into<String>) -> Self {
        Self {
            api,
            username: username.into(),
        }
    }

    /// Submit `code`. On success the page moves to `/sign-in`.
    pub async fn submit(&self, code: &str) -> FlowOutcome {
        let request = VerifyCodeRequest {
            username: self.username.clone(),
            code: code.to_string(),
        };
        if let Err(errors) = request.validate() {
            return FlowOutcome::invalid(&errors);
        }

        match self.api.verify_code(&request).await {
            Ok(response) if response.success => FlowOutcome::navigate(
                Toast::success("Verification Successful!").with_description(response.message),
                "/sign-in",
            ),
            Ok(response) => FlowOutcome::toast(
                Toast::error("Verification Failed").with_description(response.message),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Verification request failed");
                FlowOutcome::toast(
                    Toast::error("Verification Failed").with_description(VERIFY_FALLBACK),
                )
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::flows::fake::FakeApi;
    use crate::notify::{Navigation, ToastKind};

    #[tokio::test]
    async fn test_correct_code() {
        let api = FakeApi::default().with_code("nina", "123456");
        let outcome = VerifyFlow::new(&api, "nina").submit("123456").await;

        assert_eq!(
            outcome.navigation,
            Some(Navigation::Replace("/sign-in".to_string()))
        );
        assert_eq!(
            outcome.toast.unwrap().description.as_deref(),
            Some("Account verified successfully")
        );
    }

    #[tokio::test]
    async fn test_wrong_code() {
        let api = FakeApi::default().with_code("nina", "123456");
        let outcome = VerifyFlow::new(&api, "nina").submit("654321").await;

        assert_eq!(outcome.navigation, None);
        let toast = outcome.toast.unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.description.as_deref(), Some("Incorrect verification code"));
    }

    #[tokio::test]
    async fn test_network_error_uses_fallback() {
        let api = FakeApi::default().offline();
        let outcome = VerifyFlow::new(&api, "nina").submit("123456").await;
        assert_eq!(
            outcome.toast.unwrap().description.as_deref(),
            Some(VERIFY_FALLBACK)
        );
    }

    #[tokio::test]
    async fn test_short_code_is_not_sent() {
        let api = FakeApi::default().with_code("nina", "123456");
        let outcome = VerifyFlow::new(&api, "nina").submit("123").await;
        assert_eq!(
            outcome.field_errors[0].message,
            "Verification code must be 6 digits"
        );
    }
}
