//! Credentials sign-in.

use true_feedback_core::sign_in::{CREDENTIALS_SIGNIN, DEFAULT_CALLBACK_URL, SignInRequest};

use crate::api::FeedbackApi;
use crate::notify::{FlowOutcome, Toast};

/// Sign-in form submission.
pub struct SignInFlow<'a, A> {
    api: &'a A,
}

impl<'a, A: FeedbackApi> SignInFlow<'a, A> {
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Submit the form without asking the server to redirect.
    ///
    /// `error` is checked first: bad credentials get a fixed message, any
    /// other error is shown verbatim. A `url` means success.
    pub async fn submit(&self, form: &SignInRequest) -> FlowOutcome {
        if let Err(errors) = form.validate() {
            return FlowOutcome::invalid(&errors);
        }

        let mut request = form.clone();
        request.redirect = false;

        let result = match self.api.sign_in(&request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in request failed");
                return FlowOutcome::toast(Toast::error("Error").with_description(e.to_string()));
            }
        };

        match (result.error, result.url) {
            (Some(error), _) if error == CREDENTIALS_SIGNIN => FlowOutcome::toast(
                Toast::error("Login Failed").with_description("Incorrect username or password"),
            ),
            (Some(error), _) => FlowOutcome::toast(Toast::error("Error").with_description(error)),
            (None, Some(_)) => FlowOutcome::navigate(
                Toast::success("Login Successful!")
                    .with_description("Redirecting to your dashboard..."),
                DEFAULT_CALLBACK_URL,
            ),
            (None, None) => FlowOutcome::default(),
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
    async fn test_wrong_password() {
        let api = FakeApi::default().with_account("nina", "hunter22", true);
        let outcome = SignInFlow::new(&api)
            .submit(&SignInRequest::new("nina", "wrong-password"))
            .await;

        assert_eq!(outcome.navigation, None);
        let toast = outcome.toast.unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.title, "Login Failed");
        assert_eq!(
            toast.description.as_deref(),
            Some("Incorrect username or password")
        );
    }

    #[tokio::test]
    async fn test_other_errors_are_shown_verbatim() {
        let api = FakeApi::default().with_account("nina", "hunter22", false);
        let outcome = SignInFlow::new(&api)
            .submit(&SignInRequest::new("nina", "hunter22"))
            .await;

        assert_eq!(outcome.navigation, None);
        assert_eq!(
            outcome.toast.unwrap().description.as_deref(),
            Some("Please verify your account before logging in")
        );
    }

    #[tokio::test]
    async fn test_success_goes_to_dashboard() {
        let api = FakeApi::default().with_account("nina", "hunter22", true);
        let outcome = SignInFlow::new(&api)
            .submit(&SignInRequest::new("nina", "hunter22"))
            .await;

        assert_eq!(
            outcome.navigation,
            Some(Navigation::Replace("/dashboard".to_string()))
        );
        let toast = outcome.toast.unwrap();
        assert_eq!(toast.title, "Login Successful!");
        assert_eq!(
            toast.description.as_deref(),
            Some("Redirecting to your dashboard...")
        );
    }

    #[tokio::test]
    async fn test_blank_fields_are_not_sent() {
        let api = FakeApi::default();
        let outcome = SignInFlow::new(&api)
            .submit(&SignInRequest::new("", ""))
            .await;
        assert_eq!(outcome.field_errors.len(), 2);
        assert_eq!(outcome.toast, None);
    }
}
