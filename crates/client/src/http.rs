//! `reqwest`-backed implementation of [`FeedbackApi`].

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use true_feedback_core::ApiResponse;
use true_feedback_core::payloads::{
    AcceptMessagesStatus, MessagesPayload, SuggestionsPayload, UpdatedUser,
};
use true_feedback_core::schemas::{SendMessageRequest, SignUpRequest, VerifyCodeRequest};
use true_feedback_core::sign_in::{SessionPayload, SignInRequest, SignInResult};

use crate::api::FeedbackApi;
use crate::error::ClientError;

/// HTTP client for a True Feedback server.
///
/// Keeps the session cookie between calls, so one `HttpApi` is one browser
/// session. Cheap to clone; clones share the cookie jar.
#[derive(Clone)]
pub struct HttpApi {
    inner: Arc<HttpApiInner>,
}

struct HttpApiInner {
    client: reqwest::Client,
    base: Url,
}

impl HttpApi {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)?;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(concat!("true-feedback-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpApiInner { client, base }),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.inner.base.join(path)?;
        Ok(self.inner.client.request(method, url))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(status, error = %e, "Undecodable response body");
            ClientError::Decode {
                status,
                message: e.to_string(),
            }
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path)?).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }
}

impl FeedbackApi for HttpApi {
    #[instrument(skip(self))]
    async fn check_username(&self, username: &str) -> Result<ApiResponse, ClientError> {
        let path = format!(
            "/api/check-username-unique?username={}",
            urlencoding::encode(username)
        );
        self.get(&path).await
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    async fn sign_up(&self, request: &SignUpRequest) -> Result<ApiResponse, ClientError> {
        self.post("/api/sign-up", request).await
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    async fn verify_code(&self, request: &VerifyCodeRequest) -> Result<ApiResponse, ClientError> {
        self.post("/api/verify-code", request).await
    }

    #[instrument(skip(self, request))]
    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResult, ClientError> {
        self.post("/api/auth/callback/credentials", request).await
    }

    async fn session(&self) -> Result<SessionPayload, ClientError> {
        self.get("/api/auth/session").await
    }

    async fn sign_out(&self) -> Result<ApiResponse, ClientError> {
        self.send(self.request(Method::POST, "/api/auth/sign-out")?)
            .await
    }

    async fn accept_messages_status(
        &self,
    ) -> Result<ApiResponse<AcceptMessagesStatus>, ClientError> {
        self.get("/api/accept-messages").await
    }

    async fn set_accept_messages(
        &self,
        accept: bool,
    ) -> Result<ApiResponse<UpdatedUser>, ClientError> {
        self.post(
            "/api/accept-messages",
            &serde_json::json!({ "acceptMessage": accept }),
        )
        .await
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    async fn send_message(&self, request: &SendMessageRequest) -> Result<ApiResponse, ClientError> {
        self.post("/api/send-message", request).await
    }

    async fn get_messages(&self) -> Result<ApiResponse<MessagesPayload>, ClientError> {
        self.get("/api/get-messages").await
    }

    async fn delete_message(&self, id: &str) -> Result<ApiResponse, ClientError> {
        let path = format!("/api/delete-message/{}", urlencoding::encode(id));
        self.send(self.request(Method::DELETE, &path)?).await
    }

    async fn suggest_messages(&self) -> Result<ApiResponse<SuggestionsPayload>, ClientError> {
        self.send(self.request(Method::POST, "/api/suggest-messages")?)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_against_base() {
        let api = HttpApi::new("http://localhost:3000/").unwrap();
        let request = api
            .request(Method::GET, "/api/auth/session")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:3000/api/auth/session");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpApi::new("not a url"),
            Err(ClientError::Url(_))
        ));
    }
}
