//! Gemini API client.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GeminiError};
use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Gemini API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Config` if the API key is not a valid header
    /// value or the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| GeminiError::Config("API key is not a valid header value".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-goog-api-key", api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GeminiError::Config(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
                endpoint: format!(
                    "{}/v1beta/models/{}:generateContent",
                    config.api_base, config.model
                ),
            }),
        })
    }

    /// Model this client talks to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Generate text for a single prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API reports an error, or
    /// the response carries no text.
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let body = Self::handle_response(response).await?;
        body.text()
            .ok_or_else(|| GeminiError::EmptyResponse(body.empty_reason()))
    }

    /// Handle a response of any status.
    async fn handle_response(
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return GeminiError::RateLimited(retry_after);
        }

        if matches!(
            status,
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN
        ) {
            return GeminiError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => serde_json::from_str::<ApiErrorResponse>(&body).map_or_else(
                |_| GeminiError::Api {
                    code: status.as_u16(),
                    status: status.to_string(),
                    message: body,
                },
                |api_error| GeminiError::Api {
                    code: api_error.error.code,
                    status: api_error.error.status,
                    message: api_error.error.message,
                },
            ),
            Err(e) => GeminiError::Http(e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::post};
    use secrecy::SecretString;
    use serde_json::{Value, json};

    use super::*;

    async fn serve(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/v1beta/models/{model}",
            post(move || async move { (status, Json(body)) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        format!("http://{addr}")
    }

    fn client(api_base: String) -> GeminiClient {
        GeminiClient::new(&GeminiConfig {
            api_key: SecretString::from("test-key"),
            model: "gemini-2.0-flash".to_string(),
            api_base,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_text() {
        let base = serve(
            StatusCode::OK,
            json!({"candidates": [{"content": {"parts": [{"text": "One?||Two?||Three?"}]}}]}),
        )
        .await;
        let text = client(base).generate_text("prompt").await.unwrap();
        assert_eq!(text, "One?||Two?||Three?");
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let base = serve(
            StatusCode::BAD_REQUEST,
            json!({"error": {"code": 400, "message": "bad model", "status": "INVALID_ARGUMENT"}}),
        )
        .await;
        let err = client(base).generate_text("prompt").await.unwrap_err();
        assert!(matches!(
            err,
            GeminiError::Api { code: 400, ref status, .. } if status == "INVALID_ARGUMENT"
        ));
    }

    #[tokio::test]
    async fn test_rate_limit_is_reported() {
        let base = serve(StatusCode::TOO_MANY_REQUESTS, json!({})).await;
        let err = client(base).generate_text("prompt").await.unwrap_err();
        assert!(matches!(err, GeminiError::RateLimited(60)));
    }
}
