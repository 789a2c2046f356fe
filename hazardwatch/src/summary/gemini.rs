//! Gemini `generateContent` summarizer.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{Summarizer, SUMMARY_PROMPT};
use crate::feed::AsyncHttpClient;

/// Default model used for summaries.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Base URL of the model endpoints.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extracts the first candidate's first text part.
fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Summarizer backed by the Gemini API.
pub struct GeminiSummarizer<C> {
    http: Arc<C>,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl<C: AsyncHttpClient> GeminiSummarizer<C> {
    pub fn new(
        http: Arc<C>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    /// Overrides the API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl<C: AsyncHttpClient> Summarizer for GeminiSummarizer<C> {
    async fn summarize(&self, plan_text: &str) -> Option<String> {
        if plan_text.trim().is_empty() {
            return None;
        }

        let body = json!({
            "contents": [{
                "parts": [{ "text": format!("{}{}", SUMMARY_PROMPT, plan_text) }]
            }]
        })
        .to_string();
        let url = self.url();
        let headers = [("x-goog-api-key", self.api_key.as_str())];

        let bytes = match tokio::time::timeout(
            self.timeout,
            self.http.post_json(&url, &headers, &body),
        )
        .await
        {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                warn!(model = %self.model, error = %e, "Summary request failed");
                return None;
            }
            Err(_) => {
                warn!(
                    model = %self.model,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Summary request timed out"
                );
                return None;
            }
        };

        let response: GenerateResponse = match serde_json::from_slice(&bytes) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Summary response was not valid JSON");
                return None;
            }
        };

        let summary = first_text(response);
        debug!(has_summary = summary.is_some(), "Summary received");
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FetchError, MockAsyncHttpClient, MockReply};

    fn summarizer(mock: &MockAsyncHttpClient) -> GeminiSummarizer<MockAsyncHttpClient> {
        GeminiSummarizer::new(
            Arc::new(mock.clone()),
            "secret",
            DEFAULT_GEMINI_MODEL,
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn test_summary_extracts_first_text() {
        let mock = MockAsyncHttpClient::new().route(
            "generateContent",
            MockReply::json(
                r#"{"candidates": [{"content": {"parts": [{"text": "  Stay safe.\n- one  "}]}}]}"#,
            ),
        );

        let summary = summarizer(&mock).summarize("EARTHQUAKE - severity: HIGH").await;
        assert_eq!(summary.as_deref(), Some("Stay safe.\n- one"));

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("POST "));
        assert!(requests[0].ends_with("/gemini-1.5-flash:generateContent"));
        assert!(!requests[0].contains("secret"));

        let body: serde_json::Value = serde_json::from_str(&mock.bodies()[0]).unwrap();
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.starts_with(SUMMARY_PROMPT));
        assert!(text.ends_with("EARTHQUAKE - severity: HIGH"));
    }

    #[tokio::test]
    async fn test_failures_yield_none() {
        let error = MockAsyncHttpClient::new().route(
            "generateContent",
            MockReply::Error(FetchError::unavailable("HTTP 403")),
        );
        assert_eq!(summarizer(&error).summarize("plan").await, None);

        let hang = MockAsyncHttpClient::new().route("generateContent", MockReply::Hang);
        assert_eq!(summarizer(&hang).summarize("plan").await, None);

        let empty = MockAsyncHttpClient::new()
            .route("generateContent", MockReply::json(r#"{"candidates": []}"#));
        assert_eq!(summarizer(&empty).summarize("plan").await, None);

        let garbage =
            MockAsyncHttpClient::new().route("generateContent", MockReply::json("<html>"));
        assert_eq!(summarizer(&garbage).summarize("plan").await, None);
    }

    #[tokio::test]
    async fn test_empty_plan_skips_request() {
        let mock = MockAsyncHttpClient::new();
        assert_eq!(summarizer(&mock).summarize("  ").await, None);
        assert!(mock.requests().is_empty());
    }
}
