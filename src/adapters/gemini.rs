use crate::core::{ConfigProvider, LanguageModel};
use crate::utils::error::{GatewayError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    /// Fails with `UpstreamUnavailable` when no API key is configured.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| GatewayError::UpstreamUnavailable {
                message: "GEMINI_API_KEY is not set".to_string(),
            })?;

        Self::new(
            api_key,
            config.model_name(),
            config.api_base_url(),
            config.request_timeout(),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait::async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!("Making generateContent request for model {}", self.model);
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("generateContent response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(GatewayError::UpstreamStatusError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::MalformedResponseError {
                message: format!("Invalid generateContent JSON: {}", e),
            })?;

        completion_text(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn completion_text(response: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GatewayError::MalformedResponseError {
            message: format!("Prompt was blocked: {}", reason),
        });
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| GatewayError::MalformedResponseError {
            message: "Response contained no candidates".to_string(),
        })?;

    let finish_reason = candidate.finish_reason;
    let text: String = candidate
        .content
        .and_then(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(GatewayError::MalformedResponseError {
            message: format!(
                "Candidate contained no text (finish reason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            ),
        });
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use httpmock::prelude::*;

    const MODEL_PATH: &str = "/v1beta/models/gemini-test:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(
            "test-key",
            "gemini-test",
            server.base_url(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_joins_candidate_parts() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path(MODEL_PATH)
                .header("x-goog-api-key", "test-key")
                .json_body(serde_json::json!({
                    "contents": [{"parts": [{"text": "What is 2 + 2?"}]}]
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "candidates": [{
                        "content": {"parts": [{"text": "OPERATION: addition\n"}, {"text": "RESULT: 4"}]},
                        "finishReason": "STOP"
                    }]
                }));
        });

        let text = client_for(&server).generate("What is 2 + 2?").await.unwrap();

        api_mock.assert();
        assert_eq!(text, "OPERATION: addition\nRESULT: 4");
    }

    #[tokio::test]
    async fn test_error_status_carries_api_message() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(403).json_body(serde_json::json!({
                "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
            }));
        });

        let err = client_for(&server).generate("2 + 2").await.unwrap_err();

        api_mock.assert();
        match err {
            GatewayError::UpstreamStatusError { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_truncated() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(502).body("x".repeat(500));
        });

        let err = client_for(&server).generate("2 + 2").await.unwrap_err();
        match err {
            GatewayError::UpstreamStatusError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message.len(), 200);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_candidates_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(serde_json::json!({"candidates": []}));
        });

        let err = client_for(&server).generate("2 + 2").await.unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponseError { .. }));
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200)
                .json_body(serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        });

        let err = client_for(&server).generate("2 + 2").await.unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).body("not json");
        });

        let err = client_for(&server).generate("2 + 2").await.unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponseError { .. }));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = GatewayConfig::default();
        let err = GeminiClient::from_config(&config).err().unwrap();
        assert!(matches!(err, GatewayError::UpstreamUnavailable { .. }));

        let config = GatewayConfig {
            api_key: Some("k".to_string()),
            api_base_url: "http://localhost:9/".to_string(),
            ..Default::default()
        };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
