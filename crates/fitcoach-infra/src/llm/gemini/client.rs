//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends one `generateContent` request per call with the key in the
//! `x-goog-api-key` header. The API key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use fitcoach_core::llm::LlmProvider;
use fitcoach_types::config::DEFAULT_BASE_URL;
use fitcoach_types::llm::{GenerationRequest, GenerationResponse, LlmError, Usage};

use super::types::{
    GeminiContent, GeminiErrorResponse, GeminiGenerationConfig, GeminiPart, GeminiRequest,
    GeminiResponse,
};

/// Google Gemini text-generation provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiProvider {
    /// Create a provider whose HTTP client gives up after `timeout`.
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (proxies, regional endpoints, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.config.temperature,
                top_p: request.config.top_p,
                top_k: request.config.top_k,
                max_output_tokens: request.config.max_output_tokens,
            },
            safety_settings: request.safety_settings.clone(),
        }
    }

    /// Map a non-2xx status to an error, keeping the API's own message when
    /// the body carries one.
    fn map_status_error(status: u16, body: &str) -> LlmError {
        let message = serde_json::from_str::<GeminiErrorResponse>(body)
            .ok()
            .map(|r| r.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "no error details".to_string()
                } else {
                    trimmed.to_string()
                }
            });

        match status {
            400 => LlmError::InvalidRequest(message),
            401 | 403 => LlmError::AuthenticationFailed(message),
            429 => LlmError::QuotaExceeded(message),
            _ => LlmError::Provider {
                message: format!("HTTP {status}: {message}"),
            },
        }
    }

    /// Pull the reply text out of a decoded response.
    fn extract_reply(
        response: GeminiResponse,
        requested_model: &str,
    ) -> Result<GenerationResponse, LlmError> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(LlmError::SafetyBlocked { reason });
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(match candidate.finish_reason.as_deref() {
                Some("SAFETY") => LlmError::SafetyBlocked {
                    reason: "SAFETY".to_string(),
                },
                _ => LlmError::EmptyResponse,
            });
        }

        let usage = response
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(GenerationResponse {
            text,
            model: response
                .model_version
                .unwrap_or_else(|| requested_model.to_string()),
            finish_reason: candidate.finish_reason,
            usage,
        })
    }
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let body = Self::to_gemini_request(request);
        let url = self.url(&request.model);
        debug!(url = %url, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| LlmError::Provider {
            message: format!("failed to read response: {e}"),
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Gemini API returned an error");
            return Err(Self::map_status_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Self::extract_reply(gemini_response, &request.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_types::llm::{GenerationConfig, default_safety_settings};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn make_provider() -> GeminiProvider {
        GeminiProvider::new(
            SecretString::from("test-key-not-real"),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    /// Same provider, but never routed through a system proxy.
    fn local_provider(base_url: &str) -> GeminiProvider {
        let mut provider = make_provider().with_base_url(base_url);
        provider.client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap();
        provider
    }

    fn make_request() -> GenerationRequest {
        GenerationRequest {
            model: "gemini-2.5-flash".to_string(),
            prompt: "User Information: Age: 25".to_string(),
            config: GenerationConfig::default(),
            safety_settings: default_safety_settings(),
        }
    }

    fn parse(json: &str) -> GeminiResponse {
        serde_json::from_str(json).unwrap()
    }

    /// Serve exactly one HTTP response; the handle yields the raw request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                    let len = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= pos + 4 + len {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&buf).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_provider().name(), "gemini");
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", make_provider());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test-key-not-real"));
    }

    #[test]
    fn test_url_uses_model_and_base() {
        let provider = make_provider();
        assert_eq!(
            provider.url("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );

        let provider = provider.with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            provider.url("gemini-pro"),
            "http://localhost:8080/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let body = GeminiProvider::to_gemini_request(&make_request());
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            "User Information: Age: 25"
        );
        assert_eq!(json["generationConfig"]["temperature"], 0.7);
        assert_eq!(json["generationConfig"]["topP"], 1.0);
        assert_eq!(json["generationConfig"]["topK"], 1);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);

        let safety = json["safetySettings"].as_array().unwrap();
        assert_eq!(safety.len(), 4);
        assert_eq!(safety[0]["category"], "HARM_CATEGORY_HARASSMENT");
        assert_eq!(safety[3]["category"], "HARM_CATEGORY_DANGEROUS_CONTENT");
        assert!(
            safety
                .iter()
                .all(|s| s["threshold"] == "BLOCK_MEDIUM_AND_ABOVE")
        );
    }

    #[test]
    fn test_extract_reply_joins_text_parts() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "| Day |"}, {"text": " Meal |"}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 210, "candidatesTokenCount": 900, "totalTokenCount": 1110},
                "modelVersion": "gemini-2.5-flash-001"
            }"#,
        );
        let reply = GeminiProvider::extract_reply(response, "gemini-2.5-flash").unwrap();
        assert_eq!(reply.text, "| Day | Meal |");
        assert_eq!(reply.model, "gemini-2.5-flash-001");
        assert_eq!(reply.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(reply.usage.input_tokens, 210);
        assert_eq!(reply.usage.output_tokens, 900);
    }

    #[test]
    fn test_extract_reply_falls_back_to_requested_model() {
        let response = parse(r#"{"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#);
        let reply = GeminiProvider::extract_reply(response, "gemini-2.5-flash").unwrap();
        assert_eq!(reply.model, "gemini-2.5-flash");
        assert_eq!(reply.usage, Usage::default());
    }

    #[test]
    fn test_prompt_block_is_safety_error() {
        let response = parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        let err = GeminiProvider::extract_reply(response, "m").unwrap_err();
        assert!(matches!(err, LlmError::SafetyBlocked { reason } if reason == "SAFETY"));
    }

    #[test]
    fn test_safety_finish_without_text_is_safety_error() {
        let response = parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#);
        let err = GeminiProvider::extract_reply(response, "m").unwrap_err();
        assert!(matches!(err, LlmError::SafetyBlocked { .. }));
    }

    #[test]
    fn test_missing_text_is_empty_response() {
        let err = GeminiProvider::extract_reply(parse(r#"{"candidates": []}"#), "m").unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));

        let err = GeminiProvider::extract_reply(parse("{}"), "m").unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));

        let response = parse(r#"{"candidates": [{"content": {"parts": []}, "finishReason": "MAX_TOKENS"}]}"#);
        let err = GeminiProvider::extract_reply(response, "m").unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        match GeminiProvider::map_status_error(400, body) {
            LlmError::InvalidRequest(msg) => assert_eq!(msg, "API key not valid."),
            other => panic!("unexpected: {other:?}"),
        }

        assert!(matches!(
            GeminiProvider::map_status_error(401, ""),
            LlmError::AuthenticationFailed(msg) if msg == "no error details"
        ));
        assert!(matches!(
            GeminiProvider::map_status_error(403, "forbidden"),
            LlmError::AuthenticationFailed(msg) if msg == "forbidden"
        ));
        assert!(matches!(
            GeminiProvider::map_status_error(429, r#"{"error": {"message": "Quota exceeded"}}"#),
            LlmError::QuotaExceeded(msg) if msg == "Quota exceeded"
        ));
        match GeminiProvider::map_status_error(503, "") {
            LlmError::Provider { message } => assert_eq!(message, "HTTP 503: no error details"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_round_trip_against_local_server() {
        let (base_url, handle) = serve_once(
            "200 OK",
            r###"{"candidates": [{"content": {"parts": [{"text": "## Diet Plan"}]}, "finishReason": "STOP"}]}"###,
        )
        .await;

        let provider = local_provider(&base_url);
        let reply = provider.generate(&make_request()).await.unwrap();
        assert_eq!(reply.text, "## Diet Plan");

        let raw_request = handle.await.unwrap();
        assert!(raw_request.starts_with("POST /models/gemini-2.5-flash:generateContent"));
        assert!(
            raw_request
                .to_lowercase()
                .contains("x-goog-api-key: test-key-not-real")
        );
        assert!(raw_request.contains(r#""generationConfig""#));
    }

    #[tokio::test]
    async fn test_generate_maps_quota_status() {
        let (base_url, handle) = serve_once(
            "429 Too Many Requests",
            r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#,
        )
        .await;

        let err = local_provider(&base_url)
            .generate(&make_request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::QuotaExceeded(msg) if msg == "Resource has been exhausted"));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_generate_undecodable_body() {
        let (base_url, handle) = serve_once("200 OK", "not json").await;

        let err = local_provider(&base_url)
            .generate(&make_request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_transport_failure_is_provider_error() {
        // Bind then drop so nothing listens on the port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_provider(&format!("http://{addr}"))
            .generate(&make_request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Provider { .. }));
    }
}
