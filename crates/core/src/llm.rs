//! Client for the hosted LLM messages API.
//!
//! One synchronous (awaited) request per generation, no retries, no
//! explicit timeout beyond the HTTP client's own default. Transport and
//! status failures are classified into the distinct error variants the
//! generation pipelines surface to users: [`CopymillError::ApiConnection`]
//! for connectivity, [`CopymillError::ApiAuth`] for credential rejection,
//! and [`CopymillError::ApiFailure`] for everything else.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{CopymillError, Result};

/// Environment variable holding the API credential.
///
/// Its absence is not an error: the pipelines silently switch into demo
/// mode instead. Presence is re-read at each decision point, never cached.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Reads the API credential from the process environment.
///
/// Returns `None` when the variable is unset or empty.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_VAR).ok().filter(|key| !key.is_empty())
}

/// Configuration for generation requests.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Maximum output size in tokens.
    pub max_tokens: u32,
    /// Sampling temperature; omitted from the request when `None`.
    pub temperature: Option<f32>,
    /// Messages endpoint URL.
    pub api_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-5-20250929".to_string(),
            max_tokens: 2000,
            temperature: None,
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
        }
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Deserialize)]
struct CompletionContent {
    text: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: Vec<CompletionContent>,
}

/// Messages-API client bound to one credential.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl LlmClient {
    /// Creates a client for the given credential and configuration.
    pub fn new(api_key: &str, config: LlmConfig) -> Self {
        Self { client: Client::new(), api_key: api_key.to_string(), config }
    }

    /// Issues one completion request with an optional system instruction
    /// and a single user message, returning the reply text.
    pub async fn complete(&self, system: Option<&str>, user: &str) -> Result<String> {
        let request = CompletionRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system,
            messages: vec![WireMessage { role: "user", content: user }],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CopymillError::ApiAuth);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CopymillError::ApiFailure(format!("API error {}: {}", status, body)));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CopymillError::ApiFailure(e.to_string()))?;

        Ok(completion
            .content
            .first()
            .map(|block| block.text.clone())
            .unwrap_or_default())
    }
}

fn classify_transport_error(e: reqwest::Error) -> CopymillError {
    if e.is_connect() || e.is_timeout() {
        CopymillError::ApiConnection
    } else {
        CopymillError::ApiFailure(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "claude-sonnet-4-5-20250929");
        assert_eq!(config.max_tokens, 2000);
        assert!(config.temperature.is_none());
        assert!(config.api_url.contains("/v1/messages"));
    }

    #[test]
    fn test_request_serialization_omits_absent_fields() {
        let request = CompletionRequest {
            model: "test-model",
            max_tokens: 100,
            temperature: None,
            system: None,
            messages: vec![WireMessage { role: "user", content: "hello" }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "test-model");
        assert_eq!(value["messages"][0]["role"], "user");
        assert!(value.get("temperature").is_none());
        assert!(value.get("system").is_none());
    }

    #[test]
    fn test_request_serialization_includes_system() {
        let request = CompletionRequest {
            model: "test-model",
            max_tokens: 100,
            temperature: Some(0.7),
            system: Some("be brief"),
            messages: vec![WireMessage { role: "user", content: "hello" }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["system"], "be brief");
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_response_deserialization() {
        let raw = r#"{"content":[{"text":"drafts here"},{"text":"ignored"}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.content.first().unwrap().text, "drafts here");
    }
}
