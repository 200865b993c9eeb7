//! OpenRouter chat completions client.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{ChatMessage, ChatResponse, LlmClient, ToolCall};

const CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Client for the OpenRouter chat completions API.
pub struct OpenRouterClient {
    api_key: String,
    http: reqwest::Client,
}

impl OpenRouterClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> anyhow::Result<ChatResponse> {
        let mut body = json!({
            "model": model,
            "messages": messages,
        });
        if let Some(tools) = tools {
            body["tools"] = Value::Array(tools.to_vec());
        }

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .timeout(std::time::Duration::from_secs(120))
            .json(&body)
            .send()
            .await
            .context("chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("chat completion returned HTTP {}: {}", status, detail);
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .context("failed to parse chat completion response")?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| anyhow::anyhow!("chat completion response had no choices"))?;

        Ok(ChatResponse {
            content: message.content,
            tool_calls: message.tool_calls,
        })
    }
}
