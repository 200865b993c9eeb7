//! LLM client abstraction.
//!
//! Speaks the OpenAI-compatible chat completions protocol: a list of
//! role-tagged messages goes up along with the declared tools, and the
//! reply is either assistant text or a request to invoke one of those
//! tools.

mod openrouter;

pub use openrouter::OpenRouterClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message role in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool calls requested by the assistant, echoed back verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// For `Role::Tool` messages: id of the call this result answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,

    #[serde(rename = "type", default = "default_tool_kind")]
    pub kind: String,

    pub function: FunctionCall,
}

/// The function half of a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,

    /// JSON-encoded arguments object, exactly as the model produced it.
    pub arguments: String,
}

fn default_tool_kind() -> String {
    "function".to_string()
}

/// Parsed chat completion reply: assistant text, tool calls, or both.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// Client for a chat completions endpoint.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the conversation and the declared tools, return the reply.
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> anyhow::Result<ChatResponse>;
}
