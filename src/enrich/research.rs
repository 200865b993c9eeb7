//! The bounded research loop.

use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::llm::{ChatMessage, LlmClient, Role, ToolCall};
use crate::search::SearchProvider;

/// Name of the one tool the model is allowed to call.
const SEARCH_TOOL: &str = "search";

/// Terminal state of a research conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model produced a final answer.
    Answer(String),
    /// The model asked for a tool that was never declared.
    UnexpectedTool(String),
    /// The turn bound was hit before the model answered.
    TurnsExhausted,
}

impl Outcome {
    /// Collapse the outcome into the string stored on the catalog entry.
    /// `fallback` is used when the turn bound was hit.
    pub fn into_text(self, fallback: &str) -> String {
        match self {
            Outcome::Answer(text) => text,
            Outcome::UnexpectedTool(name) => format!("Unexpected function call: {}", name),
            Outcome::TurnsExhausted => fallback.to_string(),
        }
    }
}

/// Arguments the model must supply when calling the search tool.
#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

/// Drives one research question to completion: alternates model calls and
/// search invocations until the model answers or the turn bound is hit.
pub struct ResearchLoop {
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn SearchProvider>,
    model: String,
    max_turns: usize,
}

impl ResearchLoop {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchProvider>,
        model: String,
        max_turns: usize,
    ) -> Self {
        Self {
            llm,
            search,
            model,
            max_turns,
        }
    }

    /// Run the conversation to a terminal state.
    ///
    /// Provider failures (HTTP errors, unparseable replies, malformed tool
    /// arguments) propagate as errors; every other exit is an `Outcome`.
    /// Issues at most `max_turns` model calls.
    pub async fn run(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<Outcome> {
        let mut messages = vec![
            ChatMessage {
                role: Role::System,
                content: Some(system_prompt.to_string()),
                tool_calls: None,
                tool_call_id: None,
            },
            ChatMessage {
                role: Role::User,
                content: Some(user_prompt.to_string()),
                tool_calls: None,
                tool_call_id: None,
            },
        ];

        let tool_schemas = vec![search_tool_schema()];

        for turn in 0..self.max_turns {
            tracing::debug!("research turn {}", turn + 1);

            // Call LLM
            let response = self
                .llm
                .chat_completion(&self.model, &messages, Some(&tool_schemas))
                .await?;

            // Check for tool calls
            if let Some(tool_calls) = &response.tool_calls {
                if !tool_calls.is_empty() {
                    // A call to anything but the search tool ends the task
                    // with a degraded result, before any execution.
                    if let Some(unknown) =
                        tool_calls.iter().find(|c| c.function.name != SEARCH_TOOL)
                    {
                        return Ok(Outcome::UnexpectedTool(unknown.function.name.clone()));
                    }

                    // Add assistant message with tool calls
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: response.content.clone(),
                        tool_calls: Some(tool_calls.clone()),
                        tool_call_id: None,
                    });

                    // Execute each search and add its result
                    for tool_call in tool_calls {
                        let result = self.run_search(tool_call).await?;
                        messages.push(ChatMessage {
                            role: Role::Tool,
                            content: Some(result),
                            tool_calls: None,
                            tool_call_id: Some(tool_call.id.clone()),
                        });
                    }

                    continue;
                }
            }

            // No tool calls - this is the final answer
            if let Some(content) = response.content {
                return Ok(Outcome::Answer(content.trim().to_string()));
            }

            anyhow::bail!("model returned neither content nor tool calls");
        }

        Ok(Outcome::TurnsExhausted)
    }

    /// Execute a single search call and serialize its results.
    async fn run_search(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: SearchArgs = serde_json::from_str(&tool_call.function.arguments)
            .context("search call had malformed arguments")?;

        let results = self.search.search(&args.query).await?;
        serde_json::to_string(&results).context("failed to serialize search results")
    }
}

/// Schema for the search tool, in OpenAI tools format.
fn search_tool_schema() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": SEARCH_TOOL,
            "description": "Search DuckDuckGo for information",
            "parameters": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }
        }
    })
}
