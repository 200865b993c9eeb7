//! Prompt templates for the two research tasks.

/// System prompt for the tokens-per-second research task.
pub const SPEED_SYSTEM_PROMPT: &str = "You are an AI assistant that provides concise information \
     about AI model performance in terms of tokens per second. Always respond with a single, \
     brief sentence.";

/// System prompt for the capability description task.
pub const DESCRIPTION_SYSTEM_PROMPT: &str = "You are an AI assistant that provides concise \
     information about AI models. Respond with brief bullet points.";

/// Build the user prompt asking for a model's throughput.
pub fn speed_user_prompt(model_name: &str) -> String {
    format!(
        "Find and report the performance of the AI model '{}' in tokens per second. \
         Provide the information in a single, concise sentence. \
         If no specific tokens per second data is found, briefly state that.",
        model_name
    )
}

/// Build the user prompt asking for a model's capability summary.
pub fn description_user_prompt(model_name: &str) -> String {
    format!(
        r#"Provide a concise description of the AI model '{}' with the following information:
- What the model is good at
- What the model is not good at
- Other relevant information for assessing the model's capabilities
- Whether it's a variant of an existing model (if applicable)
Use brief bullet points and keep the total response under 100 words."#,
        model_name
    )
}
