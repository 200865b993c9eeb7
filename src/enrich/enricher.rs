//! Batch enrichment across the whole catalog.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{Catalog, ModelEntry};
use crate::config::Config;
use crate::llm::LlmClient;
use crate::search::SearchProvider;

use super::prompt;
use super::research::ResearchLoop;

/// Stored when the turn bound is hit on the speed task.
const SPEED_FALLBACK: &str = "No specific tokens per second information found.";

/// Stored when the turn bound is hit on the description task.
const DESCRIPTION_FALLBACK: &str = "Unable to gather sufficient information about the model.";

/// Stored on both fields when a provider call fails for an entry.
const SPEED_ERROR: &str = "Error occurred while fetching speed information";
const DESCRIPTION_ERROR: &str = "Error occurred while fetching model description";

/// Knobs for a batch run.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Model used for the research conversations.
    pub model: String,

    /// Cap on model calls per research task.
    pub max_turns: usize,

    /// Pause between entries, to stay under provider rate limits.
    pub entry_delay: Duration,
}

impl From<&Config> for EnrichOptions {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            max_turns: config.max_turns,
            entry_delay: config.entry_delay,
        }
    }
}

/// Enriches every text model in a catalog, one entry at a time.
pub struct Enricher {
    research: ResearchLoop,
    entry_delay: Duration,
}

impl Enricher {
    /// Create an enricher with injected providers.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchProvider>,
        options: EnrichOptions,
    ) -> Self {
        Self {
            research: ResearchLoop::new(llm, search, options.model, options.max_turns),
            entry_delay: options.entry_delay,
        }
    }

    /// Enrich all text models in input order; media models pass through
    /// untouched.
    ///
    /// A failure while researching one entry marks that entry with error
    /// sentinels and moves on. It never aborts the batch.
    pub async fn enrich_all(&self, catalog: Catalog) -> Catalog {
        let total = catalog.text_models.len();
        let mut text_models = Vec::with_capacity(total);

        for (i, entry) in catalog.text_models.into_iter().enumerate() {
            tracing::info!("Enriching {} ({}/{})", entry.name, i + 1, total);
            text_models.push(self.enrich_entry(entry).await);

            // Static pacing, not adaptive backoff.
            tokio::time::sleep(self.entry_delay).await;
        }

        Catalog {
            text_models,
            media_models: catalog.media_models,
        }
    }

    /// Run both research tasks for one entry.
    async fn enrich_entry(&self, mut entry: ModelEntry) -> ModelEntry {
        match self.research_entry(&entry.name).await {
            Ok((speed, description)) => {
                entry.speed = Some(speed);
                entry.description = Some(description);
            }
            Err(e) => {
                tracing::error!("Error processing {}: {:#}", entry.name, e);
                entry.speed = Some(SPEED_ERROR.to_string());
                entry.description = Some(DESCRIPTION_ERROR.to_string());
            }
        }
        entry
    }

    async fn research_entry(&self, name: &str) -> anyhow::Result<(String, String)> {
        let speed = self
            .research
            .run(prompt::SPEED_SYSTEM_PROMPT, &prompt::speed_user_prompt(name))
            .await?
            .into_text(SPEED_FALLBACK);

        let description = self
            .research
            .run(
                prompt::DESCRIPTION_SYSTEM_PROMPT,
                &prompt::description_user_prompt(name),
            )
            .await?
            .into_text(DESCRIPTION_FALLBACK);

        Ok((speed, description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::llm::{ChatMessage, ChatResponse, Role};
    use crate::search::SearchResult;

    /// Stub that answers the speed question with `speed` and everything
    /// else with `description`, failing on the call indices in `fail`.
    struct AnsweringLlm {
        calls: AtomicUsize,
        fail: Vec<usize>,
        speed: &'static str,
        description: &'static str,
    }

    impl AnsweringLlm {
        fn new(speed: &'static str, description: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: Vec::new(),
                speed,
                description,
            }
        }

        fn failing_on(mut self, calls: Vec<usize>) -> Self {
            self.fail = calls;
            self
        }
    }

    #[async_trait]
    impl LlmClient for AnsweringLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            messages: &[ChatMessage],
            _tools: Option<&[Value]>,
        ) -> anyhow::Result<ChatResponse> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.contains(&n) {
                anyhow::bail!("service unavailable");
            }

            let user_prompt = messages
                .iter()
                .find(|m| m.role == Role::User)
                .and_then(|m| m.content.as_deref())
                .unwrap_or("");
            let content = if user_prompt.contains("tokens per second") {
                self.speed
            } else {
                self.description
            };

            Ok(ChatResponse {
                content: Some(content.to_string()),
                tool_calls: None,
            })
        }
    }

    struct NoSearch;

    #[async_trait]
    impl SearchProvider for NoSearch {
        async fn search(&self, _query: &str) -> anyhow::Result<Vec<SearchResult>> {
            Ok(Vec::new())
        }
    }

    fn entry(name: &str) -> ModelEntry {
        ModelEntry {
            name: name.to_string(),
            id: format!("vendor/{}", name.to_lowercase()),
            prompt_cost: "$0.50".to_string(),
            completion_cost: "$1.50".to_string(),
            context_length: "128K".to_string(),
            moderation: "None".to_string(),
            speed: None,
            description: None,
        }
    }

    fn catalog(names: &[&str]) -> Catalog {
        Catalog {
            text_models: names.iter().map(|n| entry(n)).collect(),
            media_models: vec![json!({"name": "Flux", "id": "flux-1", "cost": "$0.02"})],
        }
    }

    fn enricher(llm: Arc<dyn LlmClient>) -> Enricher {
        Enricher::new(
            llm,
            Arc::new(NoSearch),
            EnrichOptions {
                model: "test-model".to_string(),
                max_turns: 10,
                entry_delay: Duration::ZERO,
            },
        )
    }

    #[tokio::test]
    async fn enriches_every_entry_in_order() {
        let llm = Arc::new(AnsweringLlm::new("120 tokens/sec", "Good at reasoning"));
        let input = catalog(&["Alpha", "Beta", "Gamma"]);

        let enriched = enricher(llm).enrich_all(input).await;

        assert_eq!(enriched.text_models.len(), 3);
        let names: Vec<_> = enriched.text_models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        for model in &enriched.text_models {
            assert_eq!(model.speed.as_deref(), Some("120 tokens/sec"));
            assert_eq!(model.description.as_deref(), Some("Good at reasoning"));
        }
    }

    #[tokio::test]
    async fn one_failing_entry_does_not_affect_the_rest() {
        // Calls 0,1 belong to Alpha; call 2 is Beta's speed task.
        let llm = Arc::new(
            AnsweringLlm::new("120 tokens/sec", "Good at reasoning").failing_on(vec![2]),
        );
        let input = catalog(&["Alpha", "Beta", "Gamma"]);

        let enriched = enricher(llm).enrich_all(input).await;

        assert_eq!(enriched.text_models.len(), 3);

        let beta = &enriched.text_models[1];
        assert_eq!(beta.speed.as_deref(), Some(SPEED_ERROR));
        assert_eq!(beta.description.as_deref(), Some(DESCRIPTION_ERROR));

        for model in [&enriched.text_models[0], &enriched.text_models[2]] {
            assert_eq!(model.speed.as_deref(), Some("120 tokens/sec"));
            assert_eq!(model.description.as_deref(), Some("Good at reasoning"));
        }
    }

    #[tokio::test]
    async fn failure_on_description_sentinels_both_fields() {
        // Call 0 is Alpha's speed task (succeeds), call 1 its description.
        let llm = Arc::new(
            AnsweringLlm::new("120 tokens/sec", "Good at reasoning").failing_on(vec![1]),
        );
        let input = catalog(&["Alpha"]);

        let enriched = enricher(llm).enrich_all(input).await;

        let alpha = &enriched.text_models[0];
        assert_eq!(alpha.speed.as_deref(), Some(SPEED_ERROR));
        assert_eq!(alpha.description.as_deref(), Some(DESCRIPTION_ERROR));
    }

    #[tokio::test]
    async fn media_models_pass_through_unchanged() {
        let llm = Arc::new(AnsweringLlm::new("120 tokens/sec", "Good at reasoning"));
        let input = catalog(&["Alpha"]);
        let media_before = input.media_models.clone();

        let enriched = enricher(llm).enrich_all(input).await;

        assert_eq!(enriched.media_models, media_before);
    }

    #[tokio::test]
    async fn rerun_overwrites_derived_fields_only() {
        let first = Arc::new(AnsweringLlm::new("120 tokens/sec", "Good at reasoning"));
        let once = enricher(first).enrich_all(catalog(&["Alpha"])).await;

        let second = Arc::new(AnsweringLlm::new("150 tokens/sec", "Better at reasoning"));
        let twice = enricher(second).enrich_all(once.clone()).await;

        let before = &once.text_models[0];
        let after = &twice.text_models[0];
        assert_eq!(after.name, before.name);
        assert_eq!(after.id, before.id);
        assert_eq!(after.prompt_cost, before.prompt_cost);
        assert_eq!(after.completion_cost, before.completion_cost);
        assert_eq!(after.context_length, before.context_length);
        assert_eq!(after.moderation, before.moderation);
        assert_eq!(after.speed.as_deref(), Some("150 tokens/sec"));
        assert_eq!(after.description.as_deref(), Some("Better at reasoning"));
    }

    #[tokio::test]
    async fn empty_catalog_is_a_no_op() {
        let llm = Arc::new(AnsweringLlm::new("120 tokens/sec", "Good at reasoning"));
        let input = Catalog {
            text_models: Vec::new(),
            media_models: Vec::new(),
        };

        let enriched = enricher(llm.clone()).enrich_all(input).await;

        assert!(enriched.text_models.is_empty());
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }
}
