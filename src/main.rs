//! Modelref - Catalog Enrichment Entry Point
//!
//! Loads the scraped model reference, enriches every text model with
//! researched speed and capability summaries, and writes the snapshot.

use std::sync::Arc;

use modelref::catalog::Catalog;
use modelref::config::Config;
use modelref::enrich::{EnrichOptions, Enricher};
use modelref::llm::OpenRouterClient;
use modelref::search::DuckDuckGoSearch;
use modelref::snapshot;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modelref=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    // Load the input catalog
    let catalog = Catalog::load(&config.catalog_path)?;
    info!(
        "Loaded catalog: {} text models, {} media models",
        catalog.text_models.len(),
        catalog.media_models.len()
    );

    // Wire up providers and run the batch
    let llm = Arc::new(OpenRouterClient::new(config.api_key.clone()));
    let search = Arc::new(DuckDuckGoSearch::new());
    let enricher = Enricher::new(llm, search, EnrichOptions::from(&config));

    let enriched = enricher.enrich_all(catalog).await;

    // Persist; a write failure here loses the run and must surface
    snapshot::persist(&enriched, &config.snapshot_path)?;
    info!("Enriched catalog saved to {}", config.snapshot_path.display());

    Ok(())
}
