//! # Modelref
//!
//! Enriches a scraped model reference catalog with researched speed and
//! capability summaries.
//!
//! This library provides:
//! - A bounded tool-call loop for researching one model via an LLM
//! - A batch enricher that drives the loop across the whole catalog
//! - Snapshot persistence for the enriched catalog
//!
//! ## Architecture
//!
//! Enrichment follows the "tools in a loop" pattern, once per research
//! question:
//! 1. Ask the model about a catalog entry, with a web search tool declared
//! 2. If the model requests a search, run it and feed the results back
//! 3. Repeat until the model answers or the turn bound is hit
//! 4. Fold the answer (or a fallback) into the catalog entry
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use modelref::config::Config;
//! use modelref::enrich::{EnrichOptions, Enricher};
//! use modelref::llm::OpenRouterClient;
//! use modelref::search::DuckDuckGoSearch;
//!
//! let config = Config::from_env()?;
//! let enricher = Enricher::new(
//!     Arc::new(OpenRouterClient::new(config.api_key.clone())),
//!     Arc::new(DuckDuckGoSearch::new()),
//!     EnrichOptions::from(&config),
//! );
//! let enriched = enricher.enrich_all(catalog).await;
//! ```

pub mod catalog;
pub mod config;
pub mod enrich;
pub mod llm;
pub mod search;
pub mod snapshot;

pub use config::Config;
