//! Catalog data model and loading.
//!
//! The catalog is the JSON document produced by the reference scraper:
//! `text_models` (enriched by this crate) and `media_models` (carried
//! through untouched).

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to parse catalog {0}: {1}")]
    Parse(String, #[source] serde_json::Error),
}

/// One text model record.
///
/// Identity fields come straight from the scraped reference table; all of
/// them are the cell text verbatim. `speed` and `description` are absent
/// in the input and filled in by enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub id: String,
    pub prompt_cost: String,
    pub completion_cost: String,
    pub context_length: String,
    pub moderation: String,

    /// Researched throughput summary (tokens per second).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,

    /// Researched capability summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The full model reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub text_models: Vec<ModelEntry>,

    /// Kept as raw JSON so the output reproduces the input exactly.
    #[serde(default)]
    pub media_models: Vec<Value>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Read(path.display().to_string(), e))?;
        serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(path.display().to_string(), e))
    }
}
