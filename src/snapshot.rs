//! Snapshot persistence for the enriched catalog.

use std::path::Path;

use thiserror::Error;

use crate::catalog::Catalog;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write snapshot {0}: {1}")]
    Write(String, #[source] std::io::Error),
}

/// Write the full catalog to `path`, replacing any previous snapshot.
///
/// The write is all-or-nothing from the caller's point of view: on error
/// the run has no valid output and must be reported as failed.
pub fn persist(catalog: &Catalog, path: &Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(catalog)?;
    std::fs::write(path, json).map_err(|e| SnapshotError::Write(path.display().to_string(), e))
}
