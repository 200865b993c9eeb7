//! Enrichment module - the research loop and the batch driver.
//!
//! Each catalog entry gets two research conversations, each following a
//! "tools in a loop" pattern:
//! 1. Ask the model with the search tool declared
//! 2. If the model requests a search, run it and feed the results back
//! 3. Repeat until the model answers or the turn bound is hit

mod enricher;
mod prompt;
mod research;

pub use enricher::{EnrichOptions, Enricher};
pub use research::{Outcome, ResearchLoop};
