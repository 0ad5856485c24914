//! Bibliographic data provider.
//!
//! Defines the `PaperProvider` seam the ingestion engine fetches through,
//! the Semantic Scholar Graph API client behind it, and the bounded-retry
//! state machine that client drives.

pub mod client;
pub mod retry;
pub mod types;

use async_trait::async_trait;
use citegraph_core::Result;

pub use client::SemanticScholarClient;
pub use retry::{AttemptOutcome, FetchFailure, FetchMachine, FetchState, RetryPolicy};
pub use types::*;

/// Source of paper metadata plus first-degree references and citations.
#[async_trait]
pub trait PaperProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch one paper with its reference and citation lists.
    ///
    /// Errors are `Error::NotFound` when the provider has no usable record
    /// and `Error::Provider` for every other failure.
    async fn fetch_paper(&self, paper_id: &str) -> Result<ProviderPaper>;
}
