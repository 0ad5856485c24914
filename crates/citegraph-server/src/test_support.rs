//! Test helpers: an in-memory provider and a ready-made state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use citegraph_core::{CiteGraphConfig, Error, Result};
use citegraph_provider::{PaperProvider, ProviderPaper};

use crate::state::AppState;

#[derive(Default)]
pub struct StubProvider {
    papers: HashMap<String, ProviderPaper>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn with(mut self, id: &str, references: &[&str], citations: &[&str]) -> Self {
        let entry = |id: &str| ProviderPaper {
            paper_id: Some(id.to_string()),
            title: Some(format!("Title of {}", id)),
            year: Some(2020),
            citation_count: Some(10),
            ..Default::default()
        };
        let paper = ProviderPaper {
            references: Some(references.iter().map(|r| entry(r)).collect()),
            citations: Some(citations.iter().map(|c| entry(c)).collect()),
            ..entry(id)
        };
        self.papers.insert(id.to_string(), paper);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaperProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_paper(&self, paper_id: &str) -> Result<ProviderPaper> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.papers
            .get(paper_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(paper_id.to_string()))
    }
}

pub fn test_state(provider: StubProvider) -> (Arc<AppState>, Arc<StubProvider>) {
    let provider = Arc::new(provider);
    let state = Arc::new(AppState::new(CiteGraphConfig::default(), provider.clone()));
    (state, provider)
}
