//! Data types for papers, listings, and graph statistics.

use serde::{Deserialize, Serialize};

/// Bibliographic metadata for one paper, as normalized from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub paper_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    /// `YYYY-MM-DD`
    pub publication_date: Option<String>,
    /// As reported by the provider at fetch time.
    pub citation_count: u64,
    pub url: String,
}

/// A paper held in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    #[serde(flatten)]
    pub record: PaperRecord,
    /// IDs this paper cites. Only filled for main papers.
    pub references: Vec<String>,
    /// IDs citing this paper. Only filled for main papers.
    pub citations: Vec<String>,
    /// Number of distinct edges touching this paper.
    pub edge_count: usize,
    /// Set once the paper has been requested as a root. Never cleared.
    pub is_main: bool,
}

impl Paper {
    pub fn new(record: PaperRecord, is_main: bool) -> Self {
        Self {
            record,
            references: Vec::new(),
            citations: Vec::new(),
            edge_count: 0,
            is_main,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.paper_id
    }

    /// Flat view used by listings and ingest results.
    pub fn projection(&self) -> PaperProjection {
        PaperProjection {
            paper_id: self.record.paper_id.clone(),
            title: self.record.title.clone(),
            authors: self.record.authors.clone(),
            year: self.record.year,
            publication_date: self.record.publication_date.clone(),
            citation_count: self.record.citation_count,
            url: self.record.url.clone(),
            edge_count: self.edge_count,
            is_main: self.is_main,
            reference_count: self.references.len(),
            citing_count: self.citations.len(),
        }
    }
}

/// Display projection of a stored paper. Carries list lengths, not the lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperProjection {
    pub paper_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub publication_date: Option<String>,
    pub citation_count: u64,
    pub url: String,
    pub edge_count: usize,
    pub is_main: bool,
    pub reference_count: usize,
    pub citing_count: usize,
}

/// Aggregate graph counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_papers: usize,
    pub main_papers: usize,
    pub total_edges: usize,
}

/// Listing and stats read under one lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub papers: Vec<PaperProjection>,
    pub stats: GraphStats,
}
