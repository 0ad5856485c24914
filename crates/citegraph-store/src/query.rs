//! Read-only projection of the graph into listings and counts.
//!
//! Ordering of listings is unspecified here; sorting and filtering for
//! display belong to the caller.

use crate::graph::{Graph, GraphState};
use crate::types::{GraphSnapshot, GraphStats, PaperProjection};

/// Query service over a shared graph. Never writes.
pub struct GraphQuery<'a> {
    state: &'a GraphState,
}

impl<'a> GraphQuery<'a> {
    pub fn new(state: &'a GraphState) -> Self {
        Self { state }
    }

    /// One projection per stored paper.
    pub fn list(&self) -> Vec<PaperProjection> {
        self.state.read(project_all)
    }

    pub fn stats(&self) -> GraphStats {
        self.state.read(count)
    }

    /// Listing and stats taken under the same lock.
    pub fn snapshot(&self) -> GraphSnapshot {
        self.state.read(|graph| GraphSnapshot {
            papers: project_all(graph),
            stats: count(graph),
        })
    }

    pub fn paper(&self, paper_id: &str) -> Option<PaperProjection> {
        self.state
            .read(|graph| graph.papers.get(paper_id).map(|p| p.projection()))
    }
}

fn project_all(graph: &Graph) -> Vec<PaperProjection> {
    graph.papers.all().map(|p| p.projection()).collect()
}

fn count(graph: &Graph) -> GraphStats {
    GraphStats {
        total_papers: graph.papers.len(),
        main_papers: graph.papers.all().filter(|p| p.is_main).count(),
        total_edges: graph.edges.size(),
    }
}
