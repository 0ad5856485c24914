//! Root paper ingestion: fetch, then merge root + neighbors into the graph.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use citegraph_core::config::DEFAULT_AUTHOR_LIMIT;
use citegraph_core::{Error, Result};
use citegraph_provider::PaperProvider;
use citegraph_store::{Graph, GraphState, PaperProjection, PaperRecord};

use crate::record::normalize;

/// Which list of the root a neighbor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Reference,
    Citation,
}

/// Successful ingest, before it is flattened into an `IngestResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The root was already a main paper; nothing changed.
    AlreadyPresent { paper: PaperProjection },
    /// Root and neighbors merged.
    Added {
        paper: PaperProjection,
        references: usize,
        citations: usize,
        new_papers: usize,
        new_edges: usize,
    },
}

/// Failure classes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestErrorKind {
    Validation,
    Provider,
    NotFound,
    Internal,
}

impl From<&Error> for IngestErrorKind {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation(_) => Self::Validation,
            Error::Provider(_) => Self::Provider,
            Error::NotFound(_) => Self::NotFound,
            _ => Self::Internal,
        }
    }
}

/// Structured result of an add-root request. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResult {
    pub success: bool,
    pub message: String,
    pub paper: Option<PaperProjection>,
    #[serde(rename = "new_papers")]
    pub new_paper_count: usize,
    #[serde(rename = "new_edges")]
    pub new_edge_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<IngestErrorKind>,
}

impl IngestResult {
    pub fn failure(err: &Error) -> Self {
        let message = match err {
            Error::Validation(msg) => msg.clone(),
            Error::NotFound(_) | Error::Provider(_) => {
                "Failed to fetch paper from Semantic Scholar".to_string()
            }
            _ => "Failed to process paper data".to_string(),
        };
        Self {
            success: false,
            message,
            paper: None,
            new_paper_count: 0,
            new_edge_count: 0,
            error: Some(err.into()),
        }
    }
}

impl From<IngestOutcome> for IngestResult {
    fn from(outcome: IngestOutcome) -> Self {
        match outcome {
            IngestOutcome::AlreadyPresent { paper } => Self {
                success: true,
                message: "Paper already added".to_string(),
                paper: Some(paper),
                new_paper_count: 0,
                new_edge_count: 0,
                error: None,
            },
            IngestOutcome::Added {
                paper,
                references,
                citations,
                new_papers,
                new_edges,
            } => Self {
                success: true,
                message: format!(
                    "Added paper with {} references and {} citations",
                    references, citations
                ),
                paper: Some(paper),
                new_paper_count: new_papers,
                new_edge_count: new_edges,
                error: None,
            },
        }
    }
}

/// Orchestrates provider fetches and graph merges.
pub struct Ingester {
    graph: Arc<GraphState>,
    provider: Arc<dyn PaperProvider>,
    author_limit: usize,
}

impl Ingester {
    pub fn new(graph: Arc<GraphState>, provider: Arc<dyn PaperProvider>) -> Self {
        Self {
            graph,
            provider,
            author_limit: DEFAULT_AUTHOR_LIMIT,
        }
    }

    pub fn with_author_limit(mut self, author_limit: usize) -> Self {
        self.author_limit = author_limit.max(1);
        self
    }

    /// Add-root entry point: trims and validates the raw input, ingests it,
    /// and folds any error into a failure result.
    pub async fn add_root(&self, raw_id: &str) -> IngestResult {
        let root_id = raw_id.trim();
        let result = if root_id.is_empty() {
            Err(Error::Validation("Paper ID is required".into()))
        } else {
            self.ingest(root_id).await
        };

        match result {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                warn!("Ingest of '{}' failed: {}", root_id, e);
                IngestResult::failure(&e)
            }
        }
    }

    /// Fetch `root_id` with its references and citations and merge them.
    ///
    /// Re-ingesting a main paper is a no-op that skips the provider. On error
    /// the graph is untouched: nothing is written until the fetch succeeded.
    pub async fn ingest(&self, root_id: &str) -> Result<IngestOutcome> {
        if let Some(paper) = self.existing_main(root_id) {
            debug!("{} already ingested, skipping fetch", root_id);
            return Ok(IngestOutcome::AlreadyPresent { paper });
        }

        let raw = self.provider.fetch_paper(root_id).await?;
        let root = normalize(&raw, self.author_limit).ok_or_else(|| {
            Error::NotFound(format!(
                "{} returned no identifier for {}",
                self.provider.name(),
                root_id
            ))
        })?;

        let references = raw.reference_list();
        let citations = raw.citation_list();
        let neighbors: Vec<(Link, PaperRecord)> = references
            .iter()
            .map(|p| (Link::Reference, p))
            .chain(citations.iter().map(|p| (Link::Citation, p)))
            .filter_map(|(link, p)| normalize(p, self.author_limit).map(|record| (link, record)))
            .collect();

        let outcome = self.graph.write(|graph| merge(graph, root, neighbors))?;
        Ok(match outcome {
            Merge::AlreadyMain(paper) => IngestOutcome::AlreadyPresent { paper },
            Merge::Merged {
                paper,
                new_papers,
                new_edges,
            } => {
                info!(
                    "Ingested {}: {} references, {} citations, {} new papers, {} new edges",
                    paper.paper_id,
                    references.len(),
                    citations.len(),
                    new_papers,
                    new_edges
                );
                IngestOutcome::Added {
                    paper,
                    references: references.len(),
                    citations: citations.len(),
                    new_papers,
                    new_edges,
                }
            }
        })
    }

    fn existing_main(&self, paper_id: &str) -> Option<PaperProjection> {
        self.graph.read(|graph| {
            graph
                .papers
                .get(paper_id)
                .filter(|p| p.is_main)
                .map(|p| p.projection())
        })
    }
}

enum Merge {
    AlreadyMain(PaperProjection),
    Merged {
        paper: PaperProjection,
        new_papers: usize,
        new_edges: usize,
    },
}

/// The critical section. Runs with the graph lock held.
fn merge(
    graph: &mut Graph,
    root: PaperRecord,
    neighbors: Vec<(Link, PaperRecord)>,
) -> Result<Merge> {
    let root_id = root.paper_id.clone();

    // Another ingest may have finished this root while we were fetching,
    // or the request used an alias of an existing main paper.
    if let Some(existing) = graph.papers.get(&root_id).filter(|p| p.is_main) {
        return Ok(Merge::AlreadyMain(existing.projection()));
    }

    graph.papers.upsert(root, true);

    let mut new_papers = 0;
    let mut new_edges = 0;
    for (link, record) in neighbors {
        let neighbor_id = record.paper_id.clone();

        if let Some(root) = graph.papers.get_mut(&root_id) {
            match link {
                Link::Reference => root.references.push(neighbor_id.clone()),
                Link::Citation => root.citations.push(neighbor_id.clone()),
            }
        }

        if graph.papers.upsert(record, false).inserted {
            new_papers += 1;
        }

        if graph.edges.add(&root_id, &neighbor_id) {
            new_edges += 1;
            bump_edge_count(graph, &root_id);
            bump_edge_count(graph, &neighbor_id);
        }
    }

    let paper = graph
        .papers
        .get(&root_id)
        .map(|p| p.projection())
        .ok_or_else(|| Error::Internal(format!("root {} missing after merge", root_id)))?;

    Ok(Merge::Merged {
        paper,
        new_papers,
        new_edges,
    })
}

fn bump_edge_count(graph: &mut Graph, paper_id: &str) {
    if let Some(paper) = graph.papers.get_mut(paper_id) {
        paper.edge_count += 1;
    }
}
