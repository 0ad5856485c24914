//! Process-wide citation graph: paper store and edge set behind one lock.

use parking_lot::Mutex;
use tracing::info;

use crate::edges::EdgeSet;
use crate::papers::PaperStore;

/// The graph proper. Papers and edges always change together.
#[derive(Debug, Default)]
pub struct Graph {
    pub papers: PaperStore,
    pub edges: EdgeSet,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the structural invariants: every edge endpoint has a record and
    /// every record's `edge_count` equals its degree.
    pub fn is_consistent(&self) -> bool {
        let endpoints_known = self.edges.iter().all(|edge| {
            let (a, b) = edge.endpoints();
            self.papers.contains(a) && self.papers.contains(b)
        });
        endpoints_known
            && self
                .papers
                .all()
                .all(|p| p.edge_count == self.edges.degree(p.id()))
    }

    fn clear(&mut self) {
        self.papers.reset();
        self.edges.reset();
    }
}

/// Shared, injectable handle to the graph.
///
/// Every mutation runs under a single mutex so a merge, a reset, and a read
/// never observe each other half-done. Nothing holds the lock across an await.
#[derive(Debug, Default)]
pub struct GraphState {
    inner: Mutex<Graph>,
}

impl GraphState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-only closure against the graph.
    pub fn read<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        let graph = self.inner.lock();
        f(&graph)
    }

    /// Run a mutating closure as one critical section.
    pub fn write<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        let mut graph = self.inner.lock();
        f(&mut graph)
    }

    /// Atomically empty both the paper store and the edge set.
    pub fn reset(&self) {
        let mut graph = self.inner.lock();
        let (papers, edges) = (graph.papers.len(), graph.edges.size());
        graph.clear();
        info!("Graph reset: dropped {} papers and {} edges", papers, edges);
    }
}
