//! Undirected edge set keyed by canonical (sorted) ID pairs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// An unordered pair of distinct paper IDs, stored lowest-first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    low: String,
    high: String,
}

impl EdgeKey {
    /// Canonicalize `{a, b}`. Returns `None` for a self-loop.
    pub fn new(a: &str, b: &str) -> Option<Self> {
        match a.cmp(b) {
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Less => Some(Self {
                low: a.to_string(),
                high: b.to_string(),
            }),
            std::cmp::Ordering::Greater => Some(Self {
                low: b.to_string(),
                high: a.to_string(),
            }),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }

    pub fn touches(&self, paper_id: &str) -> bool {
        self.low == paper_id || self.high == paper_id
    }
}

/// Set of unique undirected relationships between papers.
///
/// `add` never touches paper records; keeping `edge_count` in step is the
/// caller's job.
#[derive(Debug, Default)]
pub struct EdgeSet {
    edges: HashSet<EdgeKey>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `{a, b}`. True only if the pair was not already present.
    pub fn add(&mut self, a: &str, b: &str) -> bool {
        match EdgeKey::new(a, b) {
            Some(key) => self.edges.insert(key),
            None => false,
        }
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        EdgeKey::new(a, b).is_some_and(|key| self.edges.contains(&key))
    }

    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges touching `paper_id`.
    pub fn degree(&self, paper_id: &str) -> usize {
        self.edges.iter().filter(|e| e.touches(paper_id)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter()
    }

    pub fn reset(&mut self) {
        self.edges.clear();
    }
}
