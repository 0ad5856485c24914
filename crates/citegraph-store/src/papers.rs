//! Paper record store: one canonical record per paper ID.

use std::collections::HashMap;

use crate::types::{Paper, PaperRecord};

/// Result of an upsert: the stored paper and whether it was just created.
#[derive(Debug)]
pub struct Upsert<'a> {
    pub paper: &'a mut Paper,
    pub inserted: bool,
}

/// Keyed map of paper ID → paper.
///
/// Content is first-write-wins: a repeat sighting never overwrites title,
/// authors, or any other metadata. The main flag is OR-ed in.
#[derive(Debug, Default)]
pub struct PaperStore {
    papers: HashMap<String, Paper>,
}

impl PaperStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` if its ID is unknown; otherwise only raise `is_main`.
    pub fn upsert(&mut self, record: PaperRecord, as_main: bool) -> Upsert<'_> {
        use std::collections::hash_map::Entry;

        match self.papers.entry(record.paper_id.clone()) {
            Entry::Occupied(slot) => {
                let paper = slot.into_mut();
                if as_main {
                    paper.is_main = true;
                }
                Upsert {
                    paper,
                    inserted: false,
                }
            }
            Entry::Vacant(slot) => Upsert {
                paper: slot.insert(Paper::new(record, as_main)),
                inserted: true,
            },
        }
    }

    pub fn get(&self, paper_id: &str) -> Option<&Paper> {
        self.papers.get(paper_id)
    }

    pub fn get_mut(&mut self, paper_id: &str) -> Option<&mut Paper> {
        self.papers.get_mut(paper_id)
    }

    pub fn contains(&self, paper_id: &str) -> bool {
        self.papers.contains_key(paper_id)
    }

    /// All stored papers, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Paper> {
        self.papers.values()
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn reset(&mut self) {
        self.papers.clear();
    }
}
