//! Display ordering and filtering for paper listings.

use std::cmp::Ordering;

use serde::Deserialize;

use citegraph_store::PaperProjection;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Main,
}

/// Sort keys. All order descending; missing years sort last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Edges,
    Citations,
    Year,
}

impl SortKey {
    fn compare(self, a: &PaperProjection, b: &PaperProjection) -> Ordering {
        match self {
            Self::Edges => b.edge_count.cmp(&a.edge_count),
            Self::Citations => b.citation_count.cmp(&a.citation_count),
            Self::Year => match (a.year, b.year) {
                (Some(ya), Some(yb)) => yb.cmp(&ya),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// Query parameters for `GET /api/papers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub filter: Filter,
    pub sort: Option<SortKey>,
    pub then: Option<SortKey>,
}

/// Filter, then sort by primary and secondary key. Paper ID breaks the
/// remaining ties so the order is stable across calls.
pub fn arrange(mut papers: Vec<PaperProjection>, params: &ListParams) -> Vec<PaperProjection> {
    if params.filter == Filter::Main {
        papers.retain(|p| p.is_main);
    }

    let primary = params.sort.unwrap_or(SortKey::Edges);
    let secondary = params.then.unwrap_or(SortKey::Citations);
    papers.sort_by(|a, b| {
        primary
            .compare(a, b)
            .then_with(|| secondary.compare(a, b))
            .then_with(|| a.paper_id.cmp(&b.paper_id))
    });
    papers
}
