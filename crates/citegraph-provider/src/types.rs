//! Wire types for the Semantic Scholar Graph API paper endpoint.
//!
//! Every field is optional and tolerates `null`; normalization into store
//! records happens in the ingestion engine.

use serde::{Deserialize, Serialize};

/// Author entry as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAuthor {
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A paper as returned by the provider. Reference and citation entries have
/// the same shape, with their own lists left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPaper {
    #[serde(default)]
    pub paper_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<ProviderAuthor>>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub citation_count: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub references: Option<Vec<ProviderPaper>>,
    #[serde(default)]
    pub citations: Option<Vec<ProviderPaper>>,
}

impl ProviderPaper {
    /// Identifier, ignoring blank strings.
    pub fn id(&self) -> Option<&str> {
        self.paper_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn reference_list(&self) -> &[ProviderPaper] {
        self.references.as_deref().unwrap_or_default()
    }

    pub fn citation_list(&self) -> &[ProviderPaper] {
        self.citations.as_deref().unwrap_or_default()
    }
}
