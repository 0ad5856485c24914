//! Provider payload → store record, with best-effort field defaults.

use chrono::NaiveDate;

use citegraph_provider::ProviderPaper;
use citegraph_store::PaperRecord;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const PAPER_URL_BASE: &str = "https://www.semanticscholar.org/paper/";

/// Build a store record from a provider entry. `None` if it has no ID.
pub fn normalize(raw: &ProviderPaper, author_limit: usize) -> Option<PaperRecord> {
    let paper_id = raw.id()?.to_string();

    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_TITLE)
        .to_string();

    let authors = raw
        .authors
        .as_deref()
        .unwrap_or_default()
        .iter()
        .take(author_limit)
        .map(|a| a.name.clone().unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()))
        .collect();

    let url = raw
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}{}", PAPER_URL_BASE, paper_id));

    Some(PaperRecord {
        title,
        authors,
        year: raw.year,
        publication_date: raw.publication_date.as_deref().and_then(calendar_date),
        citation_count: raw.citation_count.unwrap_or(0),
        url,
        paper_id,
    })
}

/// Keep a date only if it is a real `YYYY-MM-DD` calendar date.
fn calendar_date(value: &str) -> Option<String> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|_| value.to_string())
}
