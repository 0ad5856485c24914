//! Ingestion engine: root paper → provider fetch → merge into the graph.

pub mod ingest;
pub mod record;

pub use ingest::{IngestErrorKind, IngestOutcome, IngestResult, Ingester};
pub use record::normalize;
