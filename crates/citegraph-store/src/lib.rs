//! CiteGraph Store: in-memory paper records, undirected edge set, and the
//! read-only query projection over both.

pub mod edges;
pub mod graph;
pub mod papers;
pub mod query;
pub mod types;

pub use edges::{EdgeKey, EdgeSet};
pub use graph::{Graph, GraphState};
pub use papers::{PaperStore, Upsert};
pub use query::GraphQuery;
pub use types::*;
