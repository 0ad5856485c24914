//! CiteGraph Core: shared error taxonomy and configuration.

pub mod config;
pub mod error;

pub use config::{CiteGraphConfig, ProviderSettings};
pub use error::{Error, Result};
