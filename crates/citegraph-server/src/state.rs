//! Shared application state.

use std::sync::Arc;

use citegraph_core::CiteGraphConfig;
use citegraph_ingest::Ingester;
use citegraph_provider::PaperProvider;
use citegraph_store::GraphState;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: CiteGraphConfig,
    pub graph: Arc<GraphState>,
    pub ingester: Ingester,
    pub provider_name: String,
}

impl AppState {
    pub fn new(config: CiteGraphConfig, provider: Arc<dyn PaperProvider>) -> Self {
        let graph = Arc::new(GraphState::new());
        let provider_name = provider.name().to_string();
        let ingester =
            Ingester::new(graph.clone(), provider).with_author_limit(config.author_limit);

        Self {
            config,
            graph,
            ingester,
            provider_name,
        }
    }
}
