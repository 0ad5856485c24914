//! CiteGraph: in-memory citation graph explorer over Semantic Scholar.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use citegraph_core::CiteGraphConfig;
use citegraph_provider::SemanticScholarClient;
use citegraph_store::GraphQuery;

mod listing;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use state::AppState;

fn print_usage() {
    println!("CiteGraph: citation graph explorer");
    println!();
    println!("Usage: citegraph [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  add <paper-id>...        Ingest papers once and print the graph as JSON");
    println!("  help                     Show this help message");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);

    match command {
        None | Some("add") | Some("--add") => {}
        Some("--help") | Some("-h") | Some("help") => {
            print_usage();
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'citegraph help' for usage.", other);
            std::process::exit(1);
        }
    }

    let config = CiteGraphConfig::from_env()?;
    let provider = Arc::new(SemanticScholarClient::new(&config.provider)?);
    let state = Arc::new(AppState::new(config, provider));

    // One-shot CLI ingest
    if command.is_some() {
        if args.len() < 3 {
            eprintln!("Usage: citegraph add <paper-id>...");
            std::process::exit(1);
        }
        let ok = run_once(&state, &args[2..]).await?;
        std::process::exit(if ok { 0 } else { 1 });
    }

    let port = state.config.port;
    let app = routes::build_router(state.clone());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "CiteGraph server listening on {} (provider: {})",
        addr, state.config.provider.base_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Ingest each ID in order, printing every result and the final graph.
/// Returns false if any ingest failed.
async fn run_once(state: &AppState, paper_ids: &[String]) -> anyhow::Result<bool> {
    let mut ok = true;
    for paper_id in paper_ids {
        let result = state.ingester.add_root(paper_id).await;
        ok &= result.success;
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    let snapshot = GraphQuery::new(&state.graph).snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(ok)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
