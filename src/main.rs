//! Categorizer HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use categorizer::catalog::{CategoryResolver, PostgresCategoryStore};
use categorizer::config::Config;
use categorizer::embedding::{Embedder, HttpEmbedder, StubEmbedder};
use categorizer::gateway::{HandlerState, create_router_with_state};
use categorizer::llm::GenaiGenerator;
use categorizer::pipeline::CategoryPipeline;
use categorizer::ranking::CategoryRanker;
use categorizer::retrieval::CandidateRetriever;
use categorizer::vectordb::QdrantNeighborIndex;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        model = %config.llm_model,
        "Categorizer starting"
    );

    match config.embedder_config() {
        Some(embedder_config) => {
            let embedder = HttpEmbedder::new(embedder_config)?;
            serve(config, embedder).await
        }
        None => {
            tracing::warn!(
                "No CATEGORIZER_EMBEDDING_ENDPOINT configured, running embedder in stub mode"
            );
            serve(config, StubEmbedder::default()).await
        }
    }
}

async fn serve<E: Embedder + 'static>(config: Config, embedder: E) -> anyhow::Result<()> {
    let addr: SocketAddr = config.socket_addr().parse()?;

    let index = QdrantNeighborIndex::new(&config.qdrant_url, config.neighbor_config())?;
    index.ensure_collection_exists().await?;
    tracing::info!(
        url = %config.qdrant_url,
        collection = %config.neighbor_collection,
        "Neighbor index ready"
    );

    let store = PostgresCategoryStore::connect(&config.database_url, config.store_config()).await?;
    let resolver = CategoryResolver::new(store, config.resolver_config())?;

    let retriever = CandidateRetriever::new(embedder, index, resolver, config.retriever_config());
    let ranker = CategoryRanker::new(
        Arc::new(GenaiGenerator::new(config.llm_model.clone())),
        config.ranker_config(),
    );

    let state = HandlerState::new(CategoryPipeline::new(retriever, ranker));
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Categorizer shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("CATEGORIZER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
