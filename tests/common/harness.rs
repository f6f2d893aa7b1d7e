//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use categorizer::catalog::{CategoryResolver, MockCategoryStore, ResolverConfig};
use categorizer::embedding::StubEmbedder;
use categorizer::gateway::{HandlerState, create_router_with_state};
use categorizer::llm::MockTextGenerator;
use categorizer::pipeline::CategoryPipeline;
use categorizer::ranking::{CategoryRanker, RankerConfig};
use categorizer::retrieval::{CandidateRetriever, RetrieverConfig};
use categorizer::vectordb::MockNeighborIndex;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub const TEST_COLUMNS: [&str; 3] = ["c0_name", "c1_name", "c2_name"];

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub num_neighbors: u64,
    pub category_depth: usize,
    pub allow_trailing_nulls: bool,
    pub llm_reply: String,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            num_neighbors: 5,
            category_depth: TEST_COLUMNS.len(),
            allow_trailing_nulls: true,
            llm_reply: String::new(),
        }
    }
}

impl TestServerConfig {
    pub fn llm_reply(mut self, reply: &str) -> Self {
        self.llm_reply = reply.to_string();
        self
    }

    pub fn category_depth(mut self, depth: usize) -> Self {
        self.category_depth = depth;
        self
    }
}

/// Running server plus handles to its scripted backends.
pub struct TestServer {
    pub addr: SocketAddr,
    pub index: MockNeighborIndex,
    pub store: MockCategoryStore,
    pub generator: MockTextGenerator,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server whose backends are all in-memory: stub embedder, mock neighbor index,
/// mock category store and a scripted LLM.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let local_addr = listener.local_addr()?;

    let index = MockNeighborIndex::new();
    let store = MockCategoryStore::new();
    let generator = MockTextGenerator::replying(&config.llm_reply);

    let resolver_config = ResolverConfig::new(TEST_COLUMNS.iter().map(|c| c.to_string()).collect())
        .depth(config.category_depth)
        .allow_trailing_nulls(config.allow_trailing_nulls);
    let resolver = CategoryResolver::new(store.clone(), resolver_config)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let retriever = CandidateRetriever::new(
        StubEmbedder::default(),
        index.clone(),
        resolver,
        RetrieverConfig::default().num_neighbors(config.num_neighbors),
    );
    let ranker = CategoryRanker::new(Arc::new(generator.clone()), RankerConfig::default());

    let state = HandlerState::new(CategoryPipeline::new(retriever, ranker));
    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        index,
        store,
        generator,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
