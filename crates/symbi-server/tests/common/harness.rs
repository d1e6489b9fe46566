//! Test server harness.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use symbi::{AssessmentPipeline, FileStore, KvStore, MemoryStore, PipelineConfig};
use symbi_server::gateway::{HandlerState, create_router_with_state};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    /// `Some` serves from a [`FileStore`] rooted here; `None` uses a [`MemoryStore`].
    pub storage_path: Option<PathBuf>,
    pub processing_timeout: Duration,
    pub debug_routes: bool,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            storage_path: None,
            processing_timeout: Duration::from_secs(10),
            debug_routes: false,
        }
    }
}

impl TestServerConfig {
    pub fn with_storage(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn with_debug_routes(mut self) -> Self {
        self.debug_routes = true;
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    server_handle: Option<JoinHandle<()>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Signals shutdown and waits for the server task to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn find_available_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok(addr.port())
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
}

/// Keeps a temporary directory alive alongside a server that writes into it.
pub struct PersistentServer {
    pub server: TestServer,
    pub dir: TempDir,
}

/// Spawns a server on a random local port.
///
/// The background scorer is the real deterministic one, so assessments complete within a
/// few milliseconds of submission.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let pipeline_config = PipelineConfig {
        processing_timeout: config.processing_timeout,
        ..PipelineConfig::default()
    };

    match config.storage_path.clone() {
        Some(path) => spawn_with_store(FileStore::new(path), pipeline_config, &config).await,
        None => spawn_with_store(MemoryStore::new(), pipeline_config, &config).await,
    }
}

/// Spawns a file-backed server in a fresh temporary directory.
pub async fn spawn_persistent_server() -> Result<PersistentServer, ServerStartupError> {
    let dir = TempDir::new()?;
    let server = spawn_test_server(TestServerConfig::default().with_storage(dir.path())).await?;
    Ok(PersistentServer { server, dir })
}

async fn spawn_with_store<S: KvStore + Clone>(
    store: S,
    pipeline_config: PipelineConfig,
    config: &TestServerConfig,
) -> Result<TestServer, ServerStartupError> {
    let port = if config.port == 0 {
        find_available_port().await?
    } else {
        config.port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let state = HandlerState::new(AssessmentPipeline::new(store, pipeline_config))
        .with_debug_routes(config.debug_routes);
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
        server_handle: Some(server_handle),
        shutdown_tx: Some(shutdown_tx),
    })
}
