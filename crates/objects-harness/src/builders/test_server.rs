//! TestServer builder and handles for running scenarios offline.

use reqwest::Client;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{debug, error};

use crate::error::TestError;
use crate::model::DomainObject;
use crate::server::{objects_router, ObjectStore};

/// Error type for test server operations
#[derive(Debug, Error)]
pub enum TestServerError {
    #[error("Failed to start server: {0}")]
    ServerStartFailed(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<TestServerError> for TestError {
    fn from(err: TestServerError) -> Self {
        match err {
            TestServerError::IoError(e) => TestError::Io(e),
            other => TestError::TestSetupFailed(other.to_string()),
        }
    }
}

/// Builder for creating a test server.
#[derive(Debug, Default)]
pub struct TestServerBuilder {
    seed: Vec<DomainObject>,
}

impl TestServerBuilder {
    /// Creates a new TestServerBuilder with an empty store on a free port.
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects present before the first request.
    pub fn with_objects(mut self, objects: impl IntoIterator<Item = DomainObject>) -> Self {
        self.seed.extend(objects);
        self
    }

    /// Builds the test server and returns handles to interact with it.
    pub async fn build(self) -> Result<TestServerHandles, TestServerError> {
        let store = ObjectStore::new();
        for object in self.seed {
            store.insert(object);
        }

        let app = objects_router(store.clone());

        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        let listener = TcpListener::bind(addr).await?;
        let port = listener
            .local_addr()
            .map_err(|e| TestServerError::ServerStartFailed(e.to_string()))?
            .port();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let shutdown_future = async {
                shutdown_rx.await.ok();
            };

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_future)
                .await
                .unwrap_or_else(|e| error!("Server error: {}", e));
        });

        let base_url = format!("http://127.0.0.1:{}", port);
        debug!(%base_url, "Objects test server listening");

        Ok(TestServerHandles {
            base_url,
            client: Client::new(),
            store,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

/// Handles for interacting with a running test server.
pub struct TestServerHandles {
    /// Base URL of the test server.
    pub base_url: String,

    /// Pre-configured HTTP client for making requests to the test server.
    pub client: Client,

    /// Store backing the server, for direct inspection.
    pub store: ObjectStore,

    /// Shutdown transmitter for gracefully shutting down the server.
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl fmt::Debug for TestServerHandles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestServerHandles")
            .field("base_url", &self.base_url)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl TestServerHandles {
    /// Manually shut down the test server.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServerHandles {
    fn drop(&mut self) {
        self.shutdown();
    }
}
