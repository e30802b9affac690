//! A builder for assembling a tuple space [`Node`].
//!
//! The [`NodeBuilder`] wires the engine, the service table and the TCP
//! listener together.
//!
//! ## Lifecycle
//! - `build()`: creates the [`Linda`] engine and binds the listener.
//! - `start_metrics_server()`: launches the Prometheus endpoint when enabled.
//! - `ready()`: returns the assembled [`Node`].
//!
//! ## Example
//! ```ignore
//! let (shutdown_tx, shutdown_rx) = watch::channel(());
//! let node = NodeBuilder::new(config, shutdown_rx)
//!     .build()
//!     .await?
//!     .start_metrics_server(shutdown_tx.subscribe())
//!     .ready()?;
//! node.run().await?;
//! ```

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;
use tracing::info;

use crate::metrics;
use crate::Linda;
use crate::LindaApi;
use crate::LindaConfig;
use crate::Node;
use crate::Result;
use crate::ServiceRegistry;
use crate::SystemError;
use crate::TcpServer;

pub struct NodeBuilder {
    pub(super) node_config: LindaConfig,
    pub(super) services: Option<ServiceRegistry>,
    pub(super) shutdown_signal: watch::Receiver<()>,

    pub(super) node: Option<Node>,
}

impl NodeBuilder {
    /// Starts from an already loaded and validated configuration.
    pub fn new(
        node_config: LindaConfig,
        shutdown_signal: watch::Receiver<()>,
    ) -> Self {
        Self {
            node_config,
            services: None,
            shutdown_signal,
            node: None,
        }
    }

    /// Replaces the built-in service table
    pub fn services(
        mut self,
        services: ServiceRegistry,
    ) -> Self {
        self.services = Some(services);
        self
    }

    /// Replaces the entire node configuration
    pub fn node_config(
        mut self,
        node_config: LindaConfig,
    ) -> Self {
        self.node_config = node_config;
        self
    }

    /// Creates the engine and binds the listening socket.
    ///
    /// # Errors
    /// Fails with [`NetworkError::Bind`](crate::NetworkError::Bind) when the
    /// listen address is unavailable.
    pub async fn build(mut self) -> Result<Self> {
        let services = self.services.take().unwrap_or_default();
        debug!(services = ?services.ids(), "service table");
        let linda = Arc::new(Linda::with_services(services));

        let address = self.node_config.server.resolved_listen_address();
        let api: Arc<dyn LindaApi> = linda.clone();
        let server = TcpServer::bind(address, api, self.node_config.server.max_line_length).await?;
        info!("bound tuple space listener on {}", server.local_addr()?);

        self.node = Some(Node {
            linda,
            server,
            ready: Arc::new(AtomicBool::new(false)),
            shutdown_signal: self.shutdown_signal.clone(),
            node_config: Arc::new(self.node_config.clone()),
        });
        Ok(self)
    }

    /// Launches the Prometheus endpoint on the configured port.
    ///
    /// Does nothing unless `monitoring.prometheus_enabled` is set.
    pub fn start_metrics_server(
        self,
        shutdown_signal: watch::Receiver<()>,
    ) -> Self {
        if !self.node_config.monitoring.prometheus_enabled {
            debug!("prometheus disabled, metrics server not started");
            return self;
        }
        let port = self.node_config.monitoring.prometheus_port;
        tokio::spawn(async move {
            metrics::start_server(port, shutdown_signal).await;
        });
        self
    }

    /// Returns the assembled node.
    ///
    /// # Errors
    /// Returns `SystemError::NodeStartFailed` if `build` has not run.
    pub fn ready(self) -> Result<Node> {
        self.node
            .ok_or_else(|| SystemError::NodeStartFailed("node has not been built".to_string()).into())
    }
}
