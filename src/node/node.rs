//! A running tuple space server.
//!
//! ## Key Responsibilities
//! - Owns the shared [`Linda`] engine and the bound [`TcpServer`]
//! - Tracks readiness so callers can tell when connections are served
//! - Runs the accept loop until the shutdown signal fires
//!
//! ## Example Usage
//! ```ignore
//! let node = NodeBuilder::new(config, shutdown_rx).build().await?.ready()?;
//! node.run().await?;
//! ```

use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::Linda;
use crate::LindaConfig;
use crate::Result;
use crate::TcpServer;

pub struct Node {
    pub(crate) linda: Arc<Linda>,
    pub(crate) server: TcpServer,
    pub(crate) ready: Arc<AtomicBool>,
    pub(crate) shutdown_signal: watch::Receiver<()>,

    pub node_config: Arc<LindaConfig>,
}

impl Node {
    /// Serves clients until shutdown. Sessions still running when the
    /// signal fires are closed without waiting for their blocked calls.
    pub async fn run(self) -> Result<()> {
        let ready = self.ready.clone();
        ready.store(true, Ordering::SeqCst);

        let result = self.server.run(self.shutdown_signal).await;

        ready.store(false, Ordering::SeqCst);
        info!("node stopped");
        result
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.server.local_addr()
    }

    pub fn linda(&self) -> &Arc<Linda> {
        &self.linda
    }

    /// Shared flag flipped by [`Node::run`]; stays valid after `run` consumes the node.
    pub fn readiness(&self) -> Arc<AtomicBool> {
        self.ready.clone()
    }

    pub fn server_is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}
