//! Helpers shared by unit tests that need a live server.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::LindaConfig;
use crate::NodeBuilder;
use crate::Result;

pub(crate) const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default config listening on an ephemeral loopback port.
pub(crate) fn local_config() -> LindaConfig {
    let mut config = LindaConfig::default();
    config.server.listen_address = SocketAddr::from(([127, 0, 0, 1], 0));
    config
}

/// A node running in the background.
///
/// Dropping `shutdown_tx` stops the server, so tests keep it alive until done.
pub(crate) struct RunningNode {
    pub(crate) addr: SocketAddr,
    pub(crate) shutdown_tx: watch::Sender<()>,
    pub(crate) handle: JoinHandle<Result<()>>,
}

pub(crate) async fn start_node(config: LindaConfig) -> RunningNode {
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let node = NodeBuilder::new(config, shutdown_rx)
        .build()
        .await
        .expect("build node")
        .ready()
        .expect("node ready");
    let addr = node.local_addr().expect("local addr");
    let handle = tokio::spawn(node.run());
    RunningNode {
        addr,
        shutdown_tx,
        handle,
    }
}
