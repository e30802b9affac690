use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::debug;
use tracing::error;
use tracing::info;

use super::Session;
use crate::LindaApi;
use crate::NetworkError;
use crate::Result;

/// Accept loop handing every connection to its own [`Session`] task.
pub struct TcpServer {
    listener: TcpListener,
    api: Arc<dyn LindaApi>,
    max_line_length: usize,
}

impl TcpServer {
    /// Binds the listening socket. Failing to bind is fatal for the process.
    pub async fn bind(
        address: SocketAddr,
        api: Arc<dyn LindaApi>,
        max_line_length: usize,
    ) -> Result<Self> {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|source| NetworkError::Bind { address, source })?;
        Ok(Self {
            listener,
            api,
            max_line_length,
        })
    }

    /// Address actually bound, useful when the configured port is 0
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr().map_err(NetworkError::from)?)
    }

    /// Accepts connections until `shutdown_signal` fires or its sender is dropped.
    pub async fn run(
        self,
        mut shutdown_signal: watch::Receiver<()>,
    ) -> Result<()> {
        info!("tuple space listening on {}", self.local_addr()?);

        loop {
            tokio::select! {
                _ = shutdown_signal.changed() => {
                    info!("tcp server stops accepting connections");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        if let Err(e) = stream.set_nodelay(true) {
                            debug!(%peer, "set_nodelay failed: {}", e);
                        }
                        let session = Session::new(stream, peer, self.api.clone(), self.max_line_length);
                        tokio::spawn(session.run(shutdown_signal.clone()));
                    }
                    Err(e) => {
                        // Per-connection failures (e.g. reset before accept) must not stop the loop.
                        error!("accept failed: {}", e);
                    }
                }
            }
        }

        Ok(())
    }
}
