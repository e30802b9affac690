//! Linda Tuple Space Error Hierarchy
//!
//! The tuple-space engine itself cannot fail: `write` always succeeds and the
//! blocking operations wait until they are satisfied. Everything here belongs
//! to the layers around it (protocol parsing, the TCP transport, configuration
//! and process bootstrap).

use std::net::SocketAddr;

use config::ConfigError;
use tokio::task::JoinError;
use tokio_util::codec::LinesCodecError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Infrastructure-level failures (network, io, bootstrap)
    #[error(transparent)]
    System(#[from] SystemError),

    /// Configuration loading failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration values that loaded but did not validate
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Malformed request line
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Node failed to start: {0}")]
    NodeStartFailed(String),

    #[error("{0}")]
    SignalSenderClosed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Listening socket could not be bound
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Line framing failures (oversized line, socket error underneath)
    #[error(transparent)]
    Codec(#[from] LinesCodecError),

    /// Peer closed the connection before a reply arrived
    #[error("Connection closed by peer")]
    ConnectionClosed,

    /// Reply line that does not match the request that was sent
    #[error("Unexpected reply: {0:?}")]
    UnexpectedReply(String),

    /// Server answered `ERROR`
    #[error("Request rejected by server")]
    ServerRejected,

    #[error("Background task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("Empty request line")]
    EmptyLine,

    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    #[error("{command} is missing argument <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Service id {0:?} is not a decimal integer")]
    InvalidServiceId(String),
}

// ============== Conversion Implementations ============== //
impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        Error::System(SystemError::Network(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::System(SystemError::Io(e))
    }
}
