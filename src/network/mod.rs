//! TCP transport for the line protocol.
//!
//! One tokio task serves each connection and handles its requests strictly
//! in order. Engine calls may block for an unbounded time, so they run on
//! tokio's blocking pool and never on an async worker thread.

mod dispatcher;
mod session;
mod tcp_server;
pub use dispatcher::*;
pub(crate) use session::*;
pub use tcp_server::*;
