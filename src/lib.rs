//! # linda-space
//!
//! A Linda-style tuple space served over TCP.
//!
//! Clients store string tuples under string keys and retrieve them with
//! blocking reads and destructive takes. An exchange operation takes a
//! tuple, runs it through a numbered transformation service and publishes
//! the result under another key.
//!
//! ## Crate Layout
//! - [`TupleSpace`]: the blocking key/FIFO store
//! - [`ServiceRegistry`]: transformation services addressed by id
//! - [`ExchangeCoordinator`]: take, transform, write
//! - [`Command`] / [`Reply`]: the line protocol
//! - [`TcpServer`], [`NodeBuilder`], [`Node`]: the server process
//! - [`LindaClient`]: async client
//! - [`LindaConfig`]: layered configuration

mod client;
mod config;
mod constants;
mod errors;
mod exchange;
mod network;
mod node;
mod protocol;
mod service;
mod space;

pub mod metrics;
pub mod utils;

pub use client::*;
pub use config::*;
pub use constants::*;
pub use errors::*;
pub use exchange::*;
pub use network::*;
pub use node::*;
pub use protocol::*;
pub use service::*;
pub use space::*;
pub use utils::*;

#[cfg(test)]
pub(crate) mod test_utils;
