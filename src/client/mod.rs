//! Async client for the line protocol.
//!
//! # Basic Usage
//! ```no_run
//! use linda_space::LindaClient;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut client = LindaClient::connect("127.0.0.1:54321").await.unwrap();
//!
//!     client.write("in", "abcdef").await.unwrap();
//!     client.exchange("in", "out", 1).await.unwrap();
//!
//!     let value = client.read("out").await.unwrap();
//!     println!("out = {}", value); // ABCDEF
//! }
//! ```
//!
//! `read`, `take` and `exchange` wait for the server, which may itself be
//! waiting for a tuple. Wrap calls in `tokio::time::timeout` when an upper
//! bound is needed.

use futures::SinkExt;
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio::net::ToSocketAddrs;
use tokio_util::codec::Framed;
use tokio_util::codec::LinesCodec;
use tracing::debug;

use crate::Command;
use crate::ExchangeStatus;
use crate::NetworkError;
use crate::Reply;
use crate::Result;
use crate::ServiceId;

/// One connection; requests on it are answered in order.
pub struct LindaClient {
    framed: Framed<TcpStream, LinesCodec>,
}

impl LindaClient {
    pub async fn connect(address: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(address).await.map_err(NetworkError::from)?;
        stream.set_nodelay(true).map_err(NetworkError::from)?;
        Ok(Self {
            framed: Framed::new(stream, LinesCodec::new()),
        })
    }

    /// `WR`
    pub async fn write(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let command = Command::Write {
            key: key.to_string(),
            value: value.to_string(),
        };
        match self.call(command).await? {
            Reply::Ok => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// `RD`
    pub async fn read(
        &mut self,
        key: &str,
    ) -> Result<String> {
        self.fetch(Command::Read { key: key.to_string() }).await
    }

    /// `IN`
    pub async fn take(
        &mut self,
        key: &str,
    ) -> Result<String> {
        self.fetch(Command::Take { key: key.to_string() }).await
    }

    /// `EX`
    pub async fn exchange(
        &mut self,
        key_in: &str,
        key_out: &str,
        service_id: ServiceId,
    ) -> Result<ExchangeStatus> {
        let command = Command::Exchange {
            key_in: key_in.to_string(),
            key_out: key_out.to_string(),
            service_id,
        };
        match self.call(command).await? {
            Reply::Ok => Ok(ExchangeStatus::Ok),
            Reply::NoService => Ok(ExchangeStatus::NoService),
            other => Err(unexpected(other)),
        }
    }

    /// Sends a raw line and returns the raw reply line.
    pub async fn send_line(
        &mut self,
        line: &str,
    ) -> Result<String> {
        self.framed.send(line).await.map_err(NetworkError::from)?;
        match self.framed.next().await {
            Some(Ok(reply)) => {
                debug!(request = line, reply = %reply, "round trip");
                Ok(reply)
            }
            Some(Err(e)) => Err(NetworkError::from(e).into()),
            None => Err(NetworkError::ConnectionClosed.into()),
        }
    }

    async fn fetch(
        &mut self,
        command: Command,
    ) -> Result<String> {
        match self.call(command).await? {
            Reply::Value(value) => Ok(value),
            other => Err(unexpected(other)),
        }
    }

    async fn call(
        &mut self,
        command: Command,
    ) -> Result<Reply> {
        let line = self.send_line(&command.encode()).await?;
        match Reply::parse(&line) {
            Some(Reply::Error) => Err(NetworkError::ServerRejected.into()),
            Some(reply) => Ok(reply),
            None => Err(NetworkError::UnexpectedReply(line).into()),
        }
    }
}

fn unexpected(reply: Reply) -> crate::Error {
    NetworkError::UnexpectedReply(reply.to_string()).into()
}
