use std::net::SocketAddr;
use std::sync::Arc;

use futures::SinkExt;
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_util::codec::AnyDelimiterCodec;
use tokio_util::codec::AnyDelimiterCodecError;
use tokio_util::codec::Framed;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::dispatch;
use crate::metrics::ACTIVE_SESSIONS;
use crate::metrics::MALFORMED_REQUESTS;
use crate::Command;
use crate::LindaApi;
use crate::NetworkError;
use crate::Reply;

/// One client connection.
///
/// Frames are raw bytes split on `\n`; each one is decoded as UTF-8 on its
/// own, so a line with invalid bytes is answered with `ERROR` and the
/// connection stays usable.
pub(crate) struct Session {
    peer: SocketAddr,
    api: Arc<dyn LindaApi>,
    framed: Framed<TcpStream, AnyDelimiterCodec>,
}

impl Session {
    pub(crate) fn new(
        stream: TcpStream,
        peer: SocketAddr,
        api: Arc<dyn LindaApi>,
        max_line_length: usize,
    ) -> Self {
        let codec = AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), b"\n".to_vec(), max_line_length);
        Self {
            peer,
            api,
            framed: Framed::new(stream, codec),
        }
    }

    /// Serves requests until the peer disconnects or shutdown is signalled.
    pub(crate) async fn run(
        mut self,
        mut shutdown_signal: watch::Receiver<()>,
    ) {
        ACTIVE_SESSIONS.inc();
        info!(peer = %self.peer, "session opened");

        loop {
            let next = tokio::select! {
                _ = shutdown_signal.changed() => {
                    debug!(peer = %self.peer, "shutdown signal received, closing session");
                    break;
                }
                next = self.framed.next() => next,
            };

            // The codec stops yielding frames after an error, so a framing
            // error ends the session once its reply is sent.
            let mut close_after_reply = false;
            let reply = match next {
                None => break,
                Some(Ok(frame)) => {
                    let line = frame.strip_suffix(b"\r").unwrap_or(&frame[..]);
                    if line.is_empty() {
                        continue;
                    }
                    match std::str::from_utf8(line) {
                        Ok(line) => match self.serve(line, &mut shutdown_signal).await {
                            Some(reply) => reply,
                            None => break,
                        },
                        Err(e) => {
                            MALFORMED_REQUESTS.inc();
                            debug!(peer = %self.peer, "request line is not utf-8: {}", e);
                            Reply::Error
                        }
                    }
                }
                Some(Err(AnyDelimiterCodecError::MaxChunkLengthExceeded)) => {
                    MALFORMED_REQUESTS.inc();
                    debug!(peer = %self.peer, "request line too long");
                    close_after_reply = true;
                    Reply::Error
                }
                Some(Err(AnyDelimiterCodecError::Io(e))) => {
                    debug!(peer = %self.peer, "read failed: {}", e);
                    break;
                }
            };

            if let Err(e) = self.framed.send(reply.to_string()).await {
                debug!(peer = %self.peer, "write failed: {}", e);
                break;
            }
            if close_after_reply {
                break;
            }
        }

        ACTIVE_SESSIONS.dec();
        info!(peer = %self.peer, "session closed");
    }

    /// Parses and executes one line. `None` means the session must close
    /// without replying: shutdown fired, the peer went away while the call
    /// was suspended, or the blocking task failed.
    async fn serve(
        &self,
        line: &str,
        shutdown_signal: &mut watch::Receiver<()>,
    ) -> Option<Reply> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                MALFORMED_REQUESTS.inc();
                debug!(peer = %self.peer, "malformed request: {}", e);
                return Some(Reply::Error);
            }
        };

        // WR never suspends. Keeping it off the blocking pool means a pool
        // full of parked readers cannot hold back the write that frees them.
        if let Command::Write { .. } = command {
            return Some(dispatch(self.api.as_ref(), command));
        }

        let api = self.api.clone();
        let mut pending = tokio::task::spawn_blocking(move || dispatch(api.as_ref(), command));
        let mut watch_peer = true;

        loop {
            tokio::select! {
                _ = shutdown_signal.changed() => {
                    debug!(peer = %self.peer, "shutdown while a call is suspended");
                    return None;
                }
                joined = &mut pending => {
                    return match joined {
                        Ok(reply) => Some(reply),
                        Err(e) => {
                            warn!(peer = %self.peer, "request aborted: {}", NetworkError::from(e));
                            None
                        }
                    };
                }
                open = peer_open(self.framed.get_ref()), if watch_peer => {
                    if !open {
                        info!(peer = %self.peer, "peer left while its call was suspended");
                        return None;
                    }
                    // Pipelined bytes are waiting; they are read after the reply.
                    watch_peer = false;
                }
            }
        }
    }
}

/// Resolves when the socket becomes readable: `false` on EOF or error,
/// `true` when request bytes are waiting.
async fn peer_open(stream: &TcpStream) -> bool {
    let mut probe = [0u8; 1];
    matches!(stream.peek(&mut probe).await, Ok(n) if n > 0)
}
