//! Request correlation over the shared socket.
//!
//! Each open connection gets one dispatch task. The task owns both socket
//! halves and the [`PendingCalls`] registry; callers talk to it through an
//! `mpsc` channel and receive their outcome on a `oneshot`. Because only the
//! task touches the registry and allocates ids, no locks are needed around
//! either.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};

use crate::connection::{ConnectionState, StateCell};
use crate::errors::{ClientError, Result};
use crate::types::{RequestEnvelope, ResponseEnvelope};

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Where a caller's outcome is delivered.
pub type PendingTx = oneshot::Sender<Result<Value>>;

/// Monotonic request id source, shared across reconnects of one client.
#[derive(Clone, Debug, Default)]
pub struct RequestIds(Arc<AtomicU64>);

impl RequestIds {
    /// Take the next id (post-increment, starting at 0).
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// The id the next request will get.
    pub fn peek(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Registry of in-flight calls keyed by request id.
///
/// Entries are removed the moment they resolve, so each id is answered at
/// most once.
#[derive(Debug, Default)]
pub struct PendingCalls {
    calls: HashMap<u64, PendingTx>,
}

impl PendingCalls {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a call. Returns `false` (and leaves the existing entry) if `id`
    /// is already pending.
    pub fn register(&mut self, id: u64, reply: PendingTx) -> bool {
        if self.calls.contains_key(&id) {
            return false;
        }
        let _ = self.calls.insert(id, reply);
        true
    }

    /// Stop tracking a call without answering it.
    pub fn cancel(&mut self, id: u64) -> Option<PendingTx> {
        self.calls.remove(&id)
    }

    /// Deliver a response to its caller.
    ///
    /// Returns `false` when no call is pending under the response's id; such
    /// responses are dropped.
    pub fn resolve(&mut self, response: ResponseEnvelope) -> bool {
        let id = response.id;
        let Some(reply) = self.calls.remove(&id) else {
            debug!(id, "dropping response for unknown request id");
            return false;
        };
        let outcome = response.into_outcome().map_err(ClientError::Remote);
        debug!(id, ok = outcome.is_ok(), "response correlated");
        // The caller may have given up (timeout); nothing to do then.
        let _ = reply.send(outcome);
        true
    }

    /// Forget calls whose caller stopped waiting.
    pub fn prune_abandoned(&mut self) -> usize {
        let before = self.calls.len();
        self.calls.retain(|_, reply| !reply.is_closed());
        before - self.calls.len()
    }

    /// Reject every pending call with [`ClientError::ConnectionClosed`].
    pub fn fail_all(&mut self) -> usize {
        let count = self.calls.len();
        for (_, reply) in self.calls.drain() {
            let _ = reply.send(Err(ClientError::ConnectionClosed));
        }
        count
    }

    /// Number of calls awaiting a response.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Whether `id` is awaiting a response.
    pub fn contains(&self, id: u64) -> bool {
        self.calls.contains_key(&id)
    }
}

/// Message from a connection handle to its dispatch task.
pub(crate) enum DispatchCommand {
    /// Send a request and deliver its outcome to `reply`.
    Call {
        method: String,
        params: Value,
        reply: PendingTx,
    },
    /// Start the close handshake; `done` resolves once the socket is closed.
    Close {
        done: oneshot::Sender<Result<()>>,
    },
}

/// Decode a text frame and hand it to the registry.
pub(crate) fn handle_frame(pending: &mut PendingCalls, text: &str) {
    trace!(frame = text, "frame received");
    match serde_json::from_str::<ResponseEnvelope>(text) {
        Ok(response) => {
            let _ = pending.resolve(response);
        }
        Err(error) => warn!(%error, "ignoring undecodable frame"),
    }
}

/// Dispatch task body. Runs until the socket ends, a close completes, or
/// every handle is dropped.
pub(crate) async fn run_dispatch_loop(
    ws: WsStream,
    mut commands: mpsc::Receiver<DispatchCommand>,
    ids: RequestIds,
    state: Arc<StateCell>,
    generation: u64,
) {
    let (mut sink, mut stream) = ws.split();
    let mut pending = PendingCalls::new();
    let mut closing: Option<oneshot::Sender<Result<()>>> = None;
    let mut failure: Option<WsError> = None;

    loop {
        tokio::select! {
            command = commands.recv(), if closing.is_none() => {
                match command {
                    Some(DispatchCommand::Call { method, params, reply }) => {
                        let pruned = pending.prune_abandoned();
                        if pruned > 0 {
                            debug!(pruned, "pruned abandoned calls");
                        }
                        let id = ids.next();
                        let envelope = RequestEnvelope::new(method, params, id);
                        let frame = match serde_json::to_string(&envelope) {
                            Ok(frame) => frame,
                            Err(error) => {
                                let _ = reply.send(Err(error.into()));
                                continue;
                            }
                        };
                        let _ = pending.register(id, reply);
                        debug!(id, method = %envelope.method, "request sent");
                        if let Err(error) = sink.send(Message::Text(frame.into())).await {
                            warn!(id, %error, "failed to send request");
                            if let Some(reply) = pending.cancel(id) {
                                let _ = reply.send(Err(error.into()));
                            }
                        }
                    }
                    Some(DispatchCommand::Close { done }) => {
                        let _ = state.transition(generation, ConnectionState::Closing);
                        if let Err(error) = sink.send(Message::Close(None)).await {
                            let _ = done.send(Err(error.into()));
                            break;
                        }
                        closing = Some(done);
                    }
                    None => {
                        debug!("all connection handles dropped, shutting down");
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => handle_frame(&mut pending, &text),
                    Some(Ok(Message::Close(frame))) => {
                        debug!(?frame, "close frame received");
                    }
                    Some(Ok(_)) => {}
                    Some(Err(WsError::ConnectionClosed)) | None => break,
                    Some(Err(error)) => {
                        warn!(%error, "transport error");
                        failure = Some(error);
                        break;
                    }
                }
            }
        }
    }

    let _ = state.transition(generation, ConnectionState::Closed);
    let failed = pending.fail_all();
    if failed > 0 {
        warn!(failed, "connection ended with calls still pending");
    }
    if let Some(done) = closing {
        let outcome = match failure {
            Some(error) => Err(error.into()),
            None => Ok(()),
        };
        let _ = done.send(outcome);
    }
    info!("connection closed");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
