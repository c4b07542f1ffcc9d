//! Connection lifecycle for the node's RPC socket.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lit_core::{RPC_ORIGIN, RPC_SUBPROTOCOL};
use lit_settings::ClientSettings;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, ORIGIN, SEC_WEBSOCKET_PROTOCOL};
use tokio_tungstenite::tungstenite::http::Request;
use tracing::{debug, info, warn};

use crate::dispatcher::{DispatchCommand, RequestIds, run_dispatch_loop};
use crate::errors::{ClientError, Result};
use crate::transport::RpcTransport;

/// Lifecycle of the client's single connection.
///
/// `Disconnected → Connecting → Open → Closing → Closed`, with a failed
/// handshake going from `Connecting` back to `Disconnected` and a transport
/// failure going from `Open` straight to `Closed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Never connected, or the last handshake failed.
    #[default]
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// Calls can be made.
    Open,
    /// Close handshake in progress.
    Closing,
    /// The socket has ended.
    Closed,
}

impl ConnectionState {
    /// Lower-case name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection state tagged with the attempt that set it.
///
/// A dispatch task only updates the state while its own attempt is current,
/// so a replaced connection winding down cannot clobber its successor.
#[derive(Debug, Default)]
pub(crate) struct StateCell {
    inner: RwLock<(u64, ConnectionState)>,
}

impl StateCell {
    pub(crate) fn get(&self) -> ConnectionState {
        self.inner.read().1
    }

    /// Start a new attempt and enter `Connecting`.
    pub(crate) fn begin_connect(&self) -> u64 {
        let mut inner = self.inner.write();
        inner.0 += 1;
        inner.1 = ConnectionState::Connecting;
        inner.0
    }

    /// Move to `next` if `generation` is still the current attempt.
    pub(crate) fn transition(&self, generation: u64, next: ConnectionState) -> bool {
        let mut inner = self.inner.write();
        if inner.0 != generation {
            return false;
        }
        if inner.1 != next {
            debug!(from = %inner.1, to = %next, "connection state changed");
            inner.1 = next;
        }
        true
    }
}

/// Handle to a live dispatch task.
struct Link {
    commands: mpsc::Sender<DispatchCommand>,
    task: JoinHandle<()>,
}

/// Owns the WebSocket to the node and routes calls through it.
///
/// Each instance is independent: its own socket, id counter and state.
pub struct ConnectionManager {
    settings: ClientSettings,
    state: Arc<StateCell>,
    ids: RequestIds,
    link: Mutex<Option<Link>>,
}

impl ConnectionManager {
    /// Manager for the endpoint described by `settings`. Nothing is opened yet.
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            settings,
            state: Arc::new(StateCell::default()),
            ids: RequestIds::default(),
            link: Mutex::new(None),
        }
    }

    /// Settings this manager connects with.
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Whether calls can currently be made.
    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// Id the next sent request will carry.
    pub fn next_request_id(&self) -> u64 {
        self.ids.peek()
    }

    /// Connect to the node.
    ///
    /// Opening while a connection is live replaces it; calls pending on the
    /// old connection fail with [`ClientError::ConnectionClosed`]. Settings
    /// that fail [`ClientSettings::validate`] are rejected before anything is
    /// touched.
    pub async fn open(&self) -> Result<()> {
        self.settings.validate()?;

        if let Some(previous) = self.link.lock().take() {
            retire(previous);
        }

        let url = self.settings.ws_url();
        let generation = self.state.begin_connect();
        info!(%url, "connecting to node");

        let request = match build_request(&url) {
            Ok(request) => request,
            Err(error) => {
                let _ = self.state.transition(generation, ConnectionState::Disconnected);
                return Err(error);
            }
        };

        let limit = self.settings.connect_timeout();
        let ws = match tokio::time::timeout(limit, connect_async(request)).await {
            Ok(Ok((ws, _response))) => ws,
            Ok(Err(error)) => {
                warn!(%url, %error, "connection failed");
                let _ = self.state.transition(generation, ConnectionState::Disconnected);
                return Err(error.into());
            }
            Err(_) => {
                warn!(%url, "connection attempt timed out");
                let _ = self.state.transition(generation, ConnectionState::Disconnected);
                return Err(ClientError::Timeout {
                    method: "open".into(),
                    timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                });
            }
        };

        let (commands, receiver) = mpsc::channel(self.settings.command_queue);
        let _ = self.state.transition(generation, ConnectionState::Open);
        let task = tokio::spawn(run_dispatch_loop(
            ws,
            receiver,
            self.ids.clone(),
            Arc::clone(&self.state),
            generation,
        ));
        *self.link.lock() = Some(Link { commands, task });
        info!(%url, "connected to node");
        Ok(())
    }

    /// Close the connection gracefully.
    ///
    /// Fails with [`ClientError::NotOpen`] when there is nothing to close.
    /// Calls still pending when the socket ends fail with
    /// [`ClientError::ConnectionClosed`].
    pub async fn close(&self) -> Result<()> {
        let Some(link) = self.link.lock().take() else {
            return Err(ClientError::NotOpen);
        };

        let (done_tx, done_rx) = oneshot::channel();
        if link
            .commands
            .send(DispatchCommand::Close { done: done_tx })
            .await
            .is_err()
        {
            debug!("dispatch task already stopped");
            return Ok(());
        }

        // A task that stops without answering has already torn the socket down.
        let outcome = done_rx.await.unwrap_or(Ok(()));
        let _ = link.task.await;
        outcome
    }

    /// Send `params` to `method` and wait for the correlated response.
    ///
    /// Fails immediately with [`ClientError::NotOpen`] when no connection is
    /// open; no request id is consumed in that case.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let commands = {
            let link = self.link.lock();
            match link.as_ref() {
                Some(link) if self.is_open() => link.commands.clone(),
                _ => return Err(ClientError::NotOpen),
            }
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        commands
            .send(DispatchCommand::Call {
                method: method.to_owned(),
                params,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ClientError::ConnectionClosed)?;

        let outcome = match self.settings.request_timeout() {
            Some(limit) => tokio::time::timeout(limit, reply_rx).await.map_err(|_| {
                warn!(method, "request timed out");
                ClientError::Timeout {
                    method: method.to_owned(),
                    timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }
            })?,
            None => reply_rx.await,
        };
        outcome.map_err(|_| ClientError::ConnectionClosed)?
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new(ClientSettings::default())
    }
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("url", &self.settings.ws_url())
            .field("state", &self.state())
            .field("next_request_id", &self.next_request_id())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RpcTransport for ConnectionManager {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        ConnectionManager::call(self, method, params).await
    }
}

/// Drop the link of a connection being replaced.
fn retire(previous: Link) {
    if previous.task.is_finished() {
        debug!("previous connection already ended");
    } else {
        warn!("open() called on a live connection, replacing it");
    }
    drop(previous);
}

/// Handshake request carrying the node's sub-protocol and origin.
fn build_request(url: &str) -> Result<Request<()>> {
    let mut request = url
        .into_client_request()
        .map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;
    let headers = request.headers_mut();
    let _ = headers.insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_static(RPC_SUBPROTOCOL));
    let _ = headers.insert(ORIGIN, HeaderValue::from_static(RPC_ORIGIN));
    Ok(request)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
