//! The client facade: one connection, one status cache, the command catalog.

use lit_settings::ClientSettings;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::connection::{ConnectionManager, ConnectionState};
use crate::errors::Result;
use crate::status::{ListeningStatus, StatusCache};
use crate::transport::{RpcTransport, invoke};
use crate::validate::ReplyCheck;

/// Client for one LIT node.
///
/// Instances are independent of each other; each owns its own connection,
/// request ids and listening status. Commands are grouped by concern in the
/// [`commands`](crate::commands) modules.
#[derive(Debug)]
pub struct LitClient<T = ConnectionManager> {
    rpc: T,
    status: StatusCache,
    listen_port: u16,
}

impl LitClient<ConnectionManager> {
    /// Client for the node at `ws://<host>:<port>/ws`. Nothing is opened yet.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_settings(ClientSettings::for_endpoint(host, port))
    }

    /// Client configured from loaded settings.
    pub fn with_settings(settings: ClientSettings) -> Self {
        let listen_port = settings.listen_port;
        Self::with_transport(ConnectionManager::new(settings), listen_port)
    }

    /// Open the connection to the node.
    pub async fn open(&self) -> Result<()> {
        self.rpc.open().await
    }

    /// Close the connection to the node.
    pub async fn close(&self) -> Result<()> {
        self.rpc.close().await
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.rpc.state()
    }
}

impl Default for LitClient<ConnectionManager> {
    fn default() -> Self {
        Self::with_settings(ClientSettings::default())
    }
}

impl<T: RpcTransport> LitClient<T> {
    /// Client over an arbitrary transport.
    pub fn with_transport(rpc: T, listen_port: u16) -> Self {
        Self {
            rpc,
            status: StatusCache::new(),
            listen_port,
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.rpc
    }

    /// Port [`listen_on_default_port`](Self::listen_on_default_port) uses.
    pub fn listen_port(&self) -> u16 {
        self.listen_port
    }

    /// Raw call: send `params` to `method` and return the reply unvalidated.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        self.rpc.call(method, params).await
    }

    pub(crate) async fn request<P, R>(&self, method: &str, payload: &P, check: ReplyCheck) -> Result<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        invoke(&self.rpc, method, payload, check).await
    }

    /// Ask the node to listen for peers on `port`. Succeeds if the node is
    /// already bound to that port.
    pub async fn listen(&self, port: u16) -> Result<()> {
        self.status.listen(&self.rpc, port).await
    }

    /// [`listen`](Self::listen) on the configured listen port.
    pub async fn listen_on_default_port(&self) -> Result<()> {
        self.listen(self.listen_port).await
    }

    /// Whether the node listens for peers; cached once known.
    pub async fn is_listening(&self) -> Result<bool> {
        self.status.is_listening(&self.rpc).await
    }

    /// Cached listening status without contacting the node.
    pub fn listening_status(&self) -> ListeningStatus {
        self.status.status()
    }
}
