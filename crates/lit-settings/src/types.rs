//! Client settings types.

use std::time::Duration;

use lit_core::{DEFAULT_LISTEN_PORT, DEFAULT_RPC_HOST, DEFAULT_RPC_PORT, RPC_PATH};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Where and how to reach the node's RPC endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    /// RPC host.
    pub host: String,
    /// RPC port.
    pub port: u16,
    /// Port the node should listen on for peers when none is given.
    pub listen_port: u16,
    /// Per-request timeout in milliseconds. `None` waits as long as the
    /// connection stays up.
    pub request_timeout_ms: Option<u64>,
    /// Handshake timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Capacity of the queue between callers and the dispatch task.
    pub command_queue: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
            listen_port: DEFAULT_LISTEN_PORT,
            request_timeout_ms: None,
            connect_timeout_ms: 10_000,
            command_queue: 64,
        }
    }
}

impl ClientSettings {
    /// Settings for a specific host and port, everything else default.
    pub fn for_endpoint(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// WebSocket URL of the RPC endpoint.
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}{RPC_PATH}", self.host, self.port)
    }

    /// Request timeout as a [`Duration`], if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Handshake timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Reject values the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SettingsError::InvalidValue("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(SettingsError::InvalidValue("port must be non-zero".into()));
        }
        if self.listen_port == 0 {
            return Err(SettingsError::InvalidValue(
                "listenPort must be non-zero".into(),
            ));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(SettingsError::InvalidValue(
                "requestTimeoutMs must be positive or null".into(),
            ));
        }
        if self.command_queue == 0 {
            return Err(SettingsError::InvalidValue(
                "commandQueue must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
