//! Client error types.

use lit_core::ADDRESS_IN_USE;
use lit_settings::SettingsError;
use serde_json::Value;
use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

/// Errors from connecting to the node or calling it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No connection is open; call `open()` first.
    #[error("Connection not open. Open connection first using open()")]
    NotOpen,

    /// Socket-level failure while opening, sending or closing.
    #[error("transport error: {0}")]
    Transport(#[source] Box<WsError>),

    /// The connection went away while the call was waiting for its response.
    #[error("connection closed before a response arrived")]
    ConnectionClosed,

    /// No response within the configured limit.
    #[error("timed out after {timeout_ms}ms waiting for {method}")]
    Timeout {
        /// Method (or `open`) that timed out.
        method: String,
        /// Limit that was exceeded.
        timeout_ms: u64,
    },

    /// The node answered with a non-null `error`, passed through unchanged.
    #[error("remote error: {}", render_remote(.0))]
    Remote(Value),

    /// The reply did not have the shape or content the command expects.
    #[error("Unexpected reply from server: {0}")]
    UnexpectedReply(String),

    /// The node reported `Success: false`.
    #[error("Server returned success=false: {0}")]
    Rejected(String),

    /// Payload or reply (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Host and port do not form a usable WebSocket URL.
    #[error("invalid RPC url: {0}")]
    InvalidUrl(String),

    /// The client settings cannot be used to open a connection.
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
}

impl From<WsError> for ClientError {
    fn from(err: WsError) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl ClientError {
    /// Text of a remote error, for matching against node messages.
    pub fn remote_message(&self) -> Option<String> {
        match self {
            Self::Remote(value) => Some(render_remote(value)),
            _ => None,
        }
    }

    /// Whether the node refused to listen because the port is already bound.
    pub fn is_address_in_use(&self) -> bool {
        self.remote_message()
            .is_some_and(|msg| msg.contains(ADDRESS_IN_USE))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

fn render_remote(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
