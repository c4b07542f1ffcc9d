//! Package-level and protocol constants.

/// Current version of the client (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default host of the node's RPC endpoint.
pub const DEFAULT_RPC_HOST: &str = "localhost";

/// Default port of the node's RPC endpoint.
pub const DEFAULT_RPC_PORT: u16 = 8001;

/// Default port the node listens on for inbound peer connections.
pub const DEFAULT_LISTEN_PORT: u16 = 2448;

/// Path of the RPC endpoint on the node.
pub const RPC_PATH: &str = "/ws";

/// WebSocket sub-protocol token negotiated with the node.
pub const RPC_SUBPROTOCOL: &str = "echo-protocol";

/// `Origin` header sent during the WebSocket handshake.
pub const RPC_ORIGIN: &str = "http://localhost/";

/// Error substring the node reports when asked to listen on a port it
/// already holds.
pub const ADDRESS_IN_USE: &str = "bind: address already in use";

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
