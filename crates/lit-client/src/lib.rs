//! # lit-client
//!
//! Client for the JSON-RPC interface a LIT node exposes over a single
//! WebSocket (`ws://<host>:<port>/ws`).
//!
//! - **Connection**: [`ConnectionManager`] owns the socket and the
//!   [`ConnectionState`] machine
//! - **Dispatch**: one task per connection owns the pending-call registry and
//!   correlates responses to callers by request id
//! - **Status cache**: [`StatusCache`] remembers whether the node listens for
//!   peers once that has been determined
//! - **Commands**: [`LitClient`] exposes the node's `LitRPC.*` procedures with
//!   typed payloads and per-command reply checks
//!
//! ```no_run
//! # async fn run() -> lit_client::Result<()> {
//! use lit_client::LitClient;
//!
//! let client = LitClient::new("localhost", 8001);
//! client.open().await?;
//! client.listen(2448).await?;
//! assert!(client.is_listening().await?);
//! for balance in client.list_balances().await? {
//!     println!("coin {}: {}", balance.coin_type, balance.txo_total);
//! }
//! client.close().await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod bytes;
pub mod client;
pub mod commands;
pub mod connection;
pub mod dispatcher;
pub mod errors;
pub mod status;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::LitClient;
pub use commands::types::*;
pub use connection::{ConnectionManager, ConnectionState};
pub use errors::{ClientError, Result};
pub use lit_settings::ClientSettings;
pub use status::{ListeningStatus, StatusCache};
pub use transport::RpcTransport;
pub use types::{RequestEnvelope, ResponseEnvelope};
pub use validate::ReplyCheck;
