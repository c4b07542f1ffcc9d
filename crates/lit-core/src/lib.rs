//! # lit-core
//!
//! Shared vocabulary for the LIT node client crates:
//!
//! - **Constants**: default RPC host and ports, the WebSocket sub-protocol
//!   token and the `Origin` header the node expects
//! - **Logging**: `tracing` subscriber setup and an in-memory capture layer
//!   for asserting on log output in tests

#![deny(unsafe_code)]

pub mod constants;
pub mod logging;

pub use constants::*;
