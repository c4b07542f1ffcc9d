//! Cached knowledge of whether the node listens for peer connections.

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::commands::types::{ListenArgs, ListeningPortsReply, NoArgs};
use crate::commands::{GET_LISTENING_PORTS, LISTEN};
use crate::errors::Result;
use crate::transport::{RpcTransport, invoke};
use crate::validate::ReplyCheck;

/// Tri-state listening status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListeningStatus {
    /// Not determined yet.
    #[default]
    Unknown,
    /// The node listens on at least one port.
    Listening,
    /// The node reported no listening ports.
    NotListening,
}

/// Remembers the listening status once it is known.
///
/// Only a successful `listen` or `is_listening` round trip changes the
/// status; failed calls leave it untouched.
#[derive(Debug, Default)]
pub struct StatusCache {
    status: Mutex<ListeningStatus>,
}

impl StatusCache {
    /// Cache in the `Unknown` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cached status.
    pub fn status(&self) -> ListeningStatus {
        *self.status.lock()
    }

    /// Cached answer to "is the node listening?", if known.
    pub fn cached(&self) -> Option<bool> {
        match self.status() {
            ListeningStatus::Unknown => None,
            ListeningStatus::Listening => Some(true),
            ListeningStatus::NotListening => Some(false),
        }
    }

    fn set(&self, next: ListeningStatus) {
        let mut status = self.status.lock();
        if *status != next {
            debug!(from = ?*status, to = ?next, "listening status changed");
            *status = next;
        }
    }

    /// Whether the node listens for peers.
    ///
    /// Answers from the cache when the status is known; otherwise asks the
    /// node once and caches the answer.
    pub async fn is_listening<T: RpcTransport + ?Sized>(&self, rpc: &T) -> Result<bool> {
        if let Some(known) = self.cached() {
            return Ok(known);
        }

        let reply: ListeningPortsReply =
            invoke(rpc, GET_LISTENING_PORTS, &NoArgs {}, ReplyCheck::Any).await?;
        let listening = reply.is_listening();
        self.set(if listening {
            ListeningStatus::Listening
        } else {
            ListeningStatus::NotListening
        });
        Ok(listening)
    }

    /// Ask the node to listen on `port`.
    ///
    /// A node that refuses because the address is already bound is already
    /// listening, so that error counts as success.
    pub async fn listen<T: RpcTransport + ?Sized>(&self, rpc: &T, port: u16) -> Result<()> {
        let outcome = invoke::<_, _, serde_json::Value>(
            rpc,
            LISTEN,
            &ListenArgs::on_port(port),
            ReplyCheck::Any,
        )
        .await;

        match outcome {
            Ok(_) => info!(port, "node listening"),
            Err(error) if error.is_address_in_use() => {
                debug!(port, "node already bound to listen port");
            }
            Err(error) => return Err(error),
        }
        self.set(ListeningStatus::Listening);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
