//! Node-level commands: listening, peers, shutdown.
//!
//! `listen` and `is_listening` live on [`LitClient`] itself since they go
//! through the status cache.

use lit_core::DEFAULT_LISTEN_PORT;

use super::types::{
    AssignNicknameArgs, ConnectArgs, ListConnectionsReply, ListeningPortsReply, NoArgs, PeerInfo,
    StatusReply,
};
use super::{ASSIGN_NICKNAME, CONNECT, GET_LISTENING_PORTS, LIST_CONNECTIONS, STOP};
use crate::client::LitClient;
use crate::errors::Result;
use crate::transport::RpcTransport;
use crate::validate::ReplyCheck;

/// Build the `LNAddr` for [`LitClient::connect`].
///
/// The host is appended after `@` when given; the port only when it differs
/// from the default listen port.
pub fn ln_address(address: &str, host: Option<&str>, port: u16) -> String {
    match host {
        Some(host) if !host.is_empty() => {
            if port == DEFAULT_LISTEN_PORT {
                format!("{address}@{host}")
            } else {
                format!("{address}@{host}:{port}")
            }
        }
        _ => address.to_owned(),
    }
}

impl<T: RpcTransport> LitClient<T> {
    /// The node's LN address.
    pub async fn get_ln_address(&self) -> Result<String> {
        let reply: ListeningPortsReply = self
            .request(GET_LISTENING_PORTS, &NoArgs {}, ReplyCheck::Field("Adr"))
            .await?;
        Ok(reply.address.unwrap_or_default())
    }

    /// Connect the node to another node.
    ///
    /// Without a host the node looks the peer up through its tracker.
    pub async fn connect(&self, address: &str, host: Option<&str>, port: u16) -> Result<()> {
        let args = ConnectArgs {
            ln_addr: ln_address(address, host, port),
        };
        let _: StatusReply = self
            .request(CONNECT, &args, ReplyCheck::StatusPrefix("connected to peer"))
            .await?;
        Ok(())
    }

    /// Currently connected peers.
    pub async fn list_connections(&self) -> Result<Vec<PeerInfo>> {
        let reply: ListConnectionsReply =
            self.request(LIST_CONNECTIONS, &NoArgs {}, ReplyCheck::Any).await?;
        Ok(reply.connections.unwrap_or_default())
    }

    /// Give a connected peer a nickname.
    pub async fn assign_nickname(&self, peer: u32, nickname: &str) -> Result<()> {
        let args = AssignNicknameArgs {
            peer,
            nickname: nickname.to_owned(),
        };
        let _: StatusReply = self
            .request(ASSIGN_NICKNAME, &args, ReplyCheck::StatusPrefix("changed nickname"))
            .await?;
        Ok(())
    }

    /// Stop the node. It has to be restarted by hand afterwards.
    pub async fn stop(&self) -> Result<()> {
        let _: StatusReply = self
            .request(STOP, &NoArgs {}, ReplyCheck::StatusPrefix("Stopping lit node"))
            .await?;
        Ok(())
    }
}
