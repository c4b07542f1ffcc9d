//! On-chain wallet commands.

use super::types::{
    AddressArgs, AddressReply, BalanceReply, CoinArgs, CoinBalance, FeeReply, NoArgs, SendArgs,
    SetFeeArgs, TxidsReply, TxoInfo, TxoListReply,
};
use super::{ADDRESS, BALANCE, GET_FEE, SEND, SET_FEE, TXO_LIST};
use crate::client::LitClient;
use crate::errors::{ClientError, Result};
use crate::transport::RpcTransport;
use crate::validate::ReplyCheck;

impl<T: RpcTransport> LitClient<T> {
    /// Wallet balance for each coin the node supports.
    pub async fn list_balances(&self) -> Result<Vec<CoinBalance>> {
        let reply: BalanceReply = self
            .request(BALANCE, &NoArgs {}, ReplyCheck::Field("Balances"))
            .await?;
        Ok(reply.balances.unwrap_or_default())
    }

    /// Unspent outputs that are not part of a channel.
    pub async fn list_utxos(&self) -> Result<Vec<TxoInfo>> {
        let reply: TxoListReply = self
            .request(TXO_LIST, &NoArgs {}, ReplyCheck::Field("Txos"))
            .await?;
        Ok(reply.txos.unwrap_or_default())
    }

    /// Send `amount` satoshi to `address` on-chain. Returns the txid.
    pub async fn send(&self, address: &str, amount: i64) -> Result<String> {
        let args = SendArgs {
            dest_addrs: vec![address.to_owned()],
            amts: vec![amount],
        };
        let reply: TxidsReply = self.request(SEND, &args, ReplyCheck::Field("Txids")).await?;
        reply
            .txids
            .and_then(|txids| txids.into_iter().next())
            .ok_or_else(|| ClientError::UnexpectedReply("no txid in send reply".into()))
    }

    /// Set the fee rate (satoshi per byte) for `coin_type`.
    pub async fn set_fee(&self, coin_type: u32, fee_per_byte: i64) -> Result<()> {
        let args = SetFeeArgs {
            fee: fee_per_byte,
            coin_type,
        };
        let reply: FeeReply = self
            .request(SET_FEE, &args, ReplyCheck::Field("CurrentFee"))
            .await?;
        if reply.current_fee == Some(fee_per_byte) {
            Ok(())
        } else {
            Err(ClientError::UnexpectedReply("Fee was not set".into()))
        }
    }

    /// Fee rate (satoshi per byte) in effect for `coin_type`.
    pub async fn get_fee(&self, coin_type: u32) -> Result<i64> {
        let reply: FeeReply = self
            .request(GET_FEE, &CoinArgs { coin_type }, ReplyCheck::Field("CurrentFee"))
            .await?;
        reply
            .current_fee
            .ok_or_else(|| ClientError::UnexpectedReply("CurrentFee is null".into()))
    }

    /// Generate `count` new addresses, or list the known ones when `count`
    /// is 0. Bech32 unless `legacy` is set.
    pub async fn get_addresses(&self, coin_type: u32, count: u32, legacy: bool) -> Result<Vec<String>> {
        let args = AddressArgs {
            num_to_make: count,
            coin_type,
        };
        let reply: AddressReply = self
            .request(ADDRESS, &args, ReplyCheck::Fields(&["LegacyAddresses", "WitAddresses"]))
            .await?;
        let addresses = if legacy {
            reply.legacy_addresses
        } else {
            reply.wit_addresses
        };
        Ok(addresses.unwrap_or_default())
    }
}
