//! Payment channel commands.

use super::types::{
    ChanArgs, ChannelInfo, ChannelListReply, ChannelState, FundArgs, JusticeTx, NoArgs, PushArgs,
    PushReply, StateDumpReply, StatusReply,
};
use super::{BREAK_CHANNEL, CHANNEL_LIST, CLOSE_CHANNEL, FUND_CHANNEL, PUSH, STATE_DUMP};
use crate::bytes::{STATE_DATA_LEN, pad_to, to_hex};
use crate::client::LitClient;
use crate::errors::{ClientError, Result};
use crate::transport::RpcTransport;
use crate::validate::ReplyCheck;

impl From<JusticeTx> for ChannelState {
    fn from(tx: JusticeTx) -> Self {
        let hex = |bytes: Option<Vec<u8>>| to_hex(bytes.as_deref().unwrap_or_default());
        Self {
            signature_hex: hex(tx.sig),
            txid_hex: hex(tx.txid),
            amount: tx.amt,
            data_hex: hex(tx.data),
            pkh_hex: hex(tx.pkh),
            index: tx.idx,
        }
    }
}

impl<T: RpcTransport> LitClient<T> {
    /// All channels, open and closed.
    pub async fn list_channels(&self) -> Result<Vec<ChannelInfo>> {
        let reply: ChannelListReply = self
            .request(CHANNEL_LIST, &NoArgs {}, ReplyCheck::Field("Channels"))
            .await?;
        Ok(reply.channels.unwrap_or_default())
    }

    /// Open a channel with `peer` funded with `amount` satoshi, pushing
    /// `initial_send` to the peer right away. `data` is attached to the
    /// initial state.
    pub async fn fund_channel(
        &self,
        peer: u32,
        coin_type: u32,
        amount: i64,
        initial_send: i64,
        data: &[u8],
    ) -> Result<()> {
        let args = FundArgs {
            peer,
            coin_type,
            capacity: amount,
            roundup: 0,
            initial_send,
            data: pad_to(data, STATE_DATA_LEN),
        };
        let _: StatusReply = self
            .request(FUND_CHANNEL, &args, ReplyCheck::StatusPrefix("funded channel"))
            .await?;
        Ok(())
    }

    /// Every stored state of every channel.
    pub async fn state_dump(&self) -> Result<Vec<ChannelState>> {
        let reply: StateDumpReply = self
            .request(STATE_DUMP, &NoArgs {}, ReplyCheck::Field("Txs"))
            .await?;
        Ok(reply
            .txs
            .unwrap_or_default()
            .into_iter()
            .map(ChannelState::from)
            .collect())
    }

    /// Push `amount` satoshi through `channel`. Returns the new state index.
    pub async fn push(&self, channel: u32, amount: i64, data: &[u8]) -> Result<u64> {
        let args = PushArgs {
            chan_idx: channel,
            amt: amount,
            data: pad_to(data, STATE_DATA_LEN),
        };
        let reply: PushReply = self.request(PUSH, &args, ReplyCheck::Field("StateIndex")).await?;
        reply
            .state_index
            .ok_or_else(|| ClientError::UnexpectedReply("StateIndex is null".into()))
    }

    /// Close `channel` cooperatively, returning its funds to the wallet.
    pub async fn close_channel(&self, channel: u32) -> Result<()> {
        let _: StatusReply = self
            .request(
                CLOSE_CHANNEL,
                &ChanArgs { chan_idx: channel },
                ReplyCheck::StatusPrefix("OK closed"),
            )
            .await?;
        Ok(())
    }

    /// Close `channel` unilaterally.
    pub async fn break_channel(&self, channel: u32) -> Result<()> {
        let _: StatusReply = self
            .request(
                BREAK_CHANNEL,
                &ChanArgs { chan_idx: channel },
                ReplyCheck::StatusEquals(""),
            )
            .await?;
        Ok(())
    }
}
