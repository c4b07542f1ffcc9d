//! Request and reply records of the node's `LitRPC` procedures.
//!
//! Field names follow the node's wire format (`PascalCase`). Lists the node
//! may send as `null` are `Option`s and read through accessor methods on the
//! command layer.

use serde::{Deserialize, Serialize};

// ── Shared ──────────────────────────────────────────────────────────────────

/// Payload for procedures that take no arguments.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NoArgs {}

/// Reply carrying only a human-readable status line.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatusReply {
    /// Status text; success is signalled by a known prefix.
    pub status: Option<String>,
}

/// Reply carrying only a success flag.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SuccessReply {
    /// Whether the node performed the operation.
    pub success: Option<bool>,
}

// ── Node ────────────────────────────────────────────────────────────────────

/// Arguments for `LitRPC.Listen`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListenArgs {
    /// Listen address, `":<port>"`.
    pub port: String,
}

impl ListenArgs {
    /// Listen on all interfaces at `port`.
    pub fn on_port(port: u16) -> Self {
        Self {
            port: format!(":{port}"),
        }
    }
}

/// Reply of `LitRPC.GetListeningPorts` and `LitRPC.Listen`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListeningPortsReply {
    /// Addresses the node listens on; `None` or empty when not listening.
    #[serde(rename = "LisIpPorts")]
    pub listening_ports: Option<Vec<String>>,
    /// The node's LN address.
    #[serde(rename = "Adr")]
    pub address: Option<String>,
}

impl ListeningPortsReply {
    /// Whether the node reports at least one listening address.
    pub fn is_listening(&self) -> bool {
        self.listening_ports.as_ref().is_some_and(|ports| !ports.is_empty())
    }
}

/// Arguments for `LitRPC.Connect`.
#[derive(Clone, Debug, Serialize)]
pub struct ConnectArgs {
    /// `address[@host[:port]]`.
    #[serde(rename = "LNAddr")]
    pub ln_addr: String,
}

/// A connected peer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PeerInfo {
    /// Unique peer number.
    pub peer_number: u32,
    /// Remote endpoint.
    pub remote_host: String,
    /// Nickname assigned to the peer.
    pub nickname: String,
}

/// Reply of `LitRPC.ListConnections`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListConnectionsReply {
    /// Connected peers.
    #[serde(rename = "Connections")]
    pub connections: Option<Vec<PeerInfo>>,
    /// Our public key hash.
    #[serde(rename = "MyPKH")]
    pub my_pkh: Option<String>,
}

/// Arguments for `LitRPC.AssignNickname`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssignNicknameArgs {
    /// Peer index.
    pub peer: u32,
    /// New nickname.
    pub nickname: String,
}

// ── Wallet ──────────────────────────────────────────────────────────────────

/// Balance of one coin type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CoinBalance {
    /// Coin type.
    pub coin_type: u32,
    /// Height the wallet is synced to.
    pub sync_height: i32,
    /// Funds locked in channels.
    pub chan_total: i64,
    /// Funds in unspent outputs.
    pub txo_total: i64,
    /// Mature segwit funds.
    pub mature_witty: i64,
    /// Fee rate in satoshi per byte.
    pub fee_rate: i64,
}

/// Reply of `LitRPC.Balance`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BalanceReply {
    /// One entry per coin the node supports.
    pub balances: Option<Vec<CoinBalance>>,
}

/// An unspent output outside any channel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TxoInfo {
    /// `txid;index`.
    pub out_point: String,
    /// Amount in satoshi.
    #[serde(alias = "Am")]
    pub amt: i64,
    /// Confirmation height.
    pub height: i32,
    /// Relative timelock.
    pub delay: i32,
    /// Coin type name.
    pub coin_type: String,
    /// Whether the output is segwit.
    pub witty: bool,
    /// Derivation path of the key.
    pub key_path: String,
}

/// Reply of `LitRPC.TxoList`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TxoListReply {
    /// Unspent outputs.
    pub txos: Option<Vec<TxoInfo>>,
}

/// Arguments for `LitRPC.Send`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendArgs {
    /// Destination addresses.
    pub dest_addrs: Vec<String>,
    /// Amounts in satoshi, one per address.
    pub amts: Vec<i64>,
}

/// Reply carrying transaction ids.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TxidsReply {
    /// Transaction ids.
    pub txids: Option<Vec<String>>,
}

/// Arguments for `LitRPC.SetFee`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetFeeArgs {
    /// Fee in satoshi per byte.
    pub fee: i64,
    /// Coin type.
    pub coin_type: u32,
}

/// Arguments for `LitRPC.GetFee`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoinArgs {
    /// Coin type.
    pub coin_type: u32,
}

/// Reply of `LitRPC.SetFee` and `LitRPC.GetFee`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeeReply {
    /// Fee in effect, satoshi per byte.
    pub current_fee: Option<i64>,
}

/// Arguments for `LitRPC.Address`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressArgs {
    /// New addresses to generate; 0 lists existing ones.
    pub num_to_make: u32,
    /// Coin type.
    pub coin_type: u32,
}

/// Reply of `LitRPC.Address`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AddressReply {
    /// Bech32 addresses.
    pub wit_addresses: Option<Vec<String>>,
    /// Legacy addresses.
    pub legacy_addresses: Option<Vec<String>>,
}

// ── Channels ────────────────────────────────────────────────────────────────

/// A payment channel, open or closed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChannelInfo {
    /// Funding outpoint.
    pub out_point: String,
    /// Coin type.
    pub coin_type: u32,
    /// Whether the channel is closed.
    pub closed: bool,
    /// Total capacity in satoshi.
    pub capacity: i64,
    /// Our side of the balance.
    pub my_balance: i64,
    /// Funding confirmation height.
    pub height: i32,
    /// Current state number.
    pub state_num: i64,
    /// Index of the peer.
    pub peer_idx: u32,
    /// Index of the channel.
    pub c_idx: u32,
    /// Peer identifier.
    #[serde(rename = "PeerID")]
    pub peer_id: String,
    /// Data attached to the current state.
    pub data: Option<Vec<u8>>,
    /// Public key hash of the current state.
    pub pkh: Option<Vec<u8>>,
}

/// Reply of `LitRPC.ChannelList`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChannelListReply {
    /// Known channels.
    pub channels: Option<Vec<ChannelInfo>>,
}

/// Arguments for `LitRPC.FundChannel`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FundArgs {
    /// Peer to open the channel with.
    pub peer: u32,
    /// Coin type.
    pub coin_type: u32,
    /// Channel capacity in satoshi.
    pub capacity: i64,
    /// Rounding applied by the node when selecting inputs.
    pub roundup: i64,
    /// Amount pushed to the peer on funding.
    pub initial_send: i64,
    /// State data, padded to 32 bytes.
    pub data: Vec<u8>,
}

/// A stored justice transaction as the node returns it.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JusticeTx {
    /// Signature.
    pub sig: Option<Vec<u8>>,
    /// Transaction id.
    pub txid: Option<Vec<u8>>,
    /// Amount in satoshi.
    pub amt: i64,
    /// Attached state data.
    pub data: Option<Vec<u8>>,
    /// Public key hash.
    pub pkh: Option<Vec<u8>>,
    /// State index.
    pub idx: u64,
}

/// Reply of `LitRPC.StateDump`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StateDumpReply {
    /// Stored states.
    pub txs: Option<Vec<JusticeTx>>,
}

/// A past channel state with byte fields rendered as hex.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChannelState {
    /// Signature, hex.
    pub signature_hex: String,
    /// Transaction id, hex.
    pub txid_hex: String,
    /// Amount in satoshi.
    pub amount: i64,
    /// Attached data, hex.
    pub data_hex: String,
    /// Public key hash, hex.
    pub pkh_hex: String,
    /// State index.
    pub index: u64,
}

/// Arguments for `LitRPC.Push`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PushArgs {
    /// Channel index.
    pub chan_idx: u32,
    /// Amount in satoshi.
    pub amt: i64,
    /// State data, padded to 32 bytes.
    pub data: Vec<u8>,
}

/// Reply of `LitRPC.Push`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PushReply {
    /// Index of the new channel state.
    pub state_index: Option<u64>,
}

/// Arguments naming a single channel.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChanArgs {
    /// Channel index.
    pub chan_idx: u32,
}

// ── Oracles and offers ──────────────────────────────────────────────────────

/// An oracle known to the node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DlcOracle {
    /// Index for referencing in commands.
    pub idx: u64,
    /// Public key.
    pub a: Option<Vec<u8>>,
    /// Display name.
    pub name: String,
    /// Base URL for REST oracles.
    pub url: String,
}

/// Arguments for `LitRPC.ImportOracle`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportOracleArgs {
    /// REST endpoint of the oracle.
    pub url: String,
    /// Display name.
    pub name: String,
}

/// Arguments for `LitRPC.AddOracle`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddOracleArgs {
    /// Public key, 33 bytes hex.
    pub key: String,
    /// Display name.
    pub name: String,
}

/// Reply of `LitRPC.ImportOracle` and `LitRPC.AddOracle`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OracleReply {
    /// The stored oracle.
    pub oracle: Option<DlcOracle>,
}

/// Reply of `LitRPC.ListOracles`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListOraclesReply {
    /// Known oracles.
    pub oracles: Option<Vec<DlcOracle>>,
}

/// Payout for one oracle value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DlcContractDivision {
    /// Oracle value.
    pub oracle_value: i64,
    /// What we receive at that value.
    pub value_ours: i64,
}

/// Offer for a symmetrically funded forward contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DlcFwdOffer {
    /// Offer type tag.
    pub o_type: u8,
    /// Index of the offer.
    pub o_idx: u64,
    /// Index of the offer on the other peer.
    pub their_o_idx: u64,
    /// Peer offering to / from.
    pub peer_idx: u32,
    /// Coin type.
    pub coin_type: u32,
    /// Oracle public key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_a: Option<Vec<u8>>,
    /// Oracle R point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_r: Option<Vec<u8>>,
    /// Expected settlement time (unix seconds).
    pub settlement_time: u64,
    /// Funding each party contributes, satoshi.
    pub fund_amt: i64,
    /// Our payouts per oracle value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payouts: Option<Vec<DlcContractDivision>>,
    /// Whether we buy the forward asset.
    pub im_buyer: bool,
    /// Asset quantity delivered at settlement.
    pub asset_quantity: i64,
    /// Whether the offer has been accepted.
    pub accepted: bool,
}

/// Arguments and reply of `LitRPC.NewForwardOffer`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ForwardOfferEnvelope {
    /// The offer.
    pub offer: Option<DlcFwdOffer>,
}

/// Reply of `LitRPC.ListOffers`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListOffersReply {
    /// Current offers.
    pub offers: Option<Vec<DlcFwdOffer>>,
}

/// Arguments naming a single offer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferIdxArgs {
    /// Offer index.
    pub o_idx: u64,
}

// ── Contracts ───────────────────────────────────────────────────────────────

/// Lifecycle of a discreet log contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DlcContractStatus {
    /// Being edited locally.
    #[default]
    Draft,
    /// Offered to a peer.
    OfferedByMe,
    /// Offered by a peer.
    OfferedToMe,
    /// Declined.
    Declined,
    /// Accepted.
    Accepted,
    /// Acceptance acknowledged.
    Acknowledged,
    /// Funded and live.
    Active,
    /// Settlement in progress.
    Settling,
    /// Settled and closed.
    Closed,
}

impl TryFrom<u8> for DlcContractStatus {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Draft,
            1 => Self::OfferedByMe,
            2 => Self::OfferedToMe,
            3 => Self::Declined,
            4 => Self::Accepted,
            5 => Self::Acknowledged,
            6 => Self::Active,
            7 => Self::Settling,
            8 => Self::Closed,
            other => return Err(format!("unknown contract status {other}")),
        })
    }
}

impl From<DlcContractStatus> for u8 {
    fn from(status: DlcContractStatus) -> Self {
        status as u8
    }
}

/// An outpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutPoint {
    /// Transaction hash.
    pub hash: Option<Vec<u8>>,
    /// Output index.
    pub index: u32,
}

/// A UTXO offered to fund a contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DlcContractFundingInput {
    /// Outpoint used for funding.
    pub outpoint: OutPoint,
    /// Value in satoshi.
    pub value: i64,
}

/// Counterparty signature for one settlement outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DlcContractSettlementSignature {
    /// Oracle value of the settlement transaction.
    pub outcome: i64,
    /// Signature.
    pub signature: Option<Vec<u8>>,
}

/// A discreet log contract as stored by the node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DlcContract {
    /// Index for referencing in commands.
    pub idx: u64,
    /// Index on the other peer.
    pub their_idx: u64,
    /// Peer the contract is with.
    pub peer_idx: u32,
    /// Coin type.
    pub coin_type: u32,
    /// Oracle public key.
    pub oracle_a: Option<Vec<u8>>,
    /// Oracle R point.
    pub oracle_r: Option<Vec<u8>>,
    /// When the oracle is expected to publish.
    pub oracle_timestamp: u64,
    /// Payout specification.
    pub division: Option<Vec<DlcContractDivision>>,
    /// Our funding, satoshi.
    pub our_funding_amount: i64,
    /// Counterparty funding, satoshi.
    pub their_funding_amount: i64,
    /// Change PKH for our funding.
    #[serde(rename = "OurChangePKH")]
    pub our_change_pkh: Option<Vec<u8>>,
    /// Change PKH for their funding.
    #[serde(rename = "TheirChangePKH")]
    pub their_change_pkh: Option<Vec<u8>>,
    /// Our key in the funding multisig.
    pub our_fund_multisig_pub: Option<Vec<u8>>,
    /// Their key in the funding multisig.
    pub their_fund_multisig_pub: Option<Vec<u8>>,
    /// Our payout base key.
    pub our_payout_base: Option<Vec<u8>>,
    /// Their payout base key.
    pub their_payout_base: Option<Vec<u8>>,
    /// PKH our payout goes to.
    #[serde(rename = "OurPayoutPKH")]
    pub our_payout_pkh: Option<Vec<u8>>,
    /// PKH their payout goes to.
    #[serde(rename = "TheirPayoutPKH")]
    pub their_payout_pkh: Option<Vec<u8>>,
    /// Contract status.
    pub status: DlcContractStatus,
    /// Our funding inputs.
    pub our_funding_inputs: Option<Vec<DlcContractFundingInput>>,
    /// Their funding inputs.
    pub their_funding_inputs: Option<Vec<DlcContractFundingInput>>,
    /// Their settlement signatures.
    pub their_settlement_signatures: Option<Vec<DlcContractSettlementSignature>>,
    /// Funding outpoint spent by settlement.
    pub funding_outpoint: Option<OutPoint>,
}

/// Reply of `LitRPC.NewContract` and `LitRPC.GetContract`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContractReply {
    /// The contract.
    pub contract: Option<DlcContract>,
}

/// Reply of `LitRPC.ListContracts`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListContractsReply {
    /// All contracts.
    pub contracts: Option<Vec<DlcContract>>,
}

/// Arguments for `LitRPC.GetContract`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContractIdxArgs {
    /// Contract index.
    pub idx: u64,
}

/// Arguments for `LitRPC.OfferContract`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferContractArgs {
    /// Contract index.
    pub c_idx: u64,
    /// Peer to offer to.
    pub peer_idx: u32,
}

/// Arguments naming a single contract by `CIdx`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CIdxArgs {
    /// Contract index.
    pub c_idx: u64,
}

/// Arguments for `LitRPC.SettleContract`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SettleContractArgs {
    /// Contract index.
    pub c_idx: u64,
    /// Oracle value to settle on.
    pub oracle_value: i64,
    /// Oracle signature of that value.
    pub oracle_sig: Vec<u8>,
}

/// Reply of `LitRPC.SettleContract`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SettleContractReply {
    /// Whether settlement succeeded.
    pub success: bool,
    /// Settlement transaction hash.
    pub settle_tx_hash: Option<Vec<u8>>,
    /// Claim transaction hash.
    pub claim_tx_hash: Option<Vec<u8>>,
}

/// Arguments for `LitRPC.SetContractDivision`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetContractDivisionArgs {
    /// Contract index.
    pub c_idx: u64,
    /// Value at which all funds are ours.
    pub value_fully_ours: i64,
    /// Value at which all funds are theirs.
    pub value_fully_theirs: i64,
}

/// Arguments for `LitRPC.SetContractCoinType`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetContractCoinTypeArgs {
    /// Contract index.
    pub c_idx: u64,
    /// Coin type.
    pub coin_type: u32,
}

/// Arguments for `LitRPC.SetContractFunding`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetContractFundingArgs {
    /// Contract index.
    pub c_idx: u64,
    /// Our funding, satoshi.
    pub our_amount: i64,
    /// Their funding, satoshi.
    pub their_amount: i64,
}

/// Arguments for `LitRPC.SetContractSettlementTime`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetContractSettlementTimeArgs {
    /// Contract index.
    pub c_idx: u64,
    /// Settlement time (unix seconds).
    pub time: u64,
}

/// Arguments for `LitRPC.SetContractRPoint`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetContractRPointArgs {
    /// Contract index.
    pub c_idx: u64,
    /// Public key of the R point.
    pub r_point: Vec<u8>,
}

/// Arguments for `LitRPC.SetContractOracle`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetContractOracleArgs {
    /// Contract index.
    pub c_idx: u64,
    /// Oracle index.
    pub o_idx: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
