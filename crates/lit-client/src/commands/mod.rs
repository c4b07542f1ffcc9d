//! The node's `LitRPC` procedures as typed [`LitClient`](crate::LitClient)
//! methods.
//!
//! Every command builds a payload record from [`types`], sends it through the
//! client's transport and validates the reply with a
//! [`ReplyCheck`](crate::ReplyCheck) before decoding it.

pub mod channels;
pub mod dlc;
pub mod node;
pub mod types;
pub mod wallet;

// ── Node ────────────────────────────────────────────────────────────────────

/// Start listening for peer connections.
pub const LISTEN: &str = "LitRPC.Listen";
/// Query listening addresses and the node's LN address.
pub const GET_LISTENING_PORTS: &str = "LitRPC.GetListeningPorts";
/// Connect to another node.
pub const CONNECT: &str = "LitRPC.Connect";
/// List connected peers.
pub const LIST_CONNECTIONS: &str = "LitRPC.ListConnections";
/// Rename a peer.
pub const ASSIGN_NICKNAME: &str = "LitRPC.AssignNickname";
/// Shut the node down.
pub const STOP: &str = "LitRPC.Stop";

// ── Wallet ──────────────────────────────────────────────────────────────────

/// Wallet balances per coin.
pub const BALANCE: &str = "LitRPC.Balance";
/// Unspent outputs outside channels.
pub const TXO_LIST: &str = "LitRPC.TxoList";
/// On-chain send.
pub const SEND: &str = "LitRPC.Send";
/// Set a coin's fee rate.
pub const SET_FEE: &str = "LitRPC.SetFee";
/// Read a coin's fee rate.
pub const GET_FEE: &str = "LitRPC.GetFee";
/// Generate or list addresses.
pub const ADDRESS: &str = "LitRPC.Address";

// ── Channels ────────────────────────────────────────────────────────────────

/// List channels.
pub const CHANNEL_LIST: &str = "LitRPC.ChannelList";
/// Open and fund a channel.
pub const FUND_CHANNEL: &str = "LitRPC.FundChannel";
/// Dump stored channel states.
pub const STATE_DUMP: &str = "LitRPC.StateDump";
/// Push funds through a channel.
pub const PUSH: &str = "LitRPC.Push";
/// Cooperatively close a channel.
pub const CLOSE_CHANNEL: &str = "LitRPC.CloseChannel";
/// Unilaterally close a channel.
pub const BREAK_CHANNEL: &str = "LitRPC.BreakChannel";

// ── Oracles and offers ──────────────────────────────────────────────────────

/// Import an oracle from its REST endpoint.
pub const IMPORT_ORACLE: &str = "LitRPC.ImportOracle";
/// Add an oracle by public key.
pub const ADD_ORACLE: &str = "LitRPC.AddOracle";
/// List known oracles.
pub const LIST_ORACLES: &str = "LitRPC.ListOracles";
/// Create a forward offer.
pub const NEW_FORWARD_OFFER: &str = "LitRPC.NewForwardOffer";
/// List offers.
pub const LIST_OFFERS: &str = "LitRPC.ListOffers";
/// Accept an offer.
pub const ACCEPT_OFFER: &str = "LitRPC.AcceptOffer";
/// Decline an offer.
pub const DECLINE_OFFER: &str = "LitRPC.DeclineOffer";

// ── Contracts ───────────────────────────────────────────────────────────────

/// Create a draft contract.
pub const NEW_CONTRACT: &str = "LitRPC.NewContract";
/// Fetch one contract.
pub const GET_CONTRACT: &str = "LitRPC.GetContract";
/// List all contracts.
pub const LIST_CONTRACTS: &str = "LitRPC.ListContracts";
/// Offer a contract to a peer.
pub const OFFER_CONTRACT: &str = "LitRPC.OfferContract";
/// Accept a contract offered to us.
pub const ACCEPT_CONTRACT: &str = "LitRPC.AcceptContract";
/// Decline a contract offered to us.
pub const DECLINE_CONTRACT: &str = "LitRPC.DeclineContract";
/// Settle a contract with an oracle signature.
pub const SETTLE_CONTRACT: &str = "LitRPC.SettleContract";
/// Set a contract's payout division.
pub const SET_CONTRACT_DIVISION: &str = "LitRPC.SetContractDivision";
/// Set a contract's coin type.
pub const SET_CONTRACT_COIN_TYPE: &str = "LitRPC.SetContractCoinType";
/// Set a contract's funding amounts.
pub const SET_CONTRACT_FUNDING: &str = "LitRPC.SetContractFunding";
/// Set a contract's settlement time.
pub const SET_CONTRACT_SETTLEMENT_TIME: &str = "LitRPC.SetContractSettlementTime";
/// Set a contract's R point.
pub const SET_CONTRACT_R_POINT: &str = "LitRPC.SetContractRPoint";
/// Set a contract's oracle.
pub const SET_CONTRACT_ORACLE: &str = "LitRPC.SetContractOracle";
