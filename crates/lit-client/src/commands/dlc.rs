//! Oracle, offer and discreet log contract commands.

use super::types::{
    AddOracleArgs, CIdxArgs, ContractIdxArgs, ContractReply, DlcContract, DlcFwdOffer, DlcOracle,
    ForwardOfferEnvelope, ImportOracleArgs, ListContractsReply, ListOffersReply, ListOraclesReply,
    NoArgs, OfferContractArgs, OfferIdxArgs, OracleReply, SetContractCoinTypeArgs,
    SetContractDivisionArgs, SetContractFundingArgs, SetContractOracleArgs, SetContractRPointArgs,
    SetContractSettlementTimeArgs, SettleContractArgs, SettleContractReply, SuccessReply,
};
use super::{
    ACCEPT_CONTRACT, ACCEPT_OFFER, ADD_ORACLE, DECLINE_CONTRACT, DECLINE_OFFER, GET_CONTRACT,
    IMPORT_ORACLE, LIST_CONTRACTS, LIST_OFFERS, LIST_ORACLES, NEW_CONTRACT, NEW_FORWARD_OFFER,
    OFFER_CONTRACT, SET_CONTRACT_COIN_TYPE, SET_CONTRACT_DIVISION, SET_CONTRACT_FUNDING,
    SET_CONTRACT_ORACLE, SET_CONTRACT_R_POINT, SET_CONTRACT_SETTLEMENT_TIME, SETTLE_CONTRACT,
};
use crate::client::LitClient;
use crate::errors::{ClientError, Result};
use crate::transport::RpcTransport;
use crate::validate::ReplyCheck;

fn required<V>(value: Option<V>, field: &str) -> Result<V> {
    value.ok_or_else(|| ClientError::UnexpectedReply(format!("{field} is null")))
}

impl<T: RpcTransport> LitClient<T> {
    async fn expect_success<P: serde::Serialize + Sync>(&self, method: &str, args: &P) -> Result<()> {
        let _: SuccessReply = self.request(method, args, ReplyCheck::Success).await?;
        Ok(())
    }

    // ── Oracles ─────────────────────────────────────────────────────────────

    /// Import an oracle from its REST endpoint.
    pub async fn import_oracle(&self, url: &str, name: &str) -> Result<DlcOracle> {
        let args = ImportOracleArgs {
            url: url.to_owned(),
            name: name.to_owned(),
        };
        let reply: OracleReply = self
            .request(IMPORT_ORACLE, &args, ReplyCheck::Field("Oracle"))
            .await?;
        required(reply.oracle, "Oracle")
    }

    /// Add an oracle by its 33-byte public key (hex).
    pub async fn add_oracle(&self, pub_key_hex: &str, name: &str) -> Result<DlcOracle> {
        let args = AddOracleArgs {
            key: pub_key_hex.to_owned(),
            name: name.to_owned(),
        };
        let reply: OracleReply = self
            .request(ADD_ORACLE, &args, ReplyCheck::Field("Oracle"))
            .await?;
        required(reply.oracle, "Oracle")
    }

    /// Oracles known to the node.
    pub async fn list_oracles(&self) -> Result<Vec<DlcOracle>> {
        let reply: ListOraclesReply = self
            .request(LIST_ORACLES, &NoArgs {}, ReplyCheck::Field("Oracles"))
            .await?;
        Ok(reply.oracles.unwrap_or_default())
    }

    // ── Offers ──────────────────────────────────────────────────────────────

    /// Offer a forward contract. Returns the offer as stored by the node.
    pub async fn new_forward_offer(&self, offer: DlcFwdOffer) -> Result<DlcFwdOffer> {
        let args = ForwardOfferEnvelope { offer: Some(offer) };
        let reply: ForwardOfferEnvelope = self
            .request(NEW_FORWARD_OFFER, &args, ReplyCheck::Field("Offer"))
            .await?;
        required(reply.offer, "Offer")
    }

    /// Current offers.
    pub async fn list_offers(&self) -> Result<Vec<DlcFwdOffer>> {
        let reply: ListOffersReply = self
            .request(LIST_OFFERS, &NoArgs {}, ReplyCheck::Field("Offers"))
            .await?;
        Ok(reply.offers.unwrap_or_default())
    }

    /// Accept offer `offer`.
    pub async fn accept_offer(&self, offer: u64) -> Result<()> {
        self.expect_success(ACCEPT_OFFER, &OfferIdxArgs { o_idx: offer }).await
    }

    /// Decline offer `offer`.
    pub async fn decline_offer(&self, offer: u64) -> Result<()> {
        self.expect_success(DECLINE_OFFER, &OfferIdxArgs { o_idx: offer }).await
    }

    // ── Contracts ───────────────────────────────────────────────────────────

    /// Create a new draft contract.
    pub async fn new_contract(&self) -> Result<DlcContract> {
        let reply: ContractReply = self
            .request(NEW_CONTRACT, &NoArgs {}, ReplyCheck::Field("Contract"))
            .await?;
        required(reply.contract, "Contract")
    }

    /// Fetch contract `idx`.
    pub async fn get_contract(&self, idx: u64) -> Result<DlcContract> {
        let reply: ContractReply = self
            .request(GET_CONTRACT, &ContractIdxArgs { idx }, ReplyCheck::Field("Contract"))
            .await?;
        required(reply.contract, "Contract")
    }

    /// All contracts.
    pub async fn list_contracts(&self) -> Result<Vec<DlcContract>> {
        let reply: ListContractsReply = self
            .request(LIST_CONTRACTS, &NoArgs {}, ReplyCheck::Field("Contracts"))
            .await?;
        Ok(reply.contracts.unwrap_or_default())
    }

    /// Offer contract `contract` to `peer`.
    pub async fn offer_contract(&self, contract: u64, peer: u32) -> Result<()> {
        let args = OfferContractArgs {
            c_idx: contract,
            peer_idx: peer,
        };
        self.expect_success(OFFER_CONTRACT, &args).await
    }

    /// Accept a contract offered to us.
    pub async fn accept_contract(&self, contract: u64) -> Result<()> {
        self.expect_success(ACCEPT_CONTRACT, &CIdxArgs { c_idx: contract }).await
    }

    /// Decline a contract offered to us.
    pub async fn decline_contract(&self, contract: u64) -> Result<()> {
        self.expect_success(DECLINE_CONTRACT, &CIdxArgs { c_idx: contract }).await
    }

    /// Settle `contract` on `oracle_value` using the oracle's signature.
    pub async fn settle_contract(
        &self,
        contract: u64,
        oracle_value: i64,
        oracle_sig: &[u8],
    ) -> Result<SettleContractReply> {
        let args = SettleContractArgs {
            c_idx: contract,
            oracle_value,
            oracle_sig: oracle_sig.to_vec(),
        };
        self.request(SETTLE_CONTRACT, &args, ReplyCheck::Success).await
    }

    /// Linear payout: all funds ours at `fully_ours`, all theirs at
    /// `fully_theirs`.
    pub async fn set_contract_division(&self, contract: u64, fully_ours: i64, fully_theirs: i64) -> Result<()> {
        let args = SetContractDivisionArgs {
            c_idx: contract,
            value_fully_ours: fully_ours,
            value_fully_theirs: fully_theirs,
        };
        self.expect_success(SET_CONTRACT_DIVISION, &args).await
    }

    /// Set the coin type of `contract`.
    pub async fn set_contract_coin_type(&self, contract: u64, coin_type: u32) -> Result<()> {
        let args = SetContractCoinTypeArgs {
            c_idx: contract,
            coin_type,
        };
        self.expect_success(SET_CONTRACT_COIN_TYPE, &args).await
    }

    /// Set how much each side funds `contract` with.
    pub async fn set_contract_funding(&self, contract: u64, ours: i64, theirs: i64) -> Result<()> {
        let args = SetContractFundingArgs {
            c_idx: contract,
            our_amount: ours,
            their_amount: theirs,
        };
        self.expect_success(SET_CONTRACT_FUNDING, &args).await
    }

    /// Set when `contract` settles (unix seconds).
    pub async fn set_contract_settlement_time(&self, contract: u64, time: u64) -> Result<()> {
        let args = SetContractSettlementTimeArgs { c_idx: contract, time };
        self.expect_success(SET_CONTRACT_SETTLEMENT_TIME, &args).await
    }

    /// Set the oracle R point `contract` settles against.
    pub async fn set_contract_r_point(&self, contract: u64, r_point: &[u8]) -> Result<()> {
        let args = SetContractRPointArgs {
            c_idx: contract,
            r_point: r_point.to_vec(),
        };
        self.expect_success(SET_CONTRACT_R_POINT, &args).await
    }

    /// Set the oracle of `contract`.
    pub async fn set_contract_oracle(&self, contract: u64, oracle: u64) -> Result<()> {
        let args = SetContractOracleArgs {
            c_idx: contract,
            o_idx: oracle,
        };
        self.expect_success(SET_CONTRACT_ORACLE, &args).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use crate::commands::types::DlcContractStatus;
    use crate::transport::scripted::ScriptedTransport;
    use serde_json::json;

    fn client(rpc: ScriptedTransport) -> LitClient<ScriptedTransport> {
        LitClient::with_transport(rpc, 2448)
    }

    fn success() -> ScriptedTransport {
        ScriptedTransport::new().reply(json!({"Success": true}))
    }

    #[tokio::test]
    async fn add_oracle_uses_its_own_method() {
        let client = client(ScriptedTransport::new().reply(json!({
            "Oracle": {"Idx": 1, "A": [2, 3], "Name": "prices", "Url": ""}
        })));
        let oracle = client.add_oracle("02abcd", "prices").await.unwrap();
        assert_eq!(oracle.idx, 1);
        assert_eq!(
            client.transport().calls()[0],
            ("LitRPC.AddOracle".to_owned(), json!({"Key": "02abcd", "Name": "prices"}))
        );
    }

    #[tokio::test]
    async fn import_oracle_payload() {
        let client = client(ScriptedTransport::new().reply(json!({"Oracle": {"Idx": 2, "Name": "x"}})));
        client.import_oracle("https://oracle.example", "x").await.unwrap();
        assert_eq!(
            client.transport().calls()[0],
            (
                "LitRPC.ImportOracle".to_owned(),
                json!({"Url": "https://oracle.example", "Name": "x"})
            )
        );
    }

    #[tokio::test]
    async fn oracle_missing_is_unexpected() {
        let client = client(ScriptedTransport::new().reply(json!({})));
        assert!(matches!(client.list_oracles().await, Err(ClientError::UnexpectedReply(_))));
    }

    #[tokio::test]
    async fn new_forward_offer_wraps_offer() {
        let client = client(ScriptedTransport::new().reply(json!({"Offer": {"OIdx": 9, "PeerIdx": 1}})));
        let offer = DlcFwdOffer {
            peer_idx: 1,
            fund_amt: 10_000,
            ..DlcFwdOffer::default()
        };
        let stored = client.new_forward_offer(offer).await.unwrap();
        assert_eq!(stored.o_idx, 9);

        let params = &client.transport().calls()[0].1;
        assert_eq!(params["Offer"]["PeerIdx"], 1);
        assert_eq!(params["Offer"]["FundAmt"], 10_000);
    }

    #[tokio::test]
    async fn accept_offer_success_flag() {
        let client = client(success());
        client.accept_offer(4).await.unwrap();
        assert_eq!(client.transport().calls()[0].1, json!({"OIdx": 4}));
    }

    #[tokio::test]
    async fn decline_offer_rejected() {
        let client = client(ScriptedTransport::new().reply(json!({"Success": false})));
        assert!(matches!(client.decline_offer(4).await, Err(ClientError::Rejected(_))));
    }

    #[tokio::test]
    async fn get_contract_decodes_status() {
        let client = client(ScriptedTransport::new().reply(json!({
            "Contract": {"Idx": 3, "PeerIdx": 1, "Status": 1, "OurFundingAmount": 5000}
        })));
        let contract = client.get_contract(3).await.unwrap();
        assert_eq!(contract.status, DlcContractStatus::OfferedByMe);
        assert_eq!(contract.our_funding_amount, 5000);
        assert_eq!(client.transport().calls()[0].1, json!({"Idx": 3}));
    }

    #[tokio::test]
    async fn null_contract_list_is_empty() {
        let client = client(ScriptedTransport::new().reply(json!({"Contracts": null})));
        assert!(client.list_contracts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_contract_funding_uses_its_own_method() {
        let client = client(success());
        client.set_contract_funding(2, 1000, 2000).await.unwrap();
        assert_eq!(
            client.transport().calls()[0],
            (
                "LitRPC.SetContractFunding".to_owned(),
                json!({"CIdx": 2, "OurAmount": 1000, "TheirAmount": 2000})
            )
        );
    }

    #[tokio::test]
    async fn contract_setters_send_expected_methods() {
        let rpc = ScriptedTransport::new();
        let rpc = (0..7).fold(rpc, |rpc, _| rpc.reply(json!({"Success": true})));
        let client = client(rpc);

        client.offer_contract(1, 2).await.unwrap();
        client.accept_contract(1).await.unwrap();
        client.decline_contract(1).await.unwrap();
        client.set_contract_division(1, 10, 20).await.unwrap();
        client.set_contract_coin_type(1, 257).await.unwrap();
        client.set_contract_settlement_time(1, 1_700_000_000).await.unwrap();
        client.set_contract_oracle(1, 5).await.unwrap();

        let methods: Vec<String> = client.transport().calls().into_iter().map(|(m, _)| m).collect();
        assert_eq!(
            methods,
            vec![
                "LitRPC.OfferContract",
                "LitRPC.AcceptContract",
                "LitRPC.DeclineContract",
                "LitRPC.SetContractDivision",
                "LitRPC.SetContractCoinType",
                "LitRPC.SetContractSettlementTime",
                "LitRPC.SetContractOracle",
            ]
        );
        assert_eq!(
            client.transport().calls()[3].1,
            json!({"CIdx": 1, "ValueFullyOurs": 10, "ValueFullyTheirs": 20})
        );
    }

    #[tokio::test]
    async fn r_point_sent_as_byte_array() {
        let client = client(success());
        client.set_contract_r_point(6, &[1, 2, 3]).await.unwrap();
        assert_eq!(client.transport().calls()[0].1, json!({"CIdx": 6, "RPoint": [1, 2, 3]}));
    }

    #[tokio::test]
    async fn settle_returns_full_reply() {
        let client = client(ScriptedTransport::new().reply(json!({
            "Success": true, "SettleTxHash": [1], "ClaimTxHash": [2]
        })));
        let reply = client.settle_contract(3, 15_000, &[9, 9]).await.unwrap();
        assert!(reply.success);
        assert_eq!(reply.settle_tx_hash, Some(vec![1]));
        assert_eq!(
            client.transport().calls()[0].1,
            json!({"CIdx": 3, "OracleValue": 15_000, "OracleSig": [9, 9]})
        );
    }

    #[tokio::test]
    async fn settle_without_success_flag_is_unexpected() {
        let client = client(ScriptedTransport::new().reply(json!({"SettleTxHash": [1]})));
        assert!(matches!(
            client.settle_contract(3, 1, &[]).await,
            Err(ClientError::UnexpectedReply(_))
        ));
    }
}
