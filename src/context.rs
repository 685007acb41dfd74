// SPDX-License-Identifier: Apache-2.0

//! Runtime contexts carried through the side-effect lifecycle.
//!
//! A context is created by the caller for a single transaction attempt and
//! discarded after side-effect execution. The engine never mutates one; it
//! serializes the context to JSON (`camelCase` keys) and resolves dotted
//! paths against that projection, so the path vocabulary in definitions
//! matches the wire names (`txHash`, `buildInputs.policy`, …).

use serde_json::Value;

use crate::cbor::{
    Mint,
    TransactionInput,
    TransactionOutput,
};

/// Everything a side-effect expression may reference immediately after the
/// transaction has been handed to the blockchain.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionContext {
    /// The submitted transaction's hash.
    pub tx_hash: String,
    /// The signed transaction CBOR, hex encoded.
    pub signed_cbor: String,
    /// The unsigned transaction CBOR as returned by the builder service.
    pub unsigned_cbor: String,
    /// The platform identifier of the signing user.
    pub user_id: String,
    /// The bech32 address of the signing wallet.
    pub wallet_address: String,
    /// The fully validated and merged parameter map (builder parameters and
    /// side-effect parameters alike).
    pub build_inputs: Value,
    /// Submission time, Unix epoch milliseconds.
    pub timestamp: i64,
}

/// The decoded, indexable view of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnChainData {
    /// Minted (or burned, for negative quantities) assets, in body order.
    pub mints: Vec<Mint>,
    /// Transaction outputs, in body order.
    pub outputs: Vec<TransactionOutput>,
    /// Transaction inputs, in body order.
    pub inputs: Vec<TransactionInput>,
    /// Transaction metadata, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// The auxiliary data hash from the transaction body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_hash: Option<String>,
}

/// Everything a side-effect expression may reference once the transaction
/// has been confirmed.
///
/// Created only by the monitoring service, which extends the submission
/// context with the decoded on-chain view.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationContext {
    /// The submission-time context, unchanged.
    #[serde(flatten)]
    pub submission: SubmissionContext,
    /// Height of the block the transaction was confirmed in.
    pub block_height: u64,
    /// The decoded view of the confirmed transaction.
    pub on_chain_data: OnChainData,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::{
        mock_confirmation_context,
        mock_submission_context,
    };

    #[test]
    fn submission_context_projects_to_camel_case() {
        let context = mock_submission_context(None);
        let value = serde_json::to_value(&context).unwrap();

        assert!(value.get("txHash").is_some());
        assert!(value.get("walletAddress").is_some());
        assert!(value.get("buildInputs").is_some());
        assert!(value.get("tx_hash").is_none());
    }

    #[test]
    fn confirmation_context_flattens_submission_fields() {
        let context = mock_confirmation_context(None);
        let value = serde_json::to_value(&context).unwrap();

        // Submission keys sit at the top level next to the confirmation keys.
        assert!(value.get("txHash").is_some());
        assert!(value.get("blockHeight").is_some());
        assert_eq!(
            value.pointer("/onChainData/mints/0/assetName"),
            Some(&json!("MODULE_1_hash"))
        );
    }
}
