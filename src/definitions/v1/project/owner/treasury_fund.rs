// SPDX-License-Identifier: Apache-2.0

//! Fund the project treasury.

use serde_json::json;

use crate::cost::TransactionCost;
use crate::definition::{
    role,
    BuildTxConfig,
    BuilderSpec,
    DocsInfo,
    TransactionDefinition,
    UiInfo,
};
use crate::protocol::{
    ProtocolSpec,
    ProtocolVersion,
};
use crate::schema::{
    Field,
    FieldType,
    InputSchemas,
    Schema,
};
use crate::side_effect::{
    HttpMethod,
    SideEffect,
};
use crate::TransactionName;

pub(crate) fn definition() -> TransactionDefinition {
    TransactionDefinition {
        tx_type: TransactionName::ProjectOwnerTreasuryFund,
        role: role::OWNER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "treasury-v1",
            yaml_path: "protocol/v1/project/owner/treasury-fund.yaml",
            required_tokens: &["ACCESS_TOKEN", "PROJECT_OWNER_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([
                Field::required("projectId", FieldType::HexString(56)),
                Field::required("amount", FieldType::UnsignedInteger),
            ])),
            builder: BuilderSpec { endpoint: "/tx/project/treasury-fund" },
            estimated_cost: Some(TransactionCost::fee(170_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "record deposit",
            HttpMethod::Post,
            "/projects/{projectId}/treasury/deposits",
        )
        .path_param("projectId", "buildInputs.projectId")
        .body_context("amount", "buildInputs.amount")
        .body_context("funderId", "userId")
        .body_context("pendingTxHash", "txHash")],
        on_confirmation: vec![SideEffect::new(
            "confirm deposit",
            HttpMethod::Patch,
            "/projects/{projectId}/treasury/deposits/{txHash}",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("txHash", "txHash")
        .body_literal("status", json!("CONFIRMED"))
        .body_context("blockHeight", "blockHeight")
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Fund Treasury",
            title: "Fund the project treasury",
            description: &[
                "Sends ada to the treasury contract that escrows task rewards for this \
                 project.",
            ],
            footer_link: "/docs/project/treasury",
            footer_link_text: "How the treasury works",
            success_info: "Deposit submitted. The treasury balance updates on confirmation.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/treasury",
            api_docs: Some("/docs/api/treasury"),
            examples: &[],
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::definition;
    use crate::definition::validate_definition;
    use crate::testing::{
        mock_submission_context,
        test_side_effect,
    };

    #[test]
    fn definition_shape_is_sound() {
        assert!(validate_definition(&definition()).is_empty());
    }

    // Book-keeping only; a failed deposit record must not flag the
    // submission as failed.
    #[test]
    fn deposit_record_is_not_critical() {
        assert!(!definition().on_submit[0].critical);
    }

    #[test]
    fn confirmation_keys_the_deposit_by_tx_hash() {
        let context = mock_submission_context(Some(json!({
            "txHash": "feedbead",
            "buildInputs": { "projectId": "p".repeat(56), "amount": 50_000_000_u64 },
        })));

        let probe = test_side_effect(&definition().on_confirmation[0], &context);

        assert_eq!(
            probe.resolved_endpoint.unwrap(),
            format!("/projects/{}/treasury/deposits/feedbead", "p".repeat(56))
        );
    }
}
