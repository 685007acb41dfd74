// SPDX-License-Identifier: Apache-2.0

//! Enroll as a contributor by minting a contributor state token.

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
        tx_type: TransactionName::ProjectContributorEnroll,
        role: role::CONTRIBUTOR,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "contributor-state-v1",
            yaml_path: "protocol/v1/project/contributor/enroll.yaml",
            required_tokens: &["ACCESS_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([Field::required(
                "projectId",
                FieldType::HexString(56),
            )])),
            builder: BuilderSpec { endpoint: "/tx/project/enroll" },
            estimated_cost: Some(TransactionCost::fee_with_deposit(175_000, 2_500_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "record contributor",
            HttpMethod::Post,
            "/projects/{projectId}/contributors",
        )
        .path_param("projectId", "buildInputs.projectId")
        .body_context("userId", "userId")
        .body_context("walletAddress", "walletAddress")
        .body_context("pendingTxHash", "txHash")
        .critical()],
        on_confirmation: vec![SideEffect::new(
            "confirm contributor",
            HttpMethod::Patch,
            "/projects/{projectId}/contributors/{userId}/status",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("userId", "userId")
        .body_literal("status", json!("ENROLLED"))
        .body_on_chain("contributorStateToken", "mints[0].assetName")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Join Project",
            title: "Join this project",
            description: &[
                "Mints your contributor state token, the on-chain record of the tasks \
                 you take on.",
            ],
            footer_link: "/docs/project/contributing",
            footer_link_text: "About contributor state tokens",
            success_info: "You joined the project. Commit to a task to get started.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/contributor-state",
            api_docs: Some("/docs/api/contributors"),
            examples: &[],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::definition;
    use crate::definition::validate_definition;

    #[test]
    fn definition_shape_is_sound() {
        assert!(validate_definition(&definition()).is_empty());
    }
}
