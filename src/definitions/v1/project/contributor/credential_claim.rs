// SPDX-License-Identifier: Apache-2.0

//! Claim the project credential after completed contributions.

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
        tx_type: TransactionName::ProjectContributorCredentialClaim,
        role: role::CONTRIBUTOR,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "project-credential-v1",
            yaml_path: "protocol/v1/project/contributor/credential-claim.yaml",
            required_tokens: &["ACCESS_TOKEN", "CONTRIBUTOR_STATE"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([Field::required(
                "projectId",
                FieldType::HexString(56),
            )])),
            builder: BuilderSpec { endpoint: "/tx/project/credential-claim" },
            estimated_cost: Some(TransactionCost::fee(190_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "mark credential pending",
            HttpMethod::Patch,
            "/projects/{projectId}/contributors/{userId}/status",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("userId", "userId")
        .body_literal("status", json!("CREDENTIAL_PENDING"))
        .body_context("pendingTxHash", "txHash")
        .critical()],
        on_confirmation: vec![
            SideEffect::new(
                "confirm credential",
                HttpMethod::Patch,
                "/projects/{projectId}/contributors/{userId}/status",
            )
            .path_param("projectId", "buildInputs.projectId")
            .path_param("userId", "userId")
            .body_literal("status", json!("CREDENTIALED"))
            .body_on_chain("credentialToken", "mints[0].assetName")
            .critical()
            .retry(3, 5_000),
            SideEffect::new("index credential", HttpMethod::Post, "/credentials")
                .body_context("userId", "userId")
                .body_context("projectId", "buildInputs.projectId")
                .body_on_chain("token", "mints[0].assetName")
                .retry(5, 10_000),
        ],
        ui: UiInfo {
            button_text: "Claim Credential",
            title: "Claim your project credential",
            description: &[
                "Burns your contributor state token and mints the permanent credential \
                 recording your accepted contributions.",
            ],
            footer_link: "/docs/project/credentials",
            footer_link_text: "About project credentials",
            success_info: "Credential claim submitted.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/project-credential",
            api_docs: Some("/docs/api/credentials"),
            examples: &[],
        },
    }
}
