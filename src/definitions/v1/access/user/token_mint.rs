// SPDX-License-Identifier: Apache-2.0

//! Mint the non-transferable access token that identifies a user.
//!
//! The token's asset name is the user's alias; every other transaction on
//! the platform requires the wallet to hold it.

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
        tx_type: TransactionName::AccessTokenMint,
        role: role::USER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "access-token-v1",
            yaml_path: "protocol/v1/access/token-mint.yaml",
            required_tokens: &[],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::split(
                Schema::object([Field::required("alias", FieldType::NonEmptyString)]),
                Schema::object([Field::optional("displayName", FieldType::String)]),
            ),
            builder: BuilderSpec { endpoint: "/tx/access/mint" },
            estimated_cost: Some(TransactionCost::fee_with_deposit(180_000, 2_000_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new("create user record", HttpMethod::Post, "/users")
            .body_context("alias", "buildInputs.alias")
            .body_context("displayName", "buildInputs.displayName")
            .body_context("walletAddress", "walletAddress")
            .body_context("pendingTxHash", "txHash")
            .critical()],
        on_confirmation: vec![SideEffect::new(
            "confirm user record",
            HttpMethod::Patch,
            "/users/{alias}/status",
        )
        .path_param("alias", "buildInputs.alias")
        .body_literal("status", json!("CONFIRMED"))
        .body_on_chain("accessTokenPolicy", "mints[0].policyId")
        .body_context("blockHeight", "blockHeight")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Mint Access Token",
            title: "Mint your access token",
            description: &[
                "Mints the non-transferable token that identifies you on the platform.",
                "Your chosen alias becomes the token's on-chain asset name and cannot be \
                 changed afterwards.",
            ],
            footer_link: "/docs/access-token",
            footer_link_text: "What is an access token?",
            success_info: "Your access token transaction was submitted. Your account unlocks \
                           once it is confirmed on-chain.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/access-token",
            api_docs: Some("/docs/api/users"),
            examples: &[],
        },
    }
}
