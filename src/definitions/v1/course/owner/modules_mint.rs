// SPDX-License-Identifier: Apache-2.0

//! Mint a module token whose asset name is the hash of its SLT list.
//!
//! The token name is computed off-chain with the same encoding the minting
//! policy uses, so the caller can preview it before building.

use serde_json::json;

use crate::cost::{
    AdditionalCost,
    Lovelace,
    TransactionCost,
};
use crate::definition::{
    role,
    BuildTxConfig,
    BuilderSpec,
    DocsInfo,
    InputHelper,
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
        tx_type: TransactionName::CourseOwnerModulesMint,
        role: role::OWNER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "module-policy-v1",
            yaml_path: "protocol/v1/course/owner/modules-mint.yaml",
            required_tokens: &["ACCESS_TOKEN", "COURSE_OWNER_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::split(
                Schema::object([
                    Field::required("courseId", FieldType::HexString(56)),
                    Field::required(
                        "slts",
                        FieldType::Array(Box::new(FieldType::NonEmptyString)),
                    ),
                    // Filled by the input helper when absent.
                    Field::optional("moduleTokenName", FieldType::HexString(64)),
                ]),
                Schema::object([
                    Field::required("moduleCode", FieldType::NonEmptyString),
                    Field::optional("moduleTitle", FieldType::String),
                ]),
            ),
            builder: BuilderSpec { endpoint: "/tx/course/modules-mint" },
            estimated_cost: Some(TransactionCost {
                tx_fee: Lovelace(195_000),
                min_deposit: None,
                additional_costs: vec![AdditionalCost {
                    name: "module token output",
                    amount: Lovelace(1_500_000),
                }],
            }),
            input_helpers: vec![InputHelper::ModuleTokenName {
                slts_field: "slts",
                into_field: "moduleTokenName",
            }],
        },
        on_submit: vec![SideEffect::new("create module record", HttpMethod::Post, "/course-modules")
            .body_context("courseId", "buildInputs.courseId")
            .body_context("moduleCode", "buildInputs.moduleCode")
            .body_context("moduleTitle", "buildInputs.moduleTitle")
            .body_context("slts", "buildInputs.slts")
            .body_context("tokenName", "buildInputs.moduleTokenName")
            .body_context("pendingTxHash", "txHash")
            .critical()],
        on_confirmation: vec![SideEffect::new(
            "confirm module record",
            HttpMethod::Patch,
            "/course-modules/{courseId}/{moduleCode}/status",
        )
        .path_param("courseId", "buildInputs.courseId")
        .path_param("moduleCode", "buildInputs.moduleCode")
        .body_literal("status", json!("MINTED"))
        .body_on_chain("tokenName", "mints[0].assetName")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Mint Module",
            title: "Mint a course module",
            description: &[
                "Publishes a module by minting a token named after the hash of its \
                 learning targets.",
                "Changing any learning target later means minting a new token; the name \
                 is the content.",
            ],
            footer_link: "/docs/course/modules",
            footer_link_text: "How module tokens are named",
            success_info: "Module mint submitted. Students can enroll against it once \
                           confirmed.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/module-policy",
            api_docs: Some("/docs/api/course-modules"),
            examples: &["/docs/examples/mint-module"],
        },
    }
}
