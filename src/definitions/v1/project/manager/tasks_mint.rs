// SPDX-License-Identifier: Apache-2.0

//! Publish a task as an on-chain record named by its task hash.
//!
//! The identifier is the Blake2b-256 of the Plutus-encoded task record, so
//! the caller can preview the task token name before the transaction is
//! built.

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
        tx_type: TransactionName::ProjectManagerTasksMint,
        role: role::MANAGER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "treasury-v1",
            yaml_path: "protocol/v1/project/manager/tasks-mint.yaml",
            required_tokens: &["ACCESS_TOKEN", "MANAGER_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::split(
                Schema::object([
                    Field::required("projectId", FieldType::HexString(56)),
                    Field::required("taskContent", FieldType::NonEmptyString),
                    Field::required("expirationTime", FieldType::Integer),
                    Field::required("lovelaceAmount", FieldType::UnsignedInteger),
                    Field::optional("nativeAssets", FieldType::Array(Box::new(FieldType::Any))),
                    // Filled by the input helper when absent.
                    Field::optional("taskId", FieldType::HexString(64)),
                ]),
                Schema::object([Field::optional("taskTitle", FieldType::String)]),
            ),
            builder: BuilderSpec { endpoint: "/tx/project/tasks-mint" },
            estimated_cost: Some(TransactionCost {
                tx_fee: Lovelace(195_000),
                min_deposit: None,
                additional_costs: vec![AdditionalCost {
                    name: "task record output",
                    amount: Lovelace(1_800_000),
                }],
            }),
            input_helpers: vec![InputHelper::TaskId {
                content_field: "taskContent",
                expiration_field: "expirationTime",
                lovelace_field: "lovelaceAmount",
                assets_field: Some("nativeAssets"),
                into_field: "taskId",
            }],
        },
        on_submit: vec![SideEffect::new(
            "create task record",
            HttpMethod::Post,
            "/projects/{projectId}/tasks",
        )
        .path_param("projectId", "buildInputs.projectId")
        .body_context("taskId", "buildInputs.taskId")
        .body_context("title", "buildInputs.taskTitle")
        .body_context("content", "buildInputs.taskContent")
        .body_context("expirationTime", "buildInputs.expirationTime")
        .body_context("lovelaceAmount", "buildInputs.lovelaceAmount")
        .body_context("pendingTxHash", "txHash")
        .critical()],
        on_confirmation: vec![SideEffect::new(
            "confirm task record",
            HttpMethod::Patch,
            "/projects/{projectId}/tasks/{taskId}",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("taskId", "buildInputs.taskId")
        .body_literal("status", json!("OPEN"))
        .body_on_chain("taskToken", "mints[0].assetName")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Publish Task",
            title: "Publish a task",
            description: &[
                "Escrows the reward and publishes the task record on-chain. The task \
                 identifier is the hash of its content, deadline, and reward.",
            ],
            footer_link: "/docs/project/tasks",
            footer_link_text: "The task lifecycle",
            success_info: "Task published. Contributors can commit to it once it confirms.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/treasury",
            api_docs: Some("/docs/api/tasks"),
            examples: &["/docs/examples/publish-task"],
        },
    }
}
