// SPDX-License-Identifier: Apache-2.0

//! Deny a contributor's submitted task.

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
        tx_type: TransactionName::ProjectManagerTaskDeny,
        role: role::MANAGER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "treasury-v1",
            yaml_path: "protocol/v1/project/manager/task-deny.yaml",
            required_tokens: &["ACCESS_TOKEN", "MANAGER_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::split(
                Schema::object([
                    Field::required("projectId", FieldType::HexString(56)),
                    Field::required("taskId", FieldType::HexString(64)),
                ]),
                Schema::object([Field::optional("feedback", FieldType::String)]),
            ),
            builder: BuilderSpec { endpoint: "/tx/project/task-deny" },
            estimated_cost: Some(TransactionCost::fee(185_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "mark denial pending",
            HttpMethod::Patch,
            "/projects/{projectId}/tasks/{taskId}",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("taskId", "buildInputs.taskId")
        .body_literal("status", json!("DENY_PENDING"))
        .body_context("feedback", "buildInputs.feedback")
        .body_context("pendingTxHash", "txHash")
        .critical()],
        on_confirmation: vec![SideEffect::new(
            "confirm denial",
            HttpMethod::Patch,
            "/projects/{projectId}/tasks/{taskId}",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("taskId", "buildInputs.taskId")
        .body_literal("status", json!("DENIED"))
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Deny Task",
            title: "Deny this task",
            description: &[
                "Returns the task to the contributor for rework. Your feedback is stored \
                 off-chain with the submission.",
            ],
            footer_link: "/docs/project/reviewing",
            footer_link_text: "Reviewing task submissions",
            success_info: "Denial submitted. The contributor can resubmit once it confirms.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/treasury",
            api_docs: Some("/docs/api/tasks"),
            examples: &[],
        },
    }
}
