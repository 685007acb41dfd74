// SPDX-License-Identifier: Apache-2.0

//! Accept a contributor's submitted task and release the escrowed reward.

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
        tx_type: TransactionName::ProjectManagerTaskAccept,
        role: role::MANAGER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "treasury-v1",
            yaml_path: "protocol/v1/project/manager/task-accept.yaml",
            required_tokens: &["ACCESS_TOKEN", "MANAGER_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([
                Field::required("projectId", FieldType::HexString(56)),
                Field::required("taskId", FieldType::HexString(64)),
                Field::required("contributorAlias", FieldType::NonEmptyString),
            ])),
            builder: BuilderSpec { endpoint: "/tx/project/task-accept" },
            estimated_cost: Some(TransactionCost::fee(195_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "mark acceptance pending",
            HttpMethod::Patch,
            "/projects/{projectId}/tasks/{taskId}",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("taskId", "buildInputs.taskId")
        .body_literal("status", json!("ACCEPT_PENDING"))
        .body_context("reviewerId", "userId")
        .body_context("pendingTxHash", "txHash")
        .critical()],
        on_confirmation: vec![
            SideEffect::new(
                "confirm acceptance",
                HttpMethod::Patch,
                "/projects/{projectId}/tasks/{taskId}",
            )
            .path_param("projectId", "buildInputs.projectId")
            .path_param("taskId", "buildInputs.taskId")
            .body_literal("status", json!("ACCEPTED"))
            .body_context("blockHeight", "blockHeight")
            .critical()
            .retry(3, 5_000),
            SideEffect::new("record payout", HttpMethod::Post, "/payouts")
                .body_context("projectId", "buildInputs.projectId")
                .body_context("taskId", "buildInputs.taskId")
                .body_context("contributorAlias", "buildInputs.contributorAlias")
                .body_context("txHash", "txHash")
                .retry(5, 10_000),
            SideEffect::new("notify contributor", HttpMethod::Post, "/notifications")
                .body_literal("kind", json!("TASK_ACCEPTED"))
                .body_context("contributorAlias", "buildInputs.contributorAlias")
                .body_context("taskId", "buildInputs.taskId"),
        ],
        ui: UiInfo {
            button_text: "Accept Task",
            title: "Accept this task",
            description: &[
                "Releases the escrowed reward to the contributor and records the \
                 acceptance in both state tokens.",
            ],
            footer_link: "/docs/project/reviewing",
            footer_link_text: "Reviewing task submissions",
            success_info: "Acceptance submitted. The reward is released on confirmation.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/treasury",
            api_docs: Some("/docs/api/tasks"),
            examples: &[],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::definition;
    use crate::definition::validate_definition;
    use crate::side_effect::executable_side_effects;

    #[test]
    fn definition_shape_is_sound() {
        assert!(validate_definition(&definition()).is_empty());
    }

    #[test]
    fn every_confirmation_effect_is_executable() {
        let definition = definition();
        assert_eq!(
            executable_side_effects(&definition.on_confirmation).len(),
            definition.on_confirmation.len()
        );
    }
}
