// SPDX-License-Identifier: Apache-2.0

//! Commit to an open project task.
//!
//! The task is referenced by its on-chain identifier, the hash of the
//! published task record.

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
        tx_type: TransactionName::ProjectContributorTaskCommit,
        role: role::CONTRIBUTOR,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "contributor-state-v1",
            yaml_path: "protocol/v1/project/contributor/task-commit.yaml",
            required_tokens: &["ACCESS_TOKEN", "CONTRIBUTOR_STATE"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([
                Field::required("projectId", FieldType::HexString(56)),
                Field::required("taskId", FieldType::HexString(64)),
            ])),
            builder: BuilderSpec { endpoint: "/tx/project/task-commit" },
            estimated_cost: Some(TransactionCost::fee(185_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "mark task commitment pending",
            HttpMethod::Patch,
            "/projects/{projectId}/tasks/{taskId}",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("taskId", "buildInputs.taskId")
        .body_literal("status", json!("COMMIT_PENDING"))
        .body_context("contributorId", "userId")
        .body_context("pendingTxHash", "txHash")
        .critical()],
        on_confirmation: vec![SideEffect::new(
            "confirm task commitment",
            HttpMethod::Patch,
            "/projects/{projectId}/tasks/{taskId}",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("taskId", "buildInputs.taskId")
        .body_literal("status", json!("COMMITTED"))
        .body_context("blockHeight", "blockHeight")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Commit to Task",
            title: "Commit to this task",
            description: &[
                "Locks the task to you in your contributor state token. The escrowed \
                 reward is released when a manager accepts your work.",
            ],
            footer_link: "/docs/project/tasks",
            footer_link_text: "The task lifecycle",
            success_info: "Task commitment submitted. The task is yours once it confirms.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/contributor-state",
            api_docs: Some("/docs/api/tasks"),
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

    #[test]
    fn task_id_is_validated_as_a_hash() {
        let schema = definition();
        let schema = schema.input_schema();

        assert!(schema
            .validate(&json!({ "projectId": "p".repeat(56), "taskId": "e".repeat(64) }))
            .is_ok());
        assert!(schema
            .validate(&json!({ "projectId": "p".repeat(56), "taskId": "TASK-1" }))
            .is_err());
    }

    #[test]
    fn commitment_names_the_contributor() {
        let context = mock_submission_context(Some(json!({
            "buildInputs": { "projectId": "p".repeat(56), "taskId": "e".repeat(64) },
        })));

        let probe = test_side_effect(&definition().on_submit[0], &context);

        assert!(probe.valid);
        assert_eq!(probe.request_body.unwrap()["contributorId"], json!("user_0001"));
    }
}
