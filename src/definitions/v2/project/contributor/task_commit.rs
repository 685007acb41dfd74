// SPDX-License-Identifier: Apache-2.0

//! Commit to a project task under the consolidated v2 contracts.
//!
//! Confirmation-time indexing has not been migrated; the monitoring
//! service skips the sentinel entry.

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
    NOT_IMPLEMENTED,
};
use crate::TransactionName;

pub(crate) fn definition() -> TransactionDefinition {
    TransactionDefinition {
        tx_type: TransactionName::ProjectContributorTaskCommitV2,
        role: role::CONTRIBUTOR,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V2,
            id: "contributor-state-v2",
            yaml_path: "protocol/v2/project/contributor/task-commit.yaml",
            required_tokens: &["ACCESS_TOKEN", "CONTRIBUTOR_STATE"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([
                Field::required("projectId", FieldType::HexString(56)),
                Field::required("taskId", FieldType::HexString(64)),
            ])),
            builder: BuilderSpec { endpoint: "/tx/v2/project/task-commit" },
            estimated_cost: Some(TransactionCost::fee(165_000)),
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
            "index commitment",
            HttpMethod::Patch,
            NOT_IMPLEMENTED,
        )
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Commit to Task",
            title: "Commit to this task",
            description: &[
                "Locks the task to you under the consolidated v2 contracts.",
            ],
            footer_link: "/docs/project/tasks",
            footer_link_text: "The task lifecycle",
            success_info: "Task commitment submitted.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v2/contributor-state",
            api_docs: None,
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
    fn confirmation_surface_awaits_migration() {
        assert!(executable_side_effects(&definition().on_confirmation).is_empty());
    }
}
