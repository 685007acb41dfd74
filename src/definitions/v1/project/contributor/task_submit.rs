// SPDX-License-Identifier: Apache-2.0

//! Submit evidence for a committed project task.
//!
//! Reuses the assignment commitment mechanics: the evidence document stays
//! off-chain and its normalized hash goes into the contributor state.

use serde_json::json;

use crate::cost::TransactionCost;
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
        tx_type: TransactionName::ProjectContributorTaskSubmit,
        role: role::CONTRIBUTOR,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "contributor-state-v1",
            yaml_path: "protocol/v1/project/contributor/task-submit.yaml",
            required_tokens: &["ACCESS_TOKEN", "CONTRIBUTOR_STATE"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::split(
                Schema::object([
                    Field::required("projectId", FieldType::HexString(56)),
                    Field::required("taskId", FieldType::HexString(64)),
                    Field::optional("submissionInfoHash", FieldType::HexString(64)),
                ]),
                Schema::object([Field::required("submissionEvidence", FieldType::Object)]),
            ),
            builder: BuilderSpec { endpoint: "/tx/project/task-submit" },
            estimated_cost: Some(TransactionCost::fee(185_000)),
            input_helpers: vec![InputHelper::AssignmentInfoHash {
                evidence_field: "submissionEvidence",
                into_field: "submissionInfoHash",
            }],
        },
        on_submit: vec![
            SideEffect::new(
                "mark task submitted",
                HttpMethod::Patch,
                "/projects/{projectId}/tasks/{taskId}",
            )
            .path_param("projectId", "buildInputs.projectId")
            .path_param("taskId", "buildInputs.taskId")
            .body_literal("status", json!("SUBMIT_PENDING"))
            .body_context("pendingTxHash", "txHash")
            .critical(),
            SideEffect::new(
                "store submission evidence",
                HttpMethod::Post,
                "/projects/{projectId}/tasks/{taskId}/submissions",
            )
            .path_param("projectId", "buildInputs.projectId")
            .path_param("taskId", "buildInputs.taskId")
            .body_context("evidence", "buildInputs.submissionEvidence")
            .body_context("infoHash", "buildInputs.submissionInfoHash")
            .body_context("contributorId", "userId")
            .body_context("txHash", "txHash")
            .critical(),
        ],
        on_confirmation: vec![SideEffect::new(
            "confirm task submission",
            HttpMethod::Patch,
            "/projects/{projectId}/tasks/{taskId}",
        )
        .path_param("projectId", "buildInputs.projectId")
        .path_param("taskId", "buildInputs.taskId")
        .body_literal("status", json!("SUBMITTED"))
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Submit Work",
            title: "Submit your work",
            description: &[
                "Commits the hash of your submission evidence to your contributor state \
                 token for manager review.",
            ],
            footer_link: "/docs/project/tasks",
            footer_link_text: "The task lifecycle",
            success_info: "Work submitted. A project manager will review it against the \
                           on-chain hash.",
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
    use crate::definition::{
        apply_input_helpers,
        validate_definition,
    };
    use crate::hashing::verify_assignment_info_hash;

    #[test]
    fn definition_shape_is_sound() {
        assert!(validate_definition(&definition()).is_empty());
    }

    #[test]
    fn helper_fills_the_submission_hash() {
        let mut inputs = json!({
            "projectId": "p".repeat(56),
            "taskId": "e".repeat(64),
            "submissionEvidence": { "repo": "https://github.com/alice/tests", "branch": "main" },
        });

        apply_input_helpers(&definition().build_tx_config.input_helpers, &mut inputs).unwrap();

        let hash = inputs["submissionInfoHash"].as_str().unwrap().to_owned();
        assert!(verify_assignment_info_hash(&inputs["submissionEvidence"], &hash));
    }
}
