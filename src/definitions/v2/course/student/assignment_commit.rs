// SPDX-License-Identifier: Apache-2.0

//! Commit assignment evidence under the consolidated v2 contracts.
//!
//! The v2 evidence archive has no database route yet; that side effect
//! carries the sentinel endpoint and is skipped at runtime.

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
    NOT_IMPLEMENTED,
};
use crate::TransactionName;

pub(crate) fn definition() -> TransactionDefinition {
    TransactionDefinition {
        tx_type: TransactionName::CourseStudentAssignmentCommitV2,
        role: role::STUDENT,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V2,
            id: "course-state-v2",
            yaml_path: "protocol/v2/course/student/assignment-commit.yaml",
            required_tokens: &["ACCESS_TOKEN", "COURSE_STATE"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::split(
                Schema::object([
                    Field::required("policy", FieldType::HexString(56)),
                    Field::required("moduleCode", FieldType::NonEmptyString),
                    Field::optional("assignmentInfoHash", FieldType::HexString(64)),
                ]),
                Schema::object([Field::required("assignmentEvidence", FieldType::Object)]),
            ),
            builder: BuilderSpec { endpoint: "/tx/v2/course/assignment-commit" },
            estimated_cost: Some(TransactionCost::fee(165_000)),
            input_helpers: vec![InputHelper::AssignmentInfoHash {
                evidence_field: "assignmentEvidence",
                into_field: "assignmentInfoHash",
            }],
        },
        on_submit: vec![
            SideEffect::new(
                "update module status",
                HttpMethod::Post,
                "/course-modules/{courseId}/{moduleCode}/status",
            )
            .path_param("courseId", "buildInputs.policy")
            .path_param("moduleCode", "buildInputs.moduleCode")
            .body_literal("status", json!("PENDING_TX"))
            .body_context("pendingTxHash", "txHash")
            .critical(),
            // v2 evidence archive: route not migrated yet.
            SideEffect::new("archive evidence", HttpMethod::Post, NOT_IMPLEMENTED),
        ],
        on_confirmation: vec![SideEffect::new(
            "confirm module status",
            HttpMethod::Patch,
            "/course-modules/{courseId}/{moduleCode}/status",
        )
        .path_param("courseId", "buildInputs.policy")
        .path_param("moduleCode", "buildInputs.moduleCode")
        .body_literal("status", json!("COMMITTED"))
        .body_on_chain("moduleHash", "mints[0].assetName")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Commit Assignment",
            title: "Commit your assignment",
            description: &[
                "Commits the hash of your assignment evidence to your course state token \
                 under the consolidated v2 contracts.",
            ],
            footer_link: "/docs/course/assignments",
            footer_link_text: "How assignment commitments work",
            success_info: "Your assignment is committed and awaiting review.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v2/course-state",
            api_docs: Some("/docs/api/course-modules"),
            examples: &[],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::definition;
    use crate::definition::validate_definition;
    use crate::testing::{
        mock_submission_context,
        validate_side_effect,
    };

    #[test]
    fn definition_shape_is_sound() {
        assert!(validate_definition(&definition()).is_empty());
    }

    #[test]
    fn sentinel_effect_is_flagged_for_audits() {
        let problems =
            validate_side_effect(&definition().on_submit[1], &mock_submission_context(None));

        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("Not implemented"));
    }
}
