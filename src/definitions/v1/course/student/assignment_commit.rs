// SPDX-License-Identifier: Apache-2.0

//! Commit assignment evidence for a course module.
//!
//! The evidence document stays off-chain; its normalized hash is committed
//! into the student's course state token. The database keeps the module
//! status and the full evidence in lockstep with the chain.

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
        tx_type: TransactionName::CourseStudentAssignmentCommit,
        role: role::STUDENT,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "course-state-v1",
            yaml_path: "protocol/v1/course/student/assignment-commit.yaml",
            required_tokens: &["ACCESS_TOKEN", "COURSE_STATE"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::split(
                Schema::object([
                    Field::required("policy", FieldType::HexString(56)),
                    Field::required("moduleCode", FieldType::NonEmptyString),
                    // Filled by the input helper when absent.
                    Field::optional("assignmentInfoHash", FieldType::HexString(64)),
                ]),
                Schema::object([
                    Field::required("assignmentEvidence", FieldType::Object),
                    Field::optional("notifyTeacher", FieldType::Boolean),
                ]),
            ),
            builder: BuilderSpec { endpoint: "/tx/course/assignment-commit" },
            estimated_cost: Some(TransactionCost::fee(185_000)),
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
            SideEffect::new("store assignment evidence", HttpMethod::Post, "/assignments")
                .body_context("courseId", "buildInputs.policy")
                .body_context("moduleCode", "buildInputs.moduleCode")
                .body_context("evidence", "buildInputs.assignmentEvidence")
                .body_context("infoHash", "buildInputs.assignmentInfoHash")
                .body_context("studentId", "userId")
                .body_context("txHash", "txHash")
                .critical(),
            SideEffect::new("notify teacher", HttpMethod::Post, "/notifications")
                .body_literal("kind", json!("ASSIGNMENT_COMMITTED"))
                .body_context("courseId", "buildInputs.policy")
                .body_context("moduleCode", "buildInputs.moduleCode")
                .body_context("studentId", "userId"),
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
        .body_context("blockHeight", "blockHeight")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Commit Assignment",
            title: "Commit your assignment",
            description: &[
                "Commits the hash of your assignment evidence to your course state token.",
                "Your evidence itself stays off-chain; only its fingerprint goes on-chain, \
                 so your teacher can verify the submission has not changed.",
            ],
            footer_link: "/docs/course/assignments",
            footer_link_text: "How assignment commitments work",
            success_info: "Your assignment is committed. Your teacher has been notified and \
                           will review it against the on-chain hash.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/course-state",
            api_docs: Some("/docs/api/course-modules"),
            examples: &["/docs/examples/commit-assignment"],
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
    use crate::testing::{
        mock_confirmation_context,
        mock_submission_context,
        test_side_effect,
    };

    #[test]
    fn definition_shape_is_sound() {
        assert!(validate_definition(&definition()).is_empty());
    }

    #[test]
    fn submit_resolves_course_and_module_from_inputs() {
        let context = mock_submission_context(Some(json!({
            "txHash": "abc123",
            "buildInputs": { "policy": "policy123", "moduleCode": "MODULE_1" },
        })));

        let probe = test_side_effect(&definition().on_submit[0], &context);

        assert!(probe.valid);
        assert_eq!(
            probe.resolved_endpoint.as_deref(),
            Some("/course-modules/policy123/MODULE_1/status")
        );
        assert_eq!(
            probe.request_body,
            Some(json!({ "status": "PENDING_TX", "pendingTxHash": "abc123" }))
        );
    }

    #[test]
    fn confirmation_extracts_the_minted_module_hash() {
        let context = mock_confirmation_context(None);
        let probe = test_side_effect(&definition().on_confirmation[0], &context);

        assert!(probe.valid);
        let body = probe.request_body.unwrap();
        assert_eq!(body["moduleHash"], json!("MODULE_1_hash"));
        assert_eq!(body["status"], json!("COMMITTED"));
    }

    #[test]
    fn helper_fills_the_evidence_hash() {
        let mut inputs = json!({
            "policy": "a".repeat(56),
            "moduleCode": "MODULE_1",
            "assignmentEvidence": { "summary": "Deployed the vesting contract", "links": [] },
        });

        apply_input_helpers(&definition().build_tx_config.input_helpers, &mut inputs).unwrap();

        let hash = inputs["assignmentInfoHash"].as_str().unwrap();
        assert!(verify_assignment_info_hash(&inputs["assignmentEvidence"], hash));

        // The filled input now passes the full schema.
        assert!(definition().input_schema().validate(&inputs).is_ok());
    }

    #[test]
    fn evidence_is_a_side_effect_only_parameter() {
        let schemas = definition().build_tx_config.schemas;

        let tx_keys: Vec<_> = schemas.tx_api_schema().unwrap().keys().collect();
        let se_keys: Vec<_> = schemas.side_effect_schema().unwrap().keys().collect();

        assert!(tx_keys.contains(&"policy"));
        assert!(se_keys.contains(&"assignmentEvidence"));
        assert!(!tx_keys.contains(&"assignmentEvidence"));
    }
}
