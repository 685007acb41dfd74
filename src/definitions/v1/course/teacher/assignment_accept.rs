// SPDX-License-Identifier: Apache-2.0

//! Accept a student's committed assignment.

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
        tx_type: TransactionName::CourseTeacherAssignmentAccept,
        role: role::TEACHER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "course-state-v1",
            yaml_path: "protocol/v1/course/teacher/assignment-accept.yaml",
            required_tokens: &["ACCESS_TOKEN", "TEACHER_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([
                Field::required("policy", FieldType::HexString(56)),
                Field::required("moduleCode", FieldType::NonEmptyString),
                Field::required("studentAlias", FieldType::NonEmptyString),
            ])),
            builder: BuilderSpec { endpoint: "/tx/course/assignment-accept" },
            estimated_cost: Some(TransactionCost::fee(180_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "mark review pending",
            HttpMethod::Patch,
            "/course-modules/{courseId}/{moduleCode}/assignments/{studentAlias}",
        )
        .path_param("courseId", "buildInputs.policy")
        .path_param("moduleCode", "buildInputs.moduleCode")
        .path_param("studentAlias", "buildInputs.studentAlias")
        .body_literal("status", json!("ACCEPT_PENDING"))
        .body_context("pendingTxHash", "txHash")
        .body_context("reviewerId", "userId")
        .critical()],
        on_confirmation: vec![
            SideEffect::new(
                "confirm acceptance",
                HttpMethod::Patch,
                "/course-modules/{courseId}/{moduleCode}/assignments/{studentAlias}",
            )
            .path_param("courseId", "buildInputs.policy")
            .path_param("moduleCode", "buildInputs.moduleCode")
            .path_param("studentAlias", "buildInputs.studentAlias")
            .body_literal("status", json!("ACCEPTED"))
            .body_context("blockHeight", "blockHeight")
            .critical()
            .retry(3, 5_000),
            SideEffect::new("notify student", HttpMethod::Post, "/notifications")
                .body_literal("kind", json!("ASSIGNMENT_ACCEPTED"))
                .body_context("studentAlias", "buildInputs.studentAlias")
                .body_context("moduleCode", "buildInputs.moduleCode"),
        ],
        ui: UiInfo {
            button_text: "Accept Assignment",
            title: "Accept this assignment",
            description: &[
                "Marks the student's module as accepted in their course state token.",
            ],
            footer_link: "/docs/course/reviewing",
            footer_link_text: "Reviewing assignments",
            success_info: "Acceptance submitted. The student's course state updates on \
                           confirmation.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/course-state",
            api_docs: Some("/docs/api/course-modules"),
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
    fn three_placeholders_resolve() {
        let context = mock_submission_context(Some(json!({
            "buildInputs": {
                "policy": "policy123",
                "moduleCode": "MODULE_1",
                "studentAlias": "ada-lover",
            },
        })));

        let probe = test_side_effect(&definition().on_submit[0], &context);

        assert!(probe.valid);
        assert_eq!(
            probe.resolved_endpoint.as_deref(),
            Some("/course-modules/policy123/MODULE_1/assignments/ada-lover")
        );
    }
}
