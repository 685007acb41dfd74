// SPDX-License-Identifier: Apache-2.0

//! Deny a student's committed assignment.
//!
//! The denial reason never goes on-chain; it is a side-effect-only
//! parameter stored with the assignment record.

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
        tx_type: TransactionName::CourseTeacherAssignmentDeny,
        role: role::TEACHER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "course-state-v1",
            yaml_path: "protocol/v1/course/teacher/assignment-deny.yaml",
            required_tokens: &["ACCESS_TOKEN", "TEACHER_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::split(
                Schema::object([
                    Field::required("policy", FieldType::HexString(56)),
                    Field::required("moduleCode", FieldType::NonEmptyString),
                    Field::required("studentAlias", FieldType::NonEmptyString),
                ]),
                Schema::object([Field::optional("feedback", FieldType::String)]),
            ),
            builder: BuilderSpec { endpoint: "/tx/course/assignment-deny" },
            estimated_cost: Some(TransactionCost::fee(180_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "mark denial pending",
            HttpMethod::Patch,
            "/course-modules/{courseId}/{moduleCode}/assignments/{studentAlias}",
        )
        .path_param("courseId", "buildInputs.policy")
        .path_param("moduleCode", "buildInputs.moduleCode")
        .path_param("studentAlias", "buildInputs.studentAlias")
        .body_literal("status", json!("DENY_PENDING"))
        .body_context("pendingTxHash", "txHash")
        .body_context("feedback", "buildInputs.feedback")
        .critical()],
        on_confirmation: vec![SideEffect::new(
            "confirm denial",
            HttpMethod::Patch,
            "/course-modules/{courseId}/{moduleCode}/assignments/{studentAlias}",
        )
        .path_param("courseId", "buildInputs.policy")
        .path_param("moduleCode", "buildInputs.moduleCode")
        .path_param("studentAlias", "buildInputs.studentAlias")
        .body_literal("status", json!("DENIED"))
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Deny Assignment",
            title: "Deny this assignment",
            description: &[
                "Returns the module to the student for another attempt. Your feedback is \
                 stored off-chain with the assignment.",
            ],
            footer_link: "/docs/course/reviewing",
            footer_link_text: "Reviewing assignments",
            success_info: "Denial submitted. The student can revise and recommit once it \
                           confirms.",
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

    fn inputs(feedback: Option<&str>) -> serde_json::Value {
        let mut build_inputs = json!({
            "policy": "policy123",
            "moduleCode": "MODULE_1",
            "studentAlias": "ada-lover",
        });

        if let Some(feedback) = feedback {
            build_inputs["feedback"] = json!(feedback);
        }

        json!({ "buildInputs": build_inputs })
    }

    #[test]
    fn definition_shape_is_sound() {
        assert!(validate_definition(&definition()).is_empty());
    }

    #[test]
    fn feedback_flows_into_the_body_when_present() {
        let context = mock_submission_context(Some(inputs(Some("Please add test coverage."))));
        let probe = test_side_effect(&definition().on_submit[0], &context);

        assert_eq!(
            probe.request_body.unwrap()["feedback"],
            json!("Please add test coverage.")
        );
    }

    #[test]
    fn feedback_is_omitted_when_absent() {
        let context = mock_submission_context(Some(inputs(None)));
        let probe = test_side_effect(&definition().on_submit[0], &context);

        assert!(probe.valid);
        assert!(probe.request_body.unwrap().get("feedback").is_none());
    }
}
