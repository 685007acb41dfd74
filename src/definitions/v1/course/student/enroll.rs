// SPDX-License-Identifier: Apache-2.0

//! Enroll into a course by minting a course state token.

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
        tx_type: TransactionName::CourseStudentEnroll,
        role: role::STUDENT,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "course-state-v1",
            yaml_path: "protocol/v1/course/student/enroll.yaml",
            required_tokens: &["ACCESS_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            // No side-effect-only parameters; every key reaches the builder.
            schemas: InputSchemas::unified(Schema::object([Field::required(
                "courseId",
                FieldType::HexString(56),
            )])),
            builder: BuilderSpec { endpoint: "/tx/course/enroll" },
            estimated_cost: Some(TransactionCost::fee_with_deposit(175_000, 2_500_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "record enrollment",
            HttpMethod::Post,
            "/courses/{courseId}/enrollments",
        )
        .path_param("courseId", "buildInputs.courseId")
        .body_context("userId", "userId")
        .body_context("walletAddress", "walletAddress")
        .body_context("pendingTxHash", "txHash")
        .critical()],
        on_confirmation: vec![SideEffect::new(
            "confirm enrollment",
            HttpMethod::Patch,
            "/courses/{courseId}/enrollments/{userId}/status",
        )
        .path_param("courseId", "buildInputs.courseId")
        .path_param("userId", "userId")
        .body_literal("status", json!("ENROLLED"))
        .body_on_chain("courseStateToken", "mints[0].assetName")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Enroll",
            title: "Enroll in this course",
            description: &[
                "Mints your course state token, the on-chain record of your progress \
                 through this course.",
            ],
            footer_link: "/docs/course/enrollment",
            footer_link_text: "About course state tokens",
            success_info: "You are enrolled. Your course state token tracks every module \
                           you complete.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/course-state",
            api_docs: Some("/docs/api/enrollments"),
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
    fn unified_schema_has_no_split_surface() {
        let definition = definition();

        assert!(definition.build_tx_config.schemas.tx_api_schema().is_none());
        assert!(definition
            .input_schema()
            .validate(&json!({ "courseId": "c".repeat(56) }))
            .is_ok());
        assert!(definition.input_schema().validate(&json!({ "courseId": "short" })).is_err());
    }

    #[test]
    fn enrollment_record_carries_the_wallet() {
        let context = mock_submission_context(Some(json!({
            "buildInputs": { "courseId": "c".repeat(56) },
        })));

        let probe = test_side_effect(&definition().on_submit[0], &context);

        assert!(probe.valid);
        assert_eq!(
            probe.resolved_endpoint.unwrap(),
            format!("/courses/{}/enrollments", "c".repeat(56))
        );
        assert_eq!(probe.request_body.unwrap()["userId"], json!("user_0001"));
    }
}
