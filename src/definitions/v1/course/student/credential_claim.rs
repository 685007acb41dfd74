// SPDX-License-Identifier: Apache-2.0

//! Claim the course credential: burn the course state token, mint the
//! credential token.

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
        tx_type: TransactionName::CourseStudentCredentialClaim,
        role: role::STUDENT,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "course-credential-v1",
            yaml_path: "protocol/v1/course/student/credential-claim.yaml",
            required_tokens: &["ACCESS_TOKEN", "COURSE_STATE"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([Field::required(
                "courseId",
                FieldType::HexString(56),
            )])),
            builder: BuilderSpec { endpoint: "/tx/course/credential-claim" },
            estimated_cost: Some(TransactionCost::fee(190_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "mark graduation pending",
            HttpMethod::Patch,
            "/courses/{courseId}/enrollments/{userId}/status",
        )
        .path_param("courseId", "buildInputs.courseId")
        .path_param("userId", "userId")
        .body_literal("status", json!("PENDING_GRADUATION"))
        .body_context("pendingTxHash", "txHash")
        .critical()],
        on_confirmation: vec![
            SideEffect::new(
                "confirm graduation",
                HttpMethod::Patch,
                "/courses/{courseId}/enrollments/{userId}/status",
            )
            .path_param("courseId", "buildInputs.courseId")
            .path_param("userId", "userId")
            .body_literal("status", json!("GRADUATED"))
            .body_on_chain("credentialToken", "mints[0].assetName")
            .critical()
            .retry(3, 5_000),
            SideEffect::new("index credential", HttpMethod::Post, "/credentials")
                .body_context("userId", "userId")
                .body_context("courseId", "buildInputs.courseId")
                .body_on_chain("token", "mints[0].assetName")
                .body_context("blockHeight", "blockHeight")
                .retry(5, 10_000),
        ],
        ui: UiInfo {
            button_text: "Claim Credential",
            title: "Claim your course credential",
            description: &[
                "Burns your course state token and mints the permanent credential token \
                 in its place.",
                "Every module of the course must be accepted before the chain will \
                 validate this claim.",
            ],
            footer_link: "/docs/course/credentials",
            footer_link_text: "About course credentials",
            success_info: "Congratulations! Your credential claim was submitted; the \
                           credential token appears in your wallet on confirmation.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/course-credential",
            api_docs: Some("/docs/api/credentials"),
            examples: &[],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::definition;
    use crate::definition::validate_definition;
    use crate::testing::{
        mock_confirmation_context,
        test_side_effect,
    };

    #[test]
    fn definition_shape_is_sound() {
        assert!(validate_definition(&definition()).is_empty());
    }

    #[test]
    fn credential_index_reads_the_minted_token() {
        let context = mock_confirmation_context(None);
        let probe = test_side_effect(&definition().on_confirmation[1], &context);

        assert!(probe.valid);
        assert_eq!(probe.request_body.unwrap()["token"], "MODULE_1_hash");
    }

    #[test]
    fn confirmation_effects_carry_retry_policies() {
        for side_effect in definition().on_confirmation {
            assert!(side_effect.retry.is_some());
        }
    }
}
