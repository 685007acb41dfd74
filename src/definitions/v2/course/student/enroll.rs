// SPDX-License-Identifier: Apache-2.0

//! Enroll into a course under the consolidated v2 contracts.
//!
//! The v2 global-state index has no database route yet; that side effect
//! carries the sentinel endpoint and is skipped at runtime.

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
        tx_type: TransactionName::CourseStudentEnrollV2,
        role: role::STUDENT,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V2,
            id: "course-state-v2",
            yaml_path: "protocol/v2/course/student/enroll.yaml",
            required_tokens: &["ACCESS_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([Field::required(
                "courseId",
                FieldType::HexString(56),
            )])),
            builder: BuilderSpec { endpoint: "/tx/v2/course/enroll" },
            estimated_cost: Some(TransactionCost::fee_with_deposit(160_000, 2_000_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![
            SideEffect::new(
                "record enrollment",
                HttpMethod::Post,
                "/courses/{courseId}/enrollments",
            )
            .path_param("courseId", "buildInputs.courseId")
            .body_context("userId", "userId")
            .body_context("pendingTxHash", "txHash")
            .critical(),
            // v2 global-state index: route not migrated yet.
            SideEffect::new("index global state", HttpMethod::Post, NOT_IMPLEMENTED),
        ],
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
                "Mints your course state token under the consolidated v2 contracts.",
            ],
            footer_link: "/docs/course/enrollment",
            footer_link_text: "About course state tokens",
            success_info: "You are enrolled.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v2/course-state",
            api_docs: Some("/docs/api/enrollments"),
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
    fn sentinel_effect_is_filtered_from_execution() {
        let definition = definition();

        assert_eq!(definition.on_submit.len(), 2);
        assert_eq!(executable_side_effects(&definition.on_submit).len(), 1);
    }
}
