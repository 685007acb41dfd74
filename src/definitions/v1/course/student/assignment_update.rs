// SPDX-License-Identifier: Apache-2.0

//! Replace previously committed assignment evidence.
//!
//! Same commitment mechanics as the initial commit; the old hash is
//! superseded on-chain and the stored evidence replaced.

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
        tx_type: TransactionName::CourseStudentAssignmentUpdate,
        role: role::STUDENT,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "course-state-v1",
            yaml_path: "protocol/v1/course/student/assignment-update.yaml",
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
            builder: BuilderSpec { endpoint: "/tx/course/assignment-update" },
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
            SideEffect::new(
                "replace assignment evidence",
                HttpMethod::Put,
                "/assignments/{courseId}/{moduleCode}",
            )
            .path_param("courseId", "buildInputs.policy")
            .path_param("moduleCode", "buildInputs.moduleCode")
            .body_context("evidence", "buildInputs.assignmentEvidence")
            .body_context("infoHash", "buildInputs.assignmentInfoHash")
            .body_context("studentId", "userId")
            .body_context("txHash", "txHash")
            .critical(),
        ],
        on_confirmation: vec![SideEffect::new(
            "confirm module status",
            HttpMethod::Patch,
            "/course-modules/{courseId}/{moduleCode}/status",
        )
        .path_param("courseId", "buildInputs.policy")
        .path_param("moduleCode", "buildInputs.moduleCode")
        .body_literal("status", json!("UPDATED"))
        .body_on_chain("moduleHash", "mints[0].assetName")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Update Assignment",
            title: "Update your assignment",
            description: &[
                "Replaces your committed evidence with a new version and commits the new \
                 hash on-chain. Your teacher reviews the latest version only.",
            ],
            footer_link: "/docs/course/assignments",
            footer_link_text: "How assignment commitments work",
            success_info: "Your updated assignment is committed and awaiting review.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/course-state",
            api_docs: Some("/docs/api/assignments"),
            examples: &[],
        },
    }
}
