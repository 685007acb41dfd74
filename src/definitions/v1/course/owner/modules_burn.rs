// SPDX-License-Identifier: Apache-2.0

//! Burn a retired module token.

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
        tx_type: TransactionName::CourseOwnerModulesBurn,
        role: role::OWNER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V1,
            id: "module-policy-v1",
            yaml_path: "protocol/v1/course/owner/modules-burn.yaml",
            required_tokens: &["ACCESS_TOKEN", "COURSE_OWNER_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([
                Field::required("courseId", FieldType::HexString(56)),
                Field::required("moduleCode", FieldType::NonEmptyString),
                Field::required("moduleTokenName", FieldType::HexString(64)),
            ])),
            builder: BuilderSpec { endpoint: "/tx/course/modules-burn" },
            estimated_cost: Some(TransactionCost::fee(175_000)),
            input_helpers: Vec::new(),
        },
        on_submit: vec![SideEffect::new(
            "mark module retiring",
            HttpMethod::Patch,
            "/course-modules/{courseId}/{moduleCode}/status",
        )
        .path_param("courseId", "buildInputs.courseId")
        .path_param("moduleCode", "buildInputs.moduleCode")
        .body_literal("status", json!("RETIRE_PENDING"))
        .body_context("pendingTxHash", "txHash")
        .critical()],
        on_confirmation: vec![SideEffect::new(
            "delete module record",
            HttpMethod::Delete,
            "/course-modules/{courseId}/{moduleCode}",
        )
        .path_param("courseId", "buildInputs.courseId")
        .path_param("moduleCode", "buildInputs.moduleCode")
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Retire Module",
            title: "Retire this module",
            description: &[
                "Burns the module token. Credentials already earned against it are \
                 unaffected.",
            ],
            footer_link: "/docs/course/modules",
            footer_link_text: "Retiring modules",
            success_info: "Module retirement submitted.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v1/module-policy",
            api_docs: Some("/docs/api/course-modules"),
            examples: &[],
        },
    }
}
