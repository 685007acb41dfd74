// SPDX-License-Identifier: Apache-2.0

//! Mint a module token under the consolidated v2 contracts.
//!
//! The v2 module catalog API does not exist yet: the whole submission-time
//! surface is the sentinel, so only the confirmation-time record is kept in
//! sync by the monitoring service.

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
        tx_type: TransactionName::CourseOwnerModulesMintV2,
        role: role::OWNER,
        protocol_spec: ProtocolSpec {
            version: ProtocolVersion::V2,
            id: "module-policy-v2",
            yaml_path: "protocol/v2/course/owner/modules-mint.yaml",
            required_tokens: &["ACCESS_TOKEN", "COURSE_OWNER_TOKEN"],
        },
        build_tx_config: BuildTxConfig {
            schemas: InputSchemas::unified(Schema::object([
                Field::required("courseId", FieldType::HexString(56)),
                Field::required("slts", FieldType::Array(Box::new(FieldType::NonEmptyString))),
                Field::optional("moduleTokenName", FieldType::HexString(64)),
            ])),
            builder: BuilderSpec { endpoint: "/tx/v2/course/modules-mint" },
            estimated_cost: Some(TransactionCost::fee(175_000)),
            input_helpers: vec![InputHelper::ModuleTokenName {
                slts_field: "slts",
                into_field: "moduleTokenName",
            }],
        },
        on_submit: vec![SideEffect::new(
            "create module record",
            HttpMethod::Post,
            NOT_IMPLEMENTED,
        )],
        on_confirmation: vec![SideEffect::new(
            "index minted module",
            HttpMethod::Post,
            "/course-modules",
        )
        .body_context("courseId", "buildInputs.courseId")
        .body_context("slts", "buildInputs.slts")
        .body_on_chain("tokenName", "mints[0].assetName")
        .body_literal("status", json!("MINTED"))
        .critical()
        .retry(3, 5_000)],
        ui: UiInfo {
            button_text: "Mint Module",
            title: "Mint a course module",
            description: &[
                "Publishes a module under the consolidated v2 contracts. The token name \
                 is the hash of the module's learning targets.",
            ],
            footer_link: "/docs/course/modules",
            footer_link_text: "How module tokens are named",
            success_info: "Module mint submitted.",
        },
        docs: DocsInfo {
            protocol_docs: "/docs/protocol/v2/module-policy",
            api_docs: None,
            examples: &[],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::definition;
    use crate::definition::validate_definition;
    use crate::side_effect::should_execute_side_effect;

    #[test]
    fn definition_shape_is_sound() {
        assert!(validate_definition(&definition()).is_empty());
    }

    #[test]
    fn submission_surface_is_entirely_sentinel() {
        assert!(definition().on_submit.iter().all(|se| !should_execute_side_effect(se)));
    }
}
