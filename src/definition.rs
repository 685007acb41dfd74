// SPDX-License-Identifier: Apache-2.0

//! The transaction-definition record and its building blocks.
//!
//! A definition is a pure value constructed once at registry
//! initialization: a protocol reference, the input-schema surface, a cost
//! estimate, the ordered side-effect lists, and the UI and documentation
//! metadata the app renders around the transaction.

use serde_json::Value;

use crate::cost::TransactionCost;
use crate::hashing::{
    compute_assignment_info_hash,
    compute_slt_hash,
    compute_task_hash,
    TaskRecord,
};
use crate::protocol::{
    ProtocolSpec,
    ProtocolVersion,
};
use crate::schema::{
    InputSchemas,
    Schema,
};
use crate::side_effect::{
    Endpoint,
    SideEffect,
};
use crate::{
    Error,
    TransactionName,
};

/// Role tags used across the catalog.
pub mod role {
    /// A course student.
    pub const STUDENT: &str = "student";
    /// A course teacher.
    pub const TEACHER: &str = "teacher";
    /// A course or project owner.
    pub const OWNER: &str = "owner";
    /// A project manager.
    pub const MANAGER: &str = "manager";
    /// A project contributor.
    pub const CONTRIBUTOR: &str = "contributor";
    /// A platform administrator.
    pub const ADMIN: &str = "admin";
    /// Any authenticated platform user.
    pub const USER: &str = "user";
}

/// The transaction-building service endpoint for one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderSpec {
    /// Path relative to the builder service base URL.
    pub endpoint: &'static str,
}

/// Everything the app needs to render a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiInfo {
    /// The action-button label.
    pub button_text: &'static str,
    /// The dialog title.
    pub title: &'static str,
    /// Explanatory paragraphs shown above the form.
    pub description: &'static [&'static str],
    /// Link shown under the form.
    pub footer_link: &'static str,
    /// Label of the footer link.
    pub footer_link_text: &'static str,
    /// Message shown once every side effect succeeded.
    pub success_info: &'static str,
}

/// Pointers into the protocol and API documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsInfo {
    /// The protocol documentation page.
    pub protocol_docs: &'static str,
    /// The database API documentation page, if one exists.
    pub api_docs: Option<&'static str>,
    /// Worked examples, if any.
    pub examples: &'static [&'static str],
}

/// A declarative preview helper: fills a derived input field from the
/// hashing layer before the builder is called, so the caller can show the
/// on-chain identifier a transaction will create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputHelper {
    /// Hashes an SLT array into the module token name.
    ModuleTokenName {
        /// Input field holding the SLT string array.
        slts_field: &'static str,
        /// Input field the hash is written to.
        into_field: &'static str,
    },
    /// Hashes an evidence document into the assignment-info commitment.
    AssignmentInfoHash {
        /// Input field holding the evidence document.
        evidence_field: &'static str,
        /// Input field the hash is written to.
        into_field: &'static str,
    },
    /// Hashes a task record into the on-chain task identifier.
    TaskId {
        /// Input field holding the task content string.
        content_field: &'static str,
        /// Input field holding the expiration time (epoch milliseconds).
        expiration_field: &'static str,
        /// Input field holding the lovelace reward.
        lovelace_field: &'static str,
        /// Input field holding `[assetId, quantity]` pairs, if the task
        /// carries native-asset rewards.
        assets_field: Option<&'static str>,
        /// Input field the hash is written to.
        into_field: &'static str,
    },
}

impl InputHelper {
    /// Applies this helper to an input map, inserting the derived field.
    ///
    /// Absent source fields leave the inputs untouched; present fields of
    /// the wrong shape are an error.
    ///
    /// # Errors
    /// - [`Error::SchemaValidation`] if a source field has the wrong shape.
    pub fn apply(&self, inputs: &mut Value) -> crate::Result<()> {
        match self {
            Self::ModuleTokenName { slts_field, into_field } => {
                let Some(value) = inputs.get(*slts_field) else { return Ok(()) };

                let slts: Vec<String> = serde_json::from_value(value.clone()).map_err(|_| {
                    Error::SchemaValidation(format!("`{slts_field}` must be a string array"))
                })?;

                insert(inputs, into_field, Value::String(compute_slt_hash(&slts)));
            }
            Self::AssignmentInfoHash { evidence_field, into_field } => {
                let Some(evidence) = inputs.get(*evidence_field) else { return Ok(()) };

                let hash = compute_assignment_info_hash(evidence);
                insert(inputs, into_field, Value::String(hash));
            }
            Self::TaskId {
                content_field,
                expiration_field,
                lovelace_field,
                assets_field,
                into_field,
            } => {
                let Some(content) = inputs.get(*content_field) else { return Ok(()) };

                let project_content = content
                    .as_str()
                    .ok_or_else(|| {
                        Error::SchemaValidation(format!("`{content_field}` must be a string"))
                    })?
                    .to_owned();

                let expiration_time =
                    inputs.get(*expiration_field).and_then(Value::as_i64).ok_or_else(|| {
                        Error::SchemaValidation(format!("`{expiration_field}` must be an integer"))
                    })?;

                let lovelace_amount =
                    inputs.get(*lovelace_field).and_then(Value::as_u64).ok_or_else(|| {
                        Error::SchemaValidation(format!(
                            "`{lovelace_field}` must be a non-negative integer"
                        ))
                    })?;

                let native_assets = match assets_field.and_then(|field| inputs.get(field)) {
                    Some(value) => serde_json::from_value(value.clone()).map_err(|_| {
                        Error::SchemaValidation(
                            "native assets must be `[assetId, quantity]` pairs".to_owned(),
                        )
                    })?,
                    None => Vec::new(),
                };

                let task = TaskRecord {
                    project_content,
                    expiration_time,
                    lovelace_amount,
                    native_assets,
                };

                insert(inputs, into_field, Value::String(compute_task_hash(&task)));
            }
        }

        Ok(())
    }
}

fn insert(inputs: &mut Value, field: &str, value: Value) {
    if let Value::Object(map) = inputs {
        map.insert(field.to_owned(), value);
    }
}

/// Runs every helper of a definition over an input map, in order.
///
/// # Errors
/// - [`Error::SchemaValidation`] if a source field has the wrong shape.
pub fn apply_input_helpers(helpers: &[InputHelper], inputs: &mut Value) -> crate::Result<()> {
    for helper in helpers {
        helper.apply(inputs)?;
    }
    Ok(())
}

/// The build-time surface of one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildTxConfig {
    /// The input-schema surface, unified or split.
    pub schemas: InputSchemas,
    /// The transaction-building service endpoint.
    pub builder: BuilderSpec,
    /// The cost estimate shown before signing, if one is published.
    pub estimated_cost: Option<TransactionCost>,
    /// Preview helpers run over the inputs before building.
    pub input_helpers: Vec<InputHelper>,
}

/// One entry of the transaction catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDefinition {
    /// The registry key.
    pub tx_type: TransactionName,
    /// The actor this transaction belongs to.
    pub role: &'static str,
    /// The on-chain specification this definition implements.
    pub protocol_spec: ProtocolSpec,
    /// The build-time surface.
    pub build_tx_config: BuildTxConfig,
    /// Side effects executed right after submission, in order.
    pub on_submit: Vec<SideEffect>,
    /// Side effects executed by the monitoring service after confirmation,
    /// in order. May be empty, but is always present.
    pub on_confirmation: Vec<SideEffect>,
    /// UI metadata.
    pub ui: UiInfo,
    /// Documentation pointers.
    pub docs: DocsInfo,
}

impl TransactionDefinition {
    /// The protocol revision this definition belongs to.
    #[must_use]
    pub fn version(&self) -> ProtocolVersion {
        self.protocol_spec.version
    }

    /// The tokens the wallet must hold for this transaction to validate.
    #[must_use]
    pub fn required_tokens(&self) -> &'static [&'static str] {
        self.protocol_spec.required_tokens
    }

    /// The schema the caller validates the whole input against.
    #[must_use]
    pub fn input_schema(&self) -> &Schema {
        self.build_tx_config.schemas.input_schema()
    }
}

/// Checks a definition for shape defects a runtime execution would hit.
///
/// Returns one human-readable problem per defect; the registry test suite
/// runs this over the whole catalog.
#[must_use]
pub fn validate_definition(definition: &TransactionDefinition) -> Vec<String> {
    let mut problems = Vec::new();

    for (list, side_effects) in
        [("on_submit", &definition.on_submit), ("on_confirmation", &definition.on_confirmation)]
    {
        for side_effect in side_effects.iter() {
            if side_effect.endpoint == Endpoint::NotImplemented {
                continue;
            }

            for placeholder in side_effect.endpoint.placeholders() {
                if !side_effect.path_params.iter().any(|param| param.name == placeholder) {
                    problems.push(format!(
                        "{}: {list} side effect `{}`: placeholder `{{{placeholder}}}` has no \
                         path_params entry",
                        definition.tx_type, side_effect.name
                    ));
                }
            }

            let mut seen = std::collections::HashSet::new();
            for field in &side_effect.body {
                if !seen.insert(field.key) {
                    problems.push(format!(
                        "{}: {list} side effect `{}`: duplicate body key `{}`",
                        definition.tx_type, side_effect.name, field.key
                    ));
                }
            }
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        apply_input_helpers,
        InputHelper,
    };
    use crate::hashing::{
        compute_slt_hash,
        compute_task_hash,
        TaskRecord,
    };

    #[test]
    fn module_token_helper_previews_the_hash() {
        let mut inputs = json!({
            "slts": ["I can mint an access token."],
        });

        let helper =
            InputHelper::ModuleTokenName { slts_field: "slts", into_field: "moduleTokenName" };
        helper.apply(&mut inputs).unwrap();

        assert_eq!(
            inputs["moduleTokenName"],
            json!(compute_slt_hash(&["I can mint an access token."]))
        );
    }

    #[test]
    fn absent_source_fields_are_left_alone() {
        let mut inputs = json!({ "other": 1 });

        let helper =
            InputHelper::ModuleTokenName { slts_field: "slts", into_field: "moduleTokenName" };
        helper.apply(&mut inputs).unwrap();

        assert_eq!(inputs, json!({ "other": 1 }));
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let mut inputs = json!({ "slts": "not an array" });

        let helper =
            InputHelper::ModuleTokenName { slts_field: "slts", into_field: "moduleTokenName" };
        assert!(helper.apply(&mut inputs).is_err());
    }

    #[test]
    fn task_helper_builds_the_full_record() {
        let mut inputs = json!({
            "taskContent": "Write integration tests for the enrollment flow",
            "expirationTime": 1_767_225_600_000_i64,
            "lovelaceAmount": 25_000_000_u64,
        });

        let helpers = [InputHelper::TaskId {
            content_field: "taskContent",
            expiration_field: "expirationTime",
            lovelace_field: "lovelaceAmount",
            assets_field: Some("nativeAssets"),
            into_field: "taskId",
        }];

        apply_input_helpers(&helpers, &mut inputs).unwrap();

        let expected = compute_task_hash(&TaskRecord {
            project_content: "Write integration tests for the enrollment flow".to_owned(),
            expiration_time: 1_767_225_600_000,
            lovelace_amount: 25_000_000,
            native_assets: Vec::new(),
        });

        assert_eq!(inputs["taskId"], json!(expected));
    }
}
