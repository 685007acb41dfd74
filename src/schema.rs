// SPDX-License-Identifier: Apache-2.0

//! A small combinator schema over JSON inputs.
//!
//! A [`Schema`] is a parser from a JSON object to a list of issues; an empty
//! list means the input is valid. Definitions that separate on-chain
//! parameters from side-effect-only parameters compose two schemas with
//! [`InputSchemas::split`], which also produces the merged schema the caller
//! validates the whole input against.

use std::collections::HashSet;
use std::fmt::{
    self,
    Display,
    Formatter,
};

use serde_json::Value;

use crate::path::json_type_name;

/// The expected shape of one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Any JSON string.
    String,
    /// A JSON string with at least one non-whitespace character.
    NonEmptyString,
    /// A hex string of exactly the given character length.
    HexString(usize),
    /// Any JSON integer (no fractional part).
    Integer,
    /// A non-negative JSON integer.
    UnsignedInteger,
    /// A JSON boolean.
    Boolean,
    /// A JSON array with elements of the given shape.
    Array(Box<FieldType>),
    /// Any JSON object.
    Object,
    /// Any JSON value at all.
    Any,
}

/// One named field of an input schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    field_type: FieldType,
    required: bool,
}

impl Field {
    /// A field that must be present and match the given shape.
    #[must_use]
    pub fn required(name: &'static str, field_type: FieldType) -> Self {
        Self { name, field_type, required: true }
    }

    /// A field that may be absent, but must match the given shape if present.
    #[must_use]
    pub fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self { name, field_type, required: false }
    }

    /// The field's key in the input object.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A problem reported by schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Where in the input the problem is (`field`, `field[2]`, …).
    pub path: String,
    /// What is wrong there.
    pub message: String,
}

impl Display for SchemaIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validator for one JSON input object.
///
/// Unknown top-level keys are permitted and preserved; they flow through to
/// `buildInputs` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// A schema over the given fields.
    #[must_use]
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Self { fields: fields.into_iter().collect() }
    }

    /// A schema with no declared fields (accepts any object).
    #[must_use]
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// The declared fields.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The declared field names.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Validates an input object against this schema.
    ///
    /// # Errors
    /// Returns every [`SchemaIssue`] found; an input is valid iff the list
    /// would be empty.
    pub fn validate(&self, input: &Value) -> Result<(), Vec<SchemaIssue>> {
        let Value::Object(map) = input else {
            return Err(vec![SchemaIssue {
                path: "$".to_owned(),
                message: format!("expected an object, got {}", json_type_name(input)),
            }]);
        };

        let mut issues = Vec::new();

        for field in &self.fields {
            match map.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        issues.push(SchemaIssue {
                            path: field.name.to_owned(),
                            message: "required field is missing".to_owned(),
                        });
                    }
                }
                Some(value) => check_type(&field.field_type, field.name, value, &mut issues),
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    /// Keeps only the keys of `input` that this schema declares.
    #[must_use]
    pub fn project(&self, input: &Value) -> Value {
        let Value::Object(map) = input else {
            return Value::Object(serde_json::Map::new());
        };

        let keys: HashSet<&str> = self.keys().collect();

        Value::Object(
            map.iter()
                .filter(|(key, _)| keys.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

fn check_type(expected: &FieldType, path: &str, value: &Value, issues: &mut Vec<SchemaIssue>) {
    let mismatch = |issues: &mut Vec<SchemaIssue>, wanted: &str| {
        issues.push(SchemaIssue {
            path: path.to_owned(),
            message: format!("expected {wanted}, got {}", json_type_name(value)),
        });
    };

    match expected {
        FieldType::Any => {}
        FieldType::String => {
            if !value.is_string() {
                mismatch(issues, "a string");
            }
        }
        FieldType::NonEmptyString => match value.as_str() {
            Some(s) if !s.trim().is_empty() => {}
            Some(_) => issues.push(SchemaIssue {
                path: path.to_owned(),
                message: "string must not be empty".to_owned(),
            }),
            None => mismatch(issues, "a string"),
        },
        FieldType::HexString(len) => match value.as_str() {
            Some(s) if s.len() == *len && s.bytes().all(|b| b.is_ascii_hexdigit()) => {}
            Some(s) => issues.push(SchemaIssue {
                path: path.to_owned(),
                message: format!("expected {len} hex characters, got `{s}`"),
            }),
            None => mismatch(issues, "a hex string"),
        },
        FieldType::Integer => {
            if value.as_i64().is_none() && value.as_u64().is_none() {
                mismatch(issues, "an integer");
            }
        }
        FieldType::UnsignedInteger => {
            if value.as_u64().is_none() {
                mismatch(issues, "a non-negative integer");
            }
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                mismatch(issues, "a boolean");
            }
        }
        FieldType::Object => {
            if !value.is_object() {
                mismatch(issues, "an object");
            }
        }
        FieldType::Array(element) => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    check_type(element, &format!("{path}[{index}]"), item, issues);
                }
            }
            None => mismatch(issues, "an array"),
        },
    }
}

/// The input-schema surface of one transaction definition.
///
/// Either a single schema over every input key, or a split pair where the
/// transaction-builder parameters and the side-effect-only parameters are
/// validated separately and merged for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSchemas {
    /// All keys validated by one schema; everything is available in
    /// `buildInputs` at runtime.
    Unified(Schema),
    /// Disjoint split between builder parameters and side-effect parameters.
    Split {
        /// Parameters forwarded to the transaction-building service.
        tx_api: Schema,
        /// Parameters consumed only by side effects.
        side_effect: Schema,
        /// The composed schema over the disjoint union of both key sets.
        input: Schema,
    },
}

impl InputSchemas {
    /// A definition that does not separate its parameters.
    #[must_use]
    pub fn unified(schema: Schema) -> Self {
        Self::Unified(schema)
    }

    /// Composes a split schema pair.
    ///
    /// The composed input schema validates an object iff the builder schema
    /// validates its projection onto the builder keys and the side-effect
    /// schema validates its projection onto the side-effect keys.
    ///
    /// # Panics
    /// Panics if a key appears in both schemas; that is a defect in the
    /// definition, caught by the registry test suite.
    #[must_use]
    pub fn split(tx_api: Schema, side_effect: Schema) -> Self {
        let tx_keys: HashSet<&str> = tx_api.keys().collect();

        for key in side_effect.keys() {
            assert!(!tx_keys.contains(key), "input key `{key}` appears in both schemas");
        }

        let input = Schema::object(
            tx_api.fields().iter().chain(side_effect.fields()).cloned().collect::<Vec<_>>(),
        );

        Self::Split { tx_api, side_effect, input }
    }

    /// The schema the caller validates the whole input against.
    #[must_use]
    pub fn input_schema(&self) -> &Schema {
        match self {
            Self::Unified(schema) => schema,
            Self::Split { input, .. } => input,
        }
    }

    /// The builder-parameter schema, if this definition separates parameters.
    #[must_use]
    pub fn tx_api_schema(&self) -> Option<&Schema> {
        match self {
            Self::Unified(_) => None,
            Self::Split { tx_api, .. } => Some(tx_api),
        }
    }

    /// The side-effect-parameter schema, if this definition separates
    /// parameters.
    #[must_use]
    pub fn side_effect_schema(&self) -> Option<&Schema> {
        match self {
            Self::Unified(_) => None,
            Self::Split { side_effect, .. } => Some(side_effect),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        Field,
        FieldType,
        InputSchemas,
        Schema,
    };

    fn commit_schemas() -> InputSchemas {
        InputSchemas::split(
            Schema::object([
                Field::required("policy", FieldType::HexString(56)),
                Field::required("moduleCode", FieldType::NonEmptyString),
            ]),
            Schema::object([
                Field::required("assignmentEvidence", FieldType::Object),
                Field::optional("notifyTeacher", FieldType::Boolean),
            ]),
        )
    }

    #[test]
    fn accepts_valid_input() {
        let input = json!({
            "policy": "a".repeat(56),
            "moduleCode": "MODULE_1",
            "assignmentEvidence": { "summary": "done" },
        });

        assert!(commit_schemas().input_schema().validate(&input).is_ok());
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let input = json!({
            "policy": "a".repeat(56),
            "moduleCode": "MODULE_1",
            "assignmentEvidence": {},
            "traceId": "not declared anywhere",
        });

        assert!(commit_schemas().input_schema().validate(&input).is_ok());
    }

    #[test]
    fn reports_missing_and_mismatched_fields() {
        let input = json!({
            "policy": "too short",
            "assignmentEvidence": 7,
        });

        let issues = commit_schemas().input_schema().validate(&input).unwrap_err();
        let paths: Vec<_> = issues.iter().map(|issue| issue.path.as_str()).collect();

        assert_eq!(paths, ["policy", "moduleCode", "assignmentEvidence"]);
    }

    #[test]
    fn split_validates_iff_both_projections_validate() {
        let schemas = commit_schemas();
        let input = json!({
            "policy": "b".repeat(56),
            "moduleCode": "MODULE_2",
            "assignmentEvidence": { "summary": "done" },
            "notifyTeacher": true,
        });

        let tx_api = schemas.tx_api_schema().unwrap();
        let side_effect = schemas.side_effect_schema().unwrap();

        assert!(schemas.input_schema().validate(&input).is_ok());
        assert!(tx_api.validate(&tx_api.project(&input)).is_ok());
        assert!(side_effect.validate(&side_effect.project(&input)).is_ok());

        // Break one side; the composed schema must fail too.
        let broken = json!({
            "policy": "b".repeat(56),
            "moduleCode": "MODULE_2",
            "assignmentEvidence": "not an object",
        });

        assert!(tx_api.validate(&tx_api.project(&broken)).is_ok());
        assert!(side_effect.validate(&side_effect.project(&broken)).is_err());
        assert!(schemas.input_schema().validate(&broken).is_err());
    }

    #[test]
    #[should_panic(expected = "appears in both schemas")]
    fn split_rejects_overlapping_keys() {
        let _ = InputSchemas::split(
            Schema::object([Field::required("policy", FieldType::String)]),
            Schema::object([Field::required("policy", FieldType::String)]),
        );
    }

    #[test]
    fn array_elements_are_checked() {
        let schema = Schema::object([Field::required(
            "slts",
            FieldType::Array(Box::new(FieldType::NonEmptyString)),
        )]);

        assert!(schema.validate(&json!({ "slts": ["I can."] })).is_ok());

        let issues = schema.validate(&json!({ "slts": ["ok", 3] })).unwrap_err();
        assert_eq!(issues[0].path, "slts[1]");
    }
}
