// SPDX-License-Identifier: Apache-2.0

//! The side-effect execution engine.
//!
//! Given a definition's side-effect list, a runtime context, and execution
//! options, the engine resolves templated endpoints, constructs request
//! bodies, and invokes the injected transport strictly sequentially in
//! declaration order. Per-effect failures are recorded, never thrown; only
//! an opt-in end-of-pass raise converts critical failures into an error.

use serde_json::Value;

use crate::path::Resolution;
use crate::side_effect::{
    BodyField,
    Endpoint,
    FieldSource,
    SideEffect,
};
use crate::transport::{
    Transport,
    TransportRequest,
};
use crate::{
    Error,
    HttpMethod,
};

/// Options for one engine invocation.
#[derive(Clone, Copy)]
pub struct ExecuteOptions<'a> {
    /// Base URL the resolved endpoint paths are appended to.
    pub api_base_url: &'a str,
    /// Bearer token sent in the `Authorization` header.
    pub auth_token: &'a str,
    /// The injected transport.
    pub transport: &'a dyn Transport,
    /// Raise [`Error::CriticalSideEffects`] after the full pass if any
    /// critical side effect failed.
    pub throw_on_critical_failure: bool,
}

/// The outcome of one side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideEffectResult {
    /// The side effect's declared name.
    pub name: String,
    /// The resolved endpoint, or the template/sentinel when resolution did
    /// not complete.
    pub endpoint: String,
    /// Whether the side effect succeeded (skipped effects count as
    /// successful).
    pub success: bool,
    /// Whether the sentinel endpoint caused the effect to be skipped.
    pub skipped: bool,
    /// The HTTP status, when a response was received.
    pub status: Option<u16>,
    /// The failure reason, when `success` is false.
    pub error: Option<String>,
}

/// One failed critical side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalFailure {
    /// The side effect's declared name.
    pub side_effect: String,
    /// The failure reason.
    pub error: String,
}

/// The aggregate result of one engine pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideEffectReport {
    /// `true` iff no critical side effect failed.
    pub success: bool,
    /// Per-effect outcomes, in declaration order.
    pub results: Vec<SideEffectResult>,
    /// One entry per failed critical side effect.
    pub critical_errors: Vec<CriticalFailure>,
}

/// Executes a side-effect list against the injected transport.
///
/// The context is projected to JSON once per invocation; dotted paths in
/// `path_params` and `body` entries resolve against that projection. Every
/// side effect is processed regardless of earlier outcomes.
///
/// # Errors
/// - [`Error::ContextProjection`] if the context cannot be serialized.
/// - [`Error::CriticalSideEffects`] after the full pass, iff
///   `throw_on_critical_failure` is set and a critical side effect failed.
pub async fn execute_side_effects<C: serde::Serialize>(
    side_effects: &[SideEffect],
    context: &C,
    options: ExecuteOptions<'_>,
) -> crate::Result<SideEffectReport> {
    let context =
        serde_json::to_value(context).map_err(|e| Error::ContextProjection(e.to_string()))?;

    let mut results = Vec::with_capacity(side_effects.len());
    let mut critical_errors = Vec::new();

    for side_effect in side_effects {
        let result = execute_one(side_effect, &context, &options).await;

        if !result.success {
            let error = result.error.clone().unwrap_or_else(|| "unknown error".to_owned());
            log::warn!("side effect `{}` failed: {error}", side_effect.name);

            if side_effect.critical {
                critical_errors
                    .push(CriticalFailure { side_effect: side_effect.name.to_owned(), error });
            }
        } else if result.skipped {
            log::debug!("side effect `{}` skipped (not implemented)", side_effect.name);
        } else {
            log::debug!("side effect `{}` succeeded", side_effect.name);
        }

        results.push(result);
    }

    let report = SideEffectReport {
        success: critical_errors.is_empty(),
        results,
        critical_errors,
    };

    if options.throw_on_critical_failure && !report.success {
        return Err(Error::CriticalSideEffects {
            failures: report
                .critical_errors
                .iter()
                .map(|failure| format!("{}: {}", failure.side_effect, failure.error))
                .collect(),
        });
    }

    Ok(report)
}

async fn execute_one(
    side_effect: &SideEffect,
    context: &Value,
    options: &ExecuteOptions<'_>,
) -> SideEffectResult {
    let mut result = SideEffectResult {
        name: side_effect.name.to_owned(),
        endpoint: side_effect.endpoint.to_string(),
        success: false,
        skipped: false,
        status: None,
        error: None,
    };

    if side_effect.endpoint == Endpoint::NotImplemented {
        result.success = true;
        result.skipped = true;
        return result;
    }

    let endpoint = match resolve_endpoint(side_effect, context) {
        Ok(endpoint) => endpoint,
        Err(error) => {
            result.error = Some(error.to_string());
            return result;
        }
    };
    result.endpoint.clone_from(&endpoint);

    let body = match construct_request_body(&side_effect.body, context) {
        Ok(body) => body,
        Err(error) => {
            result.error = Some(error.to_string());
            return result;
        }
    };

    let request = TransportRequest {
        url: format!("{}{endpoint}", options.api_base_url),
        method: side_effect.method,
        headers: vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            ("Authorization".to_owned(), format!("Bearer {}", options.auth_token)),
        ],
        body: (side_effect.method != HttpMethod::Get).then(|| body.to_string()),
    };

    match options.transport.send(request).await {
        Ok(response) => {
            result.status = Some(response.status);

            if response.is_ok() {
                result.success = true;
            } else {
                let message = if response.status_text.is_empty() {
                    response.body
                } else {
                    response.status_text
                };
                result.error =
                    Some(Error::Api { status: response.status, message }.to_string());
            }
        }
        Err(error) => {
            result.error = Some(Error::Transport(error.to_string()).to_string());
        }
    }

    result
}

/// Substitutes every `{name}` placeholder of a side effect's endpoint with
/// the stringified value at its bound context path.
///
/// # Errors
/// - [`Error::PathResolution`] if a placeholder has no binding, or its path
///   is absent or hits a type mismatch.
pub fn resolve_endpoint(side_effect: &SideEffect, context: &Value) -> crate::Result<String> {
    // Sentinel endpoints have nothing to resolve; the engine skips them
    // before calling this.
    let Endpoint::Template(template) = &side_effect.endpoint else {
        return Ok(side_effect.endpoint.to_string());
    };

    let mut resolved = template.clone();

    for placeholder in side_effect.endpoint.placeholders() {
        let param = side_effect
            .path_params
            .iter()
            .find(|param| param.name == placeholder)
            .ok_or_else(|| Error::PathResolution {
                placeholder: placeholder.to_owned(),
                path: String::new(),
                reason: "no path_params entry for placeholder".to_owned(),
            })?;

        let value = match param.path.resolve(context) {
            Resolution::Found(value) => stringify(value),
            Resolution::Absent => {
                return Err(Error::PathResolution {
                    placeholder: placeholder.to_owned(),
                    path: param.path.source().to_owned(),
                    reason: "path not found in context".to_owned(),
                })
            }
            Resolution::Mismatch { segment, actual } => {
                return Err(Error::PathResolution {
                    placeholder: placeholder.to_owned(),
                    path: param.path.source().to_owned(),
                    reason: format!("cannot apply `{segment}` to {actual}"),
                })
            }
        };

        resolved = resolved.replace(&format!("{{{placeholder}}}"), &value);
    }

    Ok(resolved)
}

/// Builds the JSON request body of a side effect by evaluating each body
/// entry against the context projection.
///
/// Entries resolving to an absent value are omitted; literal entries pass
/// through verbatim.
///
/// # Errors
/// - [`Error::BodyConstruction`] if a context or on-chain path hits a type
///   mismatch.
pub fn construct_request_body(body: &[BodyField], context: &Value) -> crate::Result<Value> {
    let mut object = serde_json::Map::new();

    for field in body {
        let (path, root) = match &field.source {
            FieldSource::Literal(value) => {
                object.insert(field.key.to_owned(), value.clone());
                continue;
            }
            FieldSource::Context(path) => (path, Some(context)),
            FieldSource::OnChainData(path) => (path, context.get("onChainData")),
        };

        // Submission-time evaluation of a confirmation-only expression:
        // no `onChainData` in the context, so the field is omitted.
        let Some(root) = root else { continue };

        match path.resolve(root) {
            Resolution::Found(value) => {
                object.insert(field.key.to_owned(), value.clone());
            }
            Resolution::Absent => {}
            Resolution::Mismatch { segment, actual } => {
                return Err(Error::BodyConstruction {
                    field: field.key.to_owned(),
                    path: path.source().to_owned(),
                    reason: format!("cannot apply `{segment}` to {actual}"),
                })
            }
        }
    }

    Ok(Value::Object(object))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
