// SPDX-License-Identifier: Apache-2.0

//! Pure primitives for unit-testing transaction definitions.
//!
//! Nothing here performs HTTP or mutates its inputs: path resolution and
//! body construction are dry-run against mock contexts, and
//! [`MockTransport`] replays scripted responses so engine tests can assert
//! on the request stream without a network stack.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::{
    json,
    Value,
};

use crate::context::{
    ConfirmationContext,
    SubmissionContext,
};
use crate::execute;
use crate::path::{
    ContextPath,
    Resolution,
};
use crate::side_effect::{
    Endpoint,
    SideEffect,
};
use crate::transport::{
    BoxTransportFuture,
    Transport,
    TransportError,
    TransportRequest,
    TransportResponse,
};
use crate::Error;

/// A fully populated submission context, with optional deep overrides.
///
/// Overrides are merged key-by-key into the default JSON projection, so a
/// test can replace `buildInputs` without restating the rest.
///
/// # Panics
/// Panics if the overrides break the context shape; that is a defect in
/// the test itself.
#[must_use]
pub fn mock_submission_context(overrides: Option<Value>) -> SubmissionContext {
    let mut value = json!({
        "txHash": "abc123def4567890abc123def4567890abc123def4567890abc123def4567890",
        "signedCbor": "84a400818258201111111111111111111111111111111111111111111111111111",
        "unsignedCbor": "82a4008182582011111111111111111111111111111111111111111111111111",
        "userId": "user_0001",
        "walletAddress": "addr_test1qpw0djgjv0t3xs6kluqzyvnmzmttzvtmj4cpf9q2f8m8mq",
        "buildInputs": {
            "policy": "policy123",
            "moduleCode": "MODULE_1",
        },
        "timestamp": 1_726_000_000_000_i64,
    });

    if let Some(overrides) = overrides {
        merge_values(&mut value, overrides);
    }

    serde_json::from_value(value).expect("mock submission context overrides broke the shape")
}

/// A fully populated confirmation context, with optional deep overrides.
///
/// The default decoded view mints one module token under `policy123`, so
/// `onChainData.mints[0].assetName` resolves out of the box.
///
/// # Panics
/// Panics if the overrides break the context shape; that is a defect in
/// the test itself.
#[must_use]
pub fn mock_confirmation_context(overrides: Option<Value>) -> ConfirmationContext {
    let submission = serde_json::to_value(mock_submission_context(None))
        .expect("default submission context serializes");

    let mut value = submission;
    merge_values(
        &mut value,
        json!({
            "blockHeight": 10_572_841_u64,
            "onChainData": {
                "mints": [
                    { "policyId": "policy123", "assetName": "MODULE_1_hash", "quantity": 1 },
                ],
                "outputs": [
                    {
                        "address": "61abababababababababababababababababababababababababababab",
                        "lovelace": 2_000_000_u64,
                        "assets": [],
                    },
                ],
                "inputs": [
                    { "txId": "11".repeat(32), "index": 0 },
                ],
            },
        }),
    );

    if let Some(overrides) = overrides {
        merge_values(&mut value, overrides);
    }

    serde_json::from_value(value).expect("mock confirmation context overrides broke the shape")
}

fn merge_values(target: &mut Value, overrides: Value) {
    match (target, overrides) {
        (Value::Object(target), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match target.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, overrides) => *target = overrides,
    }
}

/// Dry-runs endpoint resolution for a side effect against a context.
///
/// # Errors
/// - [`Error::ContextProjection`] if the context cannot be serialized.
/// - [`Error::PathResolution`] as the engine would record it.
pub fn resolve_path_params<C: serde::Serialize>(
    side_effect: &SideEffect,
    context: &C,
) -> crate::Result<String> {
    let context =
        serde_json::to_value(context).map_err(|e| Error::ContextProjection(e.to_string()))?;

    execute::resolve_endpoint(side_effect, &context)
}

/// Dry-runs request-body construction for a side effect against a context.
///
/// # Errors
/// - [`Error::ContextProjection`] if the context cannot be serialized.
/// - [`Error::BodyConstruction`] as the engine would record it.
pub fn construct_request_body<C: serde::Serialize>(
    side_effect: &SideEffect,
    context: &C,
) -> crate::Result<Value> {
    let context =
        serde_json::to_value(context).map_err(|e| Error::ContextProjection(e.to_string()))?;

    execute::construct_request_body(&side_effect.body, &context)
}

/// Resolves a dotted path against an arbitrary JSON value.
///
/// Returns `None` both for absent values and for shape mismatches; use the
/// engine helpers when the distinction matters.
#[must_use]
pub fn value_at_path(value: &Value, path: &str) -> Option<Value> {
    let path = ContextPath::parse(path).ok()?;

    match path.resolve(value) {
        Resolution::Found(found) => Some(found.clone()),
        Resolution::Absent | Resolution::Mismatch { .. } => None,
    }
}

/// Validates a side effect against a context, returning every problem a
/// runtime execution would hit.
///
/// Sentinel (`"Not implemented"`) endpoints are reported so audit tooling
/// can flag placeholder side effects, even though the engine skips them
/// without error.
#[must_use]
pub fn validate_side_effect<C: serde::Serialize>(
    side_effect: &SideEffect,
    context: &C,
) -> Vec<String> {
    let mut problems = Vec::new();

    if side_effect.endpoint == Endpoint::NotImplemented {
        problems.push(format!(
            "side effect `{}` is marked \"Not implemented\" and will be skipped",
            side_effect.name
        ));
        return problems;
    }

    let placeholders = side_effect.endpoint.placeholders();

    for placeholder in &placeholders {
        if !side_effect.path_params.iter().any(|param| param.name == *placeholder) {
            problems.push(format!("placeholder `{{{placeholder}}}` has no path_params entry"));
        }
    }

    for param in &side_effect.path_params {
        if !placeholders.contains(&param.name) {
            problems.push(format!(
                "path_params entry `{}` matches no endpoint placeholder",
                param.name
            ));
        }
    }

    if let Err(error) = resolve_path_params(side_effect, context) {
        problems.push(error.to_string());
    }

    if let Err(error) = construct_request_body(side_effect, context) {
        problems.push(error.to_string());
    }

    problems
}

/// The composite outcome of a side-effect dry run.
#[derive(Debug, Clone, PartialEq)]
pub struct SideEffectProbe {
    /// Whether the side effect would execute without recorded errors.
    pub valid: bool,
    /// Every problem found, in discovery order.
    pub errors: Vec<String>,
    /// The resolved endpoint, when resolution succeeded.
    pub resolved_endpoint: Option<String>,
    /// The constructed request body, when construction succeeded.
    pub request_body: Option<Value>,
}

/// Dry-runs a side effect end to end: validation, endpoint resolution, and
/// body construction.
#[must_use]
pub fn test_side_effect<C: serde::Serialize>(
    side_effect: &SideEffect,
    context: &C,
) -> SideEffectProbe {
    let errors = validate_side_effect(side_effect, context);

    SideEffectProbe {
        valid: errors.is_empty(),
        errors,
        resolved_endpoint: resolve_path_params(side_effect, context).ok(),
        request_body: construct_request_body(side_effect, context).ok(),
    }
}

/// An in-memory [`Transport`] for unit tests.
///
/// Records every request and answers from a scripted response queue,
/// falling back to `200 OK` with an empty JSON object.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<TransportRequest>>,
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    fallback: Option<Result<TransportResponse, TransportError>>,
}

impl MockTransport {
    /// A transport that answers every request with `200 OK`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every unscripted request with the given status instead of
    /// `200 OK`.
    #[must_use]
    pub fn respond_with_status(mut self, status: u16, status_text: &str) -> Self {
        self.fallback = Some(Ok(TransportResponse {
            status,
            status_text: status_text.to_owned(),
            body: String::new(),
        }));
        self
    }

    /// Fails every unscripted request with a transport-level error.
    #[must_use]
    pub fn fail_with(mut self, reason: &str) -> Self {
        self.fallback = Some(Err(TransportError::new(reason)));
        self
    }

    /// Queues one scripted response; scripted responses are consumed in
    /// order before the fallback applies.
    pub fn push_response(&self, response: Result<TransportResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// The requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: TransportRequest) -> BoxTransportFuture<'_> {
        self.requests.lock().unwrap().push(request);

        let response = self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            self.fallback.clone().unwrap_or_else(|| {
                Ok(TransportResponse {
                    status: 200,
                    status_text: "OK".to_owned(),
                    body: "{}".to_owned(),
                })
            })
        });

        Box::pin(async move { response })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        mock_confirmation_context,
        mock_submission_context,
        test_side_effect,
        validate_side_effect,
        value_at_path,
    };
    use crate::side_effect::{
        HttpMethod,
        SideEffect,
        NOT_IMPLEMENTED,
    };

    #[test]
    fn overrides_merge_deeply() {
        let context = mock_submission_context(Some(json!({
            "txHash": "feed",
            "buildInputs": { "moduleCode": "MODULE_9" },
        })));

        assert_eq!(context.tx_hash, "feed");
        // Sibling keys survive a nested override.
        assert_eq!(context.build_inputs["policy"], "policy123");
        assert_eq!(context.build_inputs["moduleCode"], "MODULE_9");
    }

    #[test]
    fn confirmation_mock_resolves_on_chain_paths() {
        let context = mock_confirmation_context(None);
        let value = serde_json::to_value(&context).unwrap();

        assert_eq!(
            value_at_path(&value, "onChainData.mints[0].assetName"),
            Some(json!("MODULE_1_hash"))
        );
    }

    #[test]
    fn probe_reports_everything_at_once() {
        let side_effect = SideEffect::new(
            "update module status",
            HttpMethod::Post,
            "/course-modules/{courseId}/{moduleCode}/status",
        )
        .path_param("courseId", "buildInputs.policy")
        .path_param("moduleCode", "buildInputs.moduleCode")
        .body_literal("status", json!("PENDING_TX"))
        .body_context("pendingTxHash", "txHash");

        let probe = test_side_effect(&side_effect, &mock_submission_context(None));

        assert!(probe.valid);
        assert_eq!(
            probe.resolved_endpoint.as_deref(),
            Some("/course-modules/policy123/MODULE_1/status")
        );
        assert_eq!(
            probe.request_body,
            Some(json!({
                "status": "PENDING_TX",
                "pendingTxHash": mock_submission_context(None).tx_hash,
            }))
        );
    }

    #[test]
    fn unbound_placeholder_is_reported() {
        let side_effect = SideEffect::new("broken", HttpMethod::Post, "/m/{id}");
        let problems = validate_side_effect(&side_effect, &mock_submission_context(None));

        assert!(problems.iter().any(|p| p.contains("{id}")));
    }

    #[test]
    fn sentinel_is_flagged_for_audits() {
        let side_effect = SideEffect::new("future route", HttpMethod::Post, NOT_IMPLEMENTED);
        let problems = validate_side_effect(&side_effect, &mock_submission_context(None));

        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("Not implemented"));
    }
}
