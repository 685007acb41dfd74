// SPDX-License-Identifier: Apache-2.0

//! Declarative side effects and the field-source expression language.

use std::fmt::{
    self,
    Display,
    Formatter,
};

use serde_json::Value;

use crate::path::ContextPath;

/// The sentinel endpoint literal recognized as "skip this side effect".
pub const NOT_IMPLEMENTED: &str = "Not implemented";

/// The HTTP method of a side-effect request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`. The request carries no body.
    Get,
    /// `POST`.
    Post,
    /// `PATCH`.
    Patch,
    /// `PUT`.
    Put,
    /// `DELETE`.
    Delete,
}

impl HttpMethod {
    /// The method name as sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A side-effect endpoint: either a path template with `{name}`
/// placeholders, or the sentinel marking an unimplemented database route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A path template relative to the database API base URL.
    Template(String),
    /// The `"Not implemented"` sentinel; the engine skips the side effect.
    NotImplemented,
}

impl Endpoint {
    /// Parses an endpoint string, recognizing exactly the literal
    /// [`NOT_IMPLEMENTED`] as the sentinel.
    #[must_use]
    pub fn parse(endpoint: &str) -> Self {
        if endpoint == NOT_IMPLEMENTED {
            Self::NotImplemented
        } else {
            Self::Template(endpoint.to_owned())
        }
    }

    /// The `{name}` placeholders of the template, in order of appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let Self::Template(template) = self else {
            return Vec::new();
        };

        let mut names = Vec::new();
        let mut rest = template.as_str();

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else { break };

            names.push(&after[..close]);
            rest = &after[close + 1..];
        }

        names
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(template) => f.write_str(template),
            Self::NotImplemented => f.write_str(NOT_IMPLEMENTED),
        }
    }
}

/// Where a request-body field takes its value from.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSource {
    /// A value used verbatim.
    Literal(Value),
    /// A dotted path into the runtime context.
    Context(ContextPath),
    /// A dotted path into `context.onChainData`; resolves absent at
    /// submission time.
    OnChainData(ContextPath),
}

/// One request-body entry of a side effect.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyField {
    /// The key in the JSON request body.
    pub key: &'static str,
    /// Where the value comes from.
    pub source: FieldSource,
}

/// One endpoint placeholder binding of a side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    /// The `{name}` placeholder in the endpoint template.
    pub name: &'static str,
    /// The dotted context path supplying the substitution.
    pub path: ContextPath,
}

/// A retry policy for confirmation-time side effects.
///
/// Plain data for the monitoring service; the in-process engine never
/// retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds.
    pub backoff_ms: u64,
}

/// An HTTP request the platform issues on behalf of a transaction, either
/// right after submission or after confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct SideEffect {
    /// Human-readable name used in logs and reports.
    pub name: &'static str,
    /// The request method.
    pub method: HttpMethod,
    /// The endpoint template or sentinel.
    pub endpoint: Endpoint,
    /// Placeholder bindings for the endpoint template.
    pub path_params: Vec<PathParam>,
    /// The request-body fields, in declaration order.
    pub body: Vec<BodyField>,
    /// Whether a failure of this side effect fails the whole pass.
    pub critical: bool,
    /// Retry policy for the monitoring service, if any.
    pub retry: Option<RetryPolicy>,
}

impl SideEffect {
    /// A new side effect for the given endpoint.
    ///
    /// The endpoint string is parsed with [`Endpoint::parse`]; definition
    /// paths added through the builder methods are compiled immediately.
    #[must_use]
    pub fn new(name: &'static str, method: HttpMethod, endpoint: &str) -> Self {
        Self {
            name,
            method,
            endpoint: Endpoint::parse(endpoint),
            path_params: Vec::new(),
            body: Vec::new(),
            critical: false,
            retry: None,
        }
    }

    /// Binds an endpoint placeholder to a dotted context path.
    ///
    /// # Panics
    /// Panics if `path` is not a valid dotted expression; definition paths
    /// are validated by the registry test suite.
    #[must_use]
    pub fn path_param(mut self, name: &'static str, path: &str) -> Self {
        self.path_params.push(PathParam { name, path: compile(path) });
        self
    }

    /// Adds a body field with a verbatim value.
    #[must_use]
    pub fn body_literal(mut self, key: &'static str, value: Value) -> Self {
        self.body.push(BodyField { key, source: FieldSource::Literal(value) });
        self
    }

    /// Adds a body field resolved from the runtime context.
    ///
    /// # Panics
    /// Panics if `path` is not a valid dotted expression; definition paths
    /// are validated by the registry test suite.
    #[must_use]
    pub fn body_context(mut self, key: &'static str, path: &str) -> Self {
        self.body.push(BodyField { key, source: FieldSource::Context(compile(path)) });
        self
    }

    /// Adds a body field resolved from the decoded on-chain data.
    ///
    /// # Panics
    /// Panics if `path` is not a valid dotted expression; definition paths
    /// are validated by the registry test suite.
    #[must_use]
    pub fn body_on_chain(mut self, key: &'static str, path: &str) -> Self {
        self.body.push(BodyField { key, source: FieldSource::OnChainData(compile(path)) });
        self
    }

    /// Marks a failure of this side effect as failing the whole pass.
    #[must_use]
    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    /// Attaches a retry policy for the monitoring service.
    #[must_use]
    pub fn retry(mut self, max_attempts: u32, backoff_ms: u64) -> Self {
        self.retry = Some(RetryPolicy { max_attempts, backoff_ms });
        self
    }
}

fn compile(path: &str) -> ContextPath {
    ContextPath::parse(path)
        .unwrap_or_else(|error| panic!("invalid path in side-effect definition: {error}"))
}

/// Whether the engine would issue a request for this side effect.
#[must_use]
pub fn should_execute_side_effect(side_effect: &SideEffect) -> bool {
    side_effect.endpoint != Endpoint::NotImplemented
}

/// Filters a side-effect list down to the ones the engine would issue.
#[must_use]
pub fn executable_side_effects(side_effects: &[SideEffect]) -> Vec<&SideEffect> {
    side_effects.iter().filter(|se| should_execute_side_effect(se)).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        executable_side_effects,
        should_execute_side_effect,
        Endpoint,
        HttpMethod,
        SideEffect,
        NOT_IMPLEMENTED,
    };

    #[test]
    fn endpoint_sentinel_is_exact() {
        assert_eq!(Endpoint::parse(NOT_IMPLEMENTED), Endpoint::NotImplemented);
        assert_eq!(
            Endpoint::parse("not implemented"),
            Endpoint::Template("not implemented".to_owned())
        );
    }

    #[test]
    fn placeholders_in_order_of_appearance() {
        let endpoint = Endpoint::parse("/course-modules/{courseId}/{moduleCode}/status");
        assert_eq!(endpoint.placeholders(), ["courseId", "moduleCode"]);

        assert!(Endpoint::parse(NOT_IMPLEMENTED).placeholders().is_empty());
        assert!(Endpoint::parse("/alias/index").placeholders().is_empty());
    }

    #[test]
    fn builder_preserves_declaration_order() {
        let side_effect = SideEffect::new("update module status", HttpMethod::Post, "/m/{id}")
            .path_param("id", "buildInputs.policy")
            .body_literal("status", json!("PENDING_TX"))
            .body_context("pendingTxHash", "txHash")
            .critical();

        assert_eq!(side_effect.path_params[0].name, "id");
        assert_eq!(side_effect.body[0].key, "status");
        assert_eq!(side_effect.body[1].key, "pendingTxHash");
        assert!(side_effect.critical);
        assert!(side_effect.retry.is_none());
    }

    #[test]
    fn sentinel_effects_are_not_executable() {
        let run = SideEffect::new("update status", HttpMethod::Post, "/status");
        let skip = SideEffect::new("future route", HttpMethod::Post, NOT_IMPLEMENTED);

        assert!(should_execute_side_effect(&run));
        assert!(!should_execute_side_effect(&skip));

        let effects = vec![run, skip];
        let executable = executable_side_effects(&effects);

        assert_eq!(executable.len(), 1);
        assert_eq!(executable[0].name, "update status");
    }
}
