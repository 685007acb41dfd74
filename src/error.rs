// SPDX-License-Identifier: Apache-2.0

/// Represents any possible error from a fallible function in the Andamio core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transaction name that is not part of the registry catalog.
    #[error("unknown transaction `{0}`")]
    UnknownTransaction(String),

    /// A protocol version tag that is not part of the catalog.
    #[error("unknown protocol version `{0}`")]
    UnknownVersion(String),

    /// A dotted context path that could not be compiled.
    #[error("invalid context path `{path}`: {reason}")]
    InvalidPath {
        /// The offending path expression.
        path: String,
        /// Why it failed to parse.
        reason: String,
    },

    /// A `path_params` entry did not resolve against the runtime context.
    #[error("failed to resolve `{{{placeholder}}}` from `{path}`: {reason}")]
    PathResolution {
        /// The endpoint placeholder being substituted.
        placeholder: String,
        /// The dotted context path it maps to.
        path: String,
        /// Why resolution failed.
        reason: String,
    },

    /// A body field hit a type mismatch while resolving its context path.
    #[error("failed to construct body field `{field}` from `{path}`: {reason}")]
    BodyConstruction {
        /// The request-body key being built.
        field: String,
        /// The dotted context path it maps to.
        path: String,
        /// Why construction failed.
        reason: String,
    },

    /// The injected transport failed before producing a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The side-effect endpoint answered with a non-2xx status.
    #[error("api error: status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Status text or response body excerpt.
        message: String,
    },

    /// The runtime context could not be projected to JSON for dotted-path
    /// resolution.
    #[error("failed to project context: {0}")]
    ContextProjection(String),

    /// Input failed a transaction's input schema.
    #[error("input validation failed: {0}")]
    SchemaValidation(String),

    /// Malformed or unparseable transaction CBOR.
    #[error("failed to decode transaction cbor: {0}")]
    CborDecode(String),

    /// One or more critical side effects failed and
    /// `throw_on_critical_failure` was requested.
    #[error("{} critical side effect(s) failed: {}", failures.len(), failures.join("; "))]
    CriticalSideEffects {
        /// One entry per failed critical side effect.
        failures: Vec<String>,
    },
}

impl Error {
    pub(crate) fn unknown_transaction(name: impl Into<String>) -> Self {
        Self::UnknownTransaction(name.into())
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into(), reason: reason.into() }
    }

    pub(crate) fn cbor_decode(reason: impl std::fmt::Display) -> Self {
        Self::CborDecode(reason.to_string())
    }
}

/// A `Result` with the error variant defaulted to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
