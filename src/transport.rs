// SPDX-License-Identifier: Apache-2.0

//! The injected HTTP transport boundary.
//!
//! The core performs no DNS, TLS, or connection management; the caller
//! supplies a [`Transport`] and the engine awaits it. This is the crate's
//! only suspension point.

use serde_json::Value;

use crate::HttpMethod;

/// A boxed future returned by a [`Transport`].
pub type BoxTransportFuture<'a> =
    futures_core::future::BoxFuture<'a, Result<TransportResponse, TransportError>>;

/// One HTTP request as handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// The fully resolved request URL.
    pub url: String,
    /// The request method.
    pub method: HttpMethod,
    /// Request headers, in order.
    pub headers: Vec<(String, String)>,
    /// The JSON request body, absent for `GET`.
    pub body: Option<String>,
}

/// The transport-level view of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Status text as reported by the server.
    pub status_text: String,
    /// The raw response body.
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the response body as JSON.
    ///
    /// # Errors
    /// Returns the underlying parse error if the body is not valid JSON.
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// A failure before any HTTP response was produced (network, DNS, TLS, or
/// a cancellation signal honored by the transport).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    /// A transport failure with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// A `fetch`-shaped HTTP transport.
///
/// Implementations decide how requests reach the network. The engine issues
/// requests strictly sequentially, so implementations need no internal
/// ordering.
pub trait Transport: Send + Sync {
    /// Sends one request and resolves to the response, or to a
    /// [`TransportError`] if no response was produced.
    fn send(&self, request: TransportRequest) -> BoxTransportFuture<'_>;
}
