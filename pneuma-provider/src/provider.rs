//! Provider trait for schema-constrained completions.
//!
//! The [`SchemaProvider`] trait uses RPITIT (return-position `impl Trait` in
//! traits) and is NOT object-safe. Callers hold providers generically.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Errors from LLM providers.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP or network request failed.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Provider rate-limited the request.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested delay, if the backend sent one.
        retry_after: Option<Duration>,
    },

    /// Authentication/authorization failed.
    #[error("auth failed: {0}")]
    AuthFailed(String),

    /// The backend rejected the request, including the schema itself.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Could not parse the provider's response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    /// Whether retrying this request might succeed.
    ///
    /// Providers never retry on their own; this only classifies the failure.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RequestFailed(_)
                | ProviderError::Timeout(_)
                | ProviderError::RateLimited { .. }
        )
    }
}

/// One schema-constrained completion call.
///
/// Built per call by the caller and moved into the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaRequest {
    /// Free-text context. Empty means "no additional context".
    pub prompt: String,
    /// The schema document the answer must conform to.
    pub schema: serde_json::Value,
    /// Logical name of the object being produced.
    pub object_name: String,
}

impl SchemaRequest {
    /// Create a request.
    pub fn new(
        prompt: impl Into<String>,
        schema: serde_json::Value,
        object_name: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            schema,
            object_name: object_name.into(),
        }
    }
}

/// An LLM backend that answers with JSON conforming to a schema.
///
/// Implementations make exactly one outbound call per invocation, keep no
/// state between calls, and do not re-validate the answer: conformance is the
/// backend's constrained-decoding guarantee. The returned string is the raw
/// JSON text of the answer.
pub trait SchemaProvider: Send + Sync {
    /// Ask the backend for an object conforming to `request.schema`.
    fn complete_with_schema(
        &self,
        request: SchemaRequest,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}
