//! Error type for [`Pneuma::fill`](crate::Pneuma::fill).

use pneuma_provider::ProviderError;

/// Why a fill call failed. The target is never modified on error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FillError {
    /// The type's schema cannot be used as a completion target.
    #[error("schema derivation failed: {0}")]
    Derivation(String),
    /// The provider call failed. The inner error is the provider's own.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    /// The answer was not valid JSON or did not decode into the target.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
