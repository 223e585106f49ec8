#![deny(missing_docs)]
//! Provider abstraction for schema-constrained LLM completions.
//!
//! A [`SchemaProvider`] turns `(prompt, schema, object name)` into the raw JSON
//! text of an answer. Backends live in their own crates
//! (`pneuma-provider-openai`); an in-memory [`test_utils::MockProvider`] is
//! available behind the `test-utils` feature.

pub mod provider;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use provider::{ProviderError, SchemaProvider, SchemaRequest};
