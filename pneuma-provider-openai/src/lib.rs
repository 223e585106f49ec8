//! OpenAI structured-output provider for pneuma.
//!
//! This crate implements [`SchemaProvider`] for the
//! [OpenAI Chat Completions API](https://platform.openai.com/docs/api-reference/chat)
//! using `response_format: {type: "json_schema", strict: true}`, so the model's
//! answer is constrained to the supplied schema.
//!
//! # Usage
//!
//! ```no_run
//! use pneuma_provider_openai::OpenAi;
//!
//! let provider = OpenAi::new("your-api-key").model("gpt-4o");
//! ```

pub mod client;
pub(crate) mod error;
pub mod mapping;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAi};

// Re-export the provider contract for convenience
pub use pneuma_provider::{ProviderError, SchemaProvider, SchemaRequest};
