#![deny(missing_docs)]
//! Fill Rust structs with LLM-generated values.
//!
//! Annotate a struct's fields with free-text hints, derive [`Describe`], and
//! [`Pneuma::fill`] asks the model for an object that follows the derived
//! schema, then writes the answer back into your instance.
//!
//! ```no_run
//! use pneuma::{Describe, Pneuma};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Describe, Serialize, Deserialize, Default, Debug)]
//! #[serde(rename_all = "PascalCase")]
//! struct Dog {
//!     #[pneuma("a short name a child would pick")]
//!     name: String,
//!     #[pneuma("0-20")]
//!     age: u8,
//!     #[pneuma("one of: apple, bone, carrot")]
//!     favourite_food: String,
//! }
//!
//! # async fn run() -> Result<(), pneuma::FillError> {
//! let pneuma = Pneuma::openai("sk-...");
//! let mut dog = Dog::default();
//! pneuma.fill_with_context(&mut dog, "an old and sleepy dog").await?;
//! println!("{dog:?}");
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `openai` (default): [`Pneuma::openai`] and the [`OpenAi`] provider.
//! - `derive` (default): `#[derive(Describe)]`.
//! - `test-utils`: re-exports [`test_utils::MockProvider`] for tests.

mod decode;
pub mod error;
pub mod filler;

pub use error::FillError;
pub use filler::Pneuma;

pub use pneuma_schema as schema;
pub use pneuma_schema::{Describe, NIL_NAME, SchemaKind, SchemaNode, name_of, schema_for};
#[cfg(feature = "derive")]
pub use pneuma_schema_macros::Describe;

pub use pneuma_provider::{ProviderError, SchemaProvider, SchemaRequest};
#[cfg(feature = "test-utils")]
pub use pneuma_provider::test_utils;

#[cfg(feature = "openai")]
pub use pneuma_provider_openai::OpenAi;
#[cfg(feature = "openai")]
pub use pneuma_provider_openai as openai;
