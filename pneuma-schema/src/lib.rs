#![deny(missing_docs)]
//! Schema documents for structured LLM output.
//!
//! A [`SchemaNode`] is a JSON Schema tree in the strict dialect LLM backends
//! accept for constrained decoding: every object is closed
//! (`additionalProperties: false`) and lists all of its properties as
//! required. The [`Describe`] trait maps a Rust type to its schema; records
//! usually get it from `#[derive(Describe)]`.
//!
//! ```
//! use pneuma_schema::{Describe, SchemaNode, name_of, schema_for};
//!
//! struct Dog {
//!     name: String,
//!     age: u8,
//! }
//!
//! impl Describe for Dog {
//!     const NAME: &'static str = "Dog";
//!
//!     fn schema() -> SchemaNode {
//!         SchemaNode::object()
//!             .field("name", String::schema())
//!             .field("age", u8::schema().describe("0-20"))
//!     }
//! }
//!
//! let schema = schema_for::<Dog>();
//! assert_eq!(schema.required(), vec!["name", "age"]);
//! assert_eq!(name_of::<Dog>(None), "<nil>");
//! ```

pub mod describe;
pub mod node;

pub use describe::{Describe, NIL_NAME, name_of, schema_for};
pub use node::{SchemaKind, SchemaNode};
