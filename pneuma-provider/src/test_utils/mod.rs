//! Test doubles for [`SchemaProvider`](crate::SchemaProvider).

mod mock_provider;

pub use mock_provider::MockProvider;
