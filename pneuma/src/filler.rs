//! The [`Pneuma`] orchestrator: derive a schema, ask the provider, decode.

use pneuma_provider::{SchemaProvider, SchemaRequest};
use pneuma_schema::{Describe, name_of, schema_for};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::decode::decode_into;
use crate::error::FillError;

/// Fills caller-owned structures with model-generated values.
///
/// Built once around a provider and reused for any number of fills. It keeps
/// no per-call state, so a shared `&Pneuma<P>` can serve concurrent fills when
/// `P` is `Sync`.
#[derive(Debug, Clone)]
pub struct Pneuma<P> {
    provider: P,
}

#[cfg(feature = "openai")]
impl Pneuma<pneuma_provider_openai::OpenAi> {
    /// Bind the default OpenAI provider with the given API key.
    ///
    /// Uses [`DEFAULT_MODEL`](pneuma_provider_openai::DEFAULT_MODEL); build
    /// an [`OpenAi`](pneuma_provider_openai::OpenAi) yourself and use
    /// [`Pneuma::with_provider`] to pick another model.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::with_provider(pneuma_provider_openai::OpenAi::new(api_key))
    }
}

impl<P: SchemaProvider> Pneuma<P> {
    /// Bind a custom provider.
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// The bound provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fill `target` with values that follow its schema and field hints.
    ///
    /// Same as [`Pneuma::fill_with_context`] with an empty context.
    pub async fn fill<T>(&self, target: &mut T) -> Result<(), FillError>
    where
        T: Describe + Serialize + DeserializeOwned,
    {
        self.fill_with_context(target, "").await
    }

    /// Fill `target`, giving the model `context` to base the values on.
    ///
    /// Makes exactly one provider call. Fields present in the answer overwrite
    /// the target's fields; fields missing from it keep their values.
    ///
    /// # Errors
    ///
    /// - [`FillError::Derivation`] if `T` does not describe a record.
    /// - [`FillError::Provider`] with the provider's error, unchanged.
    /// - [`FillError::Decode`] if the answer does not decode into `T`.
    ///
    /// `target` is left untouched on every error.
    pub async fn fill_with_context<T>(&self, target: &mut T, context: &str) -> Result<(), FillError>
    where
        T: Describe + Serialize + DeserializeOwned,
    {
        let schema = schema_for::<T>();
        if !schema.is_record() {
            return Err(FillError::Derivation(format!(
                "`{}` describes a `{}` schema without properties; only records can be filled",
                T::NAME,
                schema.kind()
            )));
        }
        let object_name = name_of(Some(&*target));

        tracing::debug!(
            object = object_name,
            fields = schema.required().len(),
            context_len = context.len(),
            "requesting schema completion"
        );

        let request = SchemaRequest::new(context, schema.to_value(), object_name);
        let raw = self.provider.complete_with_schema(request).await?;

        decode_into(target, &raw, &schema)?;
        tracing::debug!(object = object_name, "structure filled");
        Ok(())
    }
}
