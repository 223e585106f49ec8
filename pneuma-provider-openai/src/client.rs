//! OpenAI API client struct and builder.

use std::future::Future;
use std::time::Duration;

use pneuma_provider::{ProviderError, SchemaProvider, SchemaRequest};

use crate::error::{map_http_status, map_reqwest_error, retry_after_header};
use crate::mapping::{DEFAULT_INSTRUCTION, from_api_response, to_api_request};

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client for OpenAI structured outputs over the Chat Completions API.
///
/// Implements [`SchemaProvider`]: every call sends one user message and a
/// strict `json_schema` response format, and returns the first choice's
/// content.
///
/// # Example
///
/// ```no_run
/// use pneuma_provider_openai::OpenAi;
///
/// let client = OpenAi::new("sk-...")
///     .model("gpt-4o-mini")
///     .organization("org-...");
/// ```
#[derive(Clone)]
pub struct OpenAi {
    /// OpenAI API key.
    pub(crate) api_key: String,
    /// Model identifier sent with every request.
    pub(crate) model: String,
    /// API base URL (override for testing, proxies, or compatible servers).
    pub(crate) base_url: String,
    /// Optional organization ID for multi-org accounts.
    pub(crate) organization: Option<String>,
    /// Instruction placed before the caller's context.
    pub(crate) instruction: String,
    /// Optional per-request timeout.
    pub(crate) timeout: Option<Duration>,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl OpenAi {
    /// Create a new client with the given API key and sensible defaults.
    ///
    /// Default model: `gpt-4o`.
    /// Default base URL: `https://api.openai.com`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            organization: None,
            instruction: DEFAULT_INSTRUCTION.into(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from the environment.
    ///
    /// Reads `OPENAI_API_KEY` (required), `OPENAI_BASE_URL` and `OPENAI_MODEL`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::AuthFailed`] when `OPENAI_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::AuthFailed("OPENAI_API_KEY is not set".into()))?;

        let mut client = Self::new(api_key);
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            client = client.base_url(url);
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            client = client.model(model);
        }
        Ok(client)
    }

    /// Override the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL.
    ///
    /// Useful for testing with a local mock server, an API proxy, or an
    /// OpenAI-compatible server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the OpenAI organization ID.
    ///
    /// Sent as the `OpenAI-Organization` header on every request.
    #[must_use]
    pub fn organization(mut self, org: impl Into<String>) -> Self {
        self.organization = Some(org.into());
        self
    }

    /// Replace the instruction that precedes the caller's context.
    #[must_use]
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Fail requests that take longer than `timeout`.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, connection pools).
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The configured model identifier.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Build the chat completions endpoint URL.
    pub(crate) fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

impl std::fmt::Debug for OpenAi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAi")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SchemaProvider for OpenAi {
    /// Send one strict structured-output request.
    ///
    /// Maps the [`SchemaRequest`] to OpenAI's JSON format, sends it, and
    /// returns the first choice's message content.
    fn complete_with_schema(
        &self,
        request: SchemaRequest,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send {
        let url = self.completions_url();
        let body = to_api_request(&request, &self.model, &self.instruction);
        let api_key = self.api_key.clone();
        let organization = self.organization.clone();
        let timeout = self.timeout;
        let http_client = self.client.clone();

        async move {
            tracing::debug!(
                url = %url,
                model = %body["model"],
                object = %request.object_name,
                "sending schema completion request to OpenAI"
            );

            let mut builder = http_client.post(&url).bearer_auth(&api_key).json(&body);
            if let Some(org) = &organization {
                builder = builder.header("OpenAI-Organization", org);
            }
            if let Some(limit) = timeout {
                builder = builder.timeout(limit);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;

            let status = response.status();
            let retry_after = retry_after_header(response.headers());
            let response_text = response
                .text()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;

            if !status.is_success() {
                tracing::warn!(status = %status, "OpenAI rejected the schema completion request");
                return Err(map_http_status(status, retry_after, &response_text));
            }

            let json: serde_json::Value = serde_json::from_str(&response_text).map_err(|e| {
                ProviderError::InvalidResponse(format!("invalid JSON response: {e}"))
            })?;

            from_api_response(&json)
        }
    }
}
