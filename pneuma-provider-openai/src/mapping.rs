//! Request/response mapping between [`SchemaRequest`] and the OpenAI Chat
//! Completions API with a strict `json_schema` response format.
//!
//! Reference: <https://platform.openai.com/docs/guides/structured-outputs>

use pneuma_provider::{ProviderError, SchemaRequest};

/// Instruction sent when the caller gives no other context.
pub const DEFAULT_INSTRUCTION: &str = "fill with random data matching this schema";

/// Placed between the instruction and the caller's context.
pub const CONTEXT_SEPARATOR: &str = "\n\nContext:\n";

/// Build the single user message sent to the model.
#[must_use]
pub fn compose_prompt(instruction: &str, context: &str) -> String {
    if context.is_empty() {
        instruction.to_string()
    } else {
        format!("{instruction}{CONTEXT_SEPARATOR}{context}")
    }
}

/// Convert a [`SchemaRequest`] into the OpenAI Chat Completions JSON body.
#[must_use]
pub fn to_api_request(req: &SchemaRequest, model: &str, instruction: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": compose_prompt(instruction, &req.prompt),
        }],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": req.object_name,
                "strict": true,
                "schema": req.schema,
            },
        },
    })
}

/// Extract the raw JSON answer from a Chat Completions response body.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidResponse`] if there is no first choice, the
/// model refused, or the message has no text content.
pub fn from_api_response(body: &serde_json::Value) -> Result<String, ProviderError> {
    let message = body["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .map(|choice| &choice["message"])
        .ok_or_else(|| {
            ProviderError::InvalidResponse("missing 'choices' array in response".into())
        })?;

    if let Some(refusal) = message["refusal"].as_str()
        && !refusal.is_empty()
    {
        return Err(ProviderError::InvalidResponse(format!(
            "model refused: {refusal}"
        )));
    }

    message["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ProviderError::InvalidResponse("missing message content".into()))
}
