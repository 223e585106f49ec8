//! Internal error helpers for mapping HTTP/reqwest errors to [`ProviderError`].

use std::time::Duration;

use pneuma_provider::ProviderError;

/// Map an HTTP status code (from the OpenAI API) to a [`ProviderError`].
///
/// Reference: <https://platform.openai.com/docs/guides/error-codes>
pub(crate) fn map_http_status(
    status: reqwest::StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> ProviderError {
    let message = api_error_message(body);
    match status.as_u16() {
        401 | 403 => ProviderError::AuthFailed(message),
        // Schema compilation failures come back as 400.
        400 | 404 | 422 => ProviderError::InvalidRequest(message),
        429 => ProviderError::RateLimited {
            retry_after: retry_after.or_else(|| parse_retry_after(body)),
        },
        500..=599 => ProviderError::RequestFailed(format!("HTTP {status}: {message}")),
        _ => ProviderError::InvalidRequest(format!("HTTP {status}: {message}")),
    }
}

/// Pull `error.message` out of an OpenAI error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Attempt to parse a retry delay from an OpenAI error body.
///
/// OpenAI sometimes includes "Please retry after X seconds" in the error message.
fn parse_retry_after(body: &str) -> Option<Duration> {
    let lower = body.to_lowercase();
    let idx = lower.find("retry after ")?;
    let after = &lower[idx + 12..];
    let num_str: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
    num_str.parse::<u64>().ok().map(Duration::from_secs)
}

/// Read a `Retry-After` header given in seconds.
pub(crate) fn retry_after_header(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Map a [`reqwest::Error`] to a [`ProviderError`].
///
/// `timeout` is the per-request limit set on [`OpenAi`](crate::OpenAi), if any.
/// A timeout enforced by a caller-supplied client reports [`Duration::ZERO`],
/// since that limit is not visible here.
pub(crate) fn map_reqwest_error(err: reqwest::Error, timeout: Option<Duration>) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout.unwrap_or(Duration::ZERO))
    } else if err.is_decode() {
        ProviderError::InvalidResponse(err.to_string())
    } else {
        ProviderError::RequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_401_to_auth_failed() {
        let err = map_http_status(reqwest::StatusCode::UNAUTHORIZED, None, "Invalid API key");
        assert!(matches!(err, ProviderError::AuthFailed(_)));
    }

    #[test]
    fn map_403_to_auth_failed() {
        let err = map_http_status(reqwest::StatusCode::FORBIDDEN, None, "Forbidden");
        assert!(matches!(err, ProviderError::AuthFailed(_)));
    }

    #[test]
    fn map_400_to_invalid_request() {
        let err = map_http_status(reqwest::StatusCode::BAD_REQUEST, None, "Bad request");
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[test]
    fn map_404_to_invalid_request() {
        let err = map_http_status(reqwest::StatusCode::NOT_FOUND, None, "Model not found");
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[test]
    fn map_429_to_rate_limited() {
        let err = map_http_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            None,
            "Rate limit exceeded",
        );
        assert!(matches!(err, ProviderError::RateLimited { retry_after: None }));
        assert!(err.is_retryable());
    }

    #[test]
    fn map_429_with_retry_after_in_body() {
        let err = map_http_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            None,
            "Please retry after 60 seconds",
        );
        match err {
            ProviderError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Some(Duration::from_secs(60)));
            }
            _ => panic!("expected RateLimited"),
        }
    }

    #[test]
    fn header_retry_after_wins_over_body() {
        let err = map_http_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            Some(Duration::from_secs(5)),
            "Please retry after 60 seconds",
        );
        assert!(matches!(
            err,
            ProviderError::RateLimited { retry_after: Some(d) } if d == Duration::from_secs(5)
        ));
    }

    #[test]
    fn map_500_to_request_failed() {
        let err = map_http_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, None, "Server error");
        assert!(matches!(err, ProviderError::RequestFailed(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn map_503_to_request_failed() {
        let err = map_http_status(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            None,
            "Service unavailable",
        );
        assert!(matches!(err, ProviderError::RequestFailed(_)));
    }

    #[test]
    fn map_unknown_status_to_invalid_request() {
        let err = map_http_status(reqwest::StatusCode::IM_A_TEAPOT, None, "I'm a teapot");
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[test]
    fn error_message_is_extracted_from_json_body() {
        let body = r#"{"error":{"message":"Invalid schema for response_format 'Dog'","type":"invalid_request_error"}}"#;
        let err = map_http_status(reqwest::StatusCode::BAD_REQUEST, None, body);
        match err {
            ProviderError::InvalidRequest(msg) => {
                assert_eq!(msg, "Invalid schema for response_format 'Dog'");
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn parse_retry_after_returns_none_when_not_found() {
        assert_eq!(parse_retry_after("Generic error message"), None);
    }

    #[test]
    fn retry_after_header_in_seconds() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::RETRY_AFTER, "12".parse().unwrap());
        assert_eq!(retry_after_header(&headers), Some(Duration::from_secs(12)));
    }

    #[test]
    fn retry_after_header_ignores_http_dates() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::RETRY_AFTER,
            "Wed, 21 Oct 2015 07:28:00 GMT".parse().unwrap(),
        );
        assert_eq!(retry_after_header(&headers), None);
    }
}
