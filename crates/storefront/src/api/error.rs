//! Store API error classification.

use reqwest::StatusCode;
use thiserror::Error;

/// Longest error body kept verbatim in [`ApiError::Status`].
const MAX_MESSAGE_LEN: usize = 200;

/// Errors that can occur when calling the store API.
///
/// The three variants are the classes forms translate into user-facing
/// messages: the server answered with a failure status, no answer arrived,
/// or something else went wrong.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API responded with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Status { status: StatusCode, message: String },

    /// No response was received (connection refused, reset, DNS failure).
    #[error("No response from store API: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request could not be built or the response could not be understood.
    #[error("Unexpected store API failure: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Classify an error raised while sending or reading a request.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() || err.is_redirect() {
            Self::Unknown(err.to_string())
        } else {
            Self::Transport(err)
        }
    }

    /// HTTP status for [`ApiError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API never answered.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Pull a readable message out of an error body.
///
/// The store API answers failures with `{"detail": "..."}`; other bodies are
/// kept as trimmed text.
pub(crate) fn extract_message(body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_owned));

    let message = detail.unwrap_or_else(|| body.trim().to_owned());
    if message.chars().count() > MAX_MESSAGE_LEN {
        message.chars().take(MAX_MESSAGE_LEN).collect()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_message(r#"{"detail": "Invalid credentials"}"#),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_extract_plain_text() {
        assert_eq!(extract_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_extract_truncates_long_bodies() {
        let body = "x".repeat(1000);
        assert_eq!(extract_message(&body).len(), MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_status_accessors() {
        let err = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "API error: 401 Unauthorized - Invalid credentials");

        let err = ApiError::Unknown("boom".to_string());
        assert_eq!(err.status(), None);
    }
}
