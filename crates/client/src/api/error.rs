//! Error types for the backend API client.

use thiserror::Error;

/// Errors that can occur when talking to the expense backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the bearer token (HTTP 401).
    ///
    /// On the login call this means bad credentials; anywhere else it means
    /// the persisted token has expired and the session must be invalidated.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend returned a non-success status other than 401.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The request could not complete (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a body this client could not decode.
    #[error("response decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether this error is the 401 taxonomy entry.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Extract a human-readable message from an error response body.
///
/// The backend reports failures as `{"error": "..."}`; fall back to the raw
/// body (trimmed) when it sends something else.
pub(crate) fn message_from_body(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map_or_else(|_| body.trim().to_owned(), |parsed| parsed.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: 503,
            message: "maintenance".to_owned(),
        };
        assert_eq!(err.to_string(), "backend returned 503: maintenance");
        assert_eq!(ApiError::Unauthorized.to_string(), "unauthorized");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(
            !ApiError::Decode("bad json".to_owned()).is_unauthorized()
        );
    }

    #[test]
    fn test_message_from_error_body() {
        assert_eq!(
            message_from_body(r#"{"error": "Role already exists"}"#),
            "Role already exists"
        );
    }

    #[test]
    fn test_message_from_plain_body() {
        assert_eq!(message_from_body("  Bad Gateway \n"), "Bad Gateway");
    }
}
