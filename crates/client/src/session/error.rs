//! Error types for authentication and session management.

use thiserror::Error;

/// Errors that can occur during login or session validation.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the credentials (HTTP 401 on login).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend failed with a non-401 status.
    #[error("server error (status {status})")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The call could not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a body this client could not decode.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No session is present; the caller should route to login.
    #[error("not authenticated")]
    NotAuthenticated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
        assert_eq!(
            AuthError::ServerError { status: 502 }.to_string(),
            "server error (status 502)"
        );
        assert_eq!(AuthError::NotAuthenticated.to_string(), "not authenticated");
    }
}
