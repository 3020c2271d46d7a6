//! The session store: single owner of the authenticated identity.

use secrecy::SecretString;
use tracing::{info, instrument, warn};

use outlay_core::{CompanyId, Email, EmployeeId, PermissionLevel, RoleKind};

use crate::api::types::SessionClaims;
use crate::api::{ApiError, BackendClient};

use super::error::AuthError;
use super::token::TokenCache;

/// An authenticated session.
///
/// Either fully absent (the store holds `None`) or fully populated - there
/// is no partially-initialized session.
#[derive(Clone)]
pub struct Session {
    token: SecretString,
    /// Login identity.
    pub email: Email,
    /// Role held by this identity.
    pub role: RoleKind,
    /// Company the identity belongs to.
    pub company_id: CompanyId,
    /// Employee record behind the identity.
    pub employee_id: EmployeeId,
    /// Workflow authority rank.
    pub permission_level: PermissionLevel,
}

impl Session {
    fn from_claims(token: SecretString, claims: SessionClaims) -> Self {
        Self {
            token,
            email: claims.email,
            role: claims.role,
            company_id: claims.company_id,
            employee_id: claims.employee_id,
            permission_level: claims.permission_level,
        }
    }

    /// The bearer token backing this session.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("company_id", &self.company_id)
            .field("employee_id", &self.employee_id)
            .field("permission_level", &self.permission_level)
            .finish()
    }
}

/// Owns the current session and the persisted token.
///
/// All consumers read derived claims through [`Self::current`]; none of them
/// decode the token themselves or mutate session state directly.
#[derive(Debug)]
pub struct SessionStore {
    client: BackendClient,
    cache: TokenCache,
    current: Option<Session>,
}

impl SessionStore {
    /// Create a store with no active session.
    #[must_use]
    pub const fn new(client: BackendClient, cache: TokenCache) -> Self {
        Self {
            client,
            cache,
            current: None,
        }
    }

    /// The backend client, for data calls made with the current session.
    #[must_use]
    pub const fn client(&self) -> &BackendClient {
        &self.client
    }

    /// The current session, if authenticated.
    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Bootstrap from the persisted token, if any.
    ///
    /// Returns `true` when a valid token produced an authenticated session.
    /// Absence of a token, a rejected token, or any validation failure all
    /// leave the store unauthenticated with the stale token cleared;
    /// failures are logged rather than propagated.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) -> bool {
        let Some(token) = self.cache.load() else {
            return false;
        };

        match self.client.validate_token(&token).await {
            Ok(claims) => {
                info!(email = %claims.email, "Session restored from persisted token");
                self.current = Some(Session::from_claims(token, claims));
                true
            }
            Err(e) => {
                warn!(error = %e, "Token validation failed, clearing session");
                self.logout();
                false
            }
        }
    }

    /// Log in with email and password.
    ///
    /// On success the token is persisted and the session populated. Routing
    /// afterwards is the authorization guard's job.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` when the backend returns 401,
    /// `AuthError::ServerError` for any other non-success status, and
    /// `AuthError::Network` when the call cannot complete. The session stays
    /// absent and nothing is persisted on any failure.
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn login(&mut self, email: &str, password: &SecretString) -> Result<(), AuthError> {
        let response = self
            .client
            .login(email, password)
            .await
            .map_err(login_error)?;

        let token = SecretString::from(response.token);
        if let Err(e) = self.cache.save(&token) {
            // The session is still good for this process; it just won't
            // survive a restart.
            warn!(error = %e, "Failed to persist bearer token");
        }

        info!(email = %response.user.email, role = %response.user.role, "Logged in");
        self.current = Some(Session::from_claims(token, response.user));
        Ok(())
    }

    /// Clear the session and the persisted token. Never fails.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        self.current = None;
        if let Err(e) = self.cache.clear() {
            warn!(error = %e, "Failed to remove persisted token");
        }
    }

    /// Force logout after the backend rejected the token mid-session
    /// (HTTP 401 on any authenticated call). The caller routes to login.
    #[instrument(skip(self))]
    pub fn invalidate(&mut self) {
        warn!("Backend invalidated the session token");
        self.logout();
    }
}

/// Map API failures from the login call onto the login error taxonomy.
fn login_error(e: ApiError) -> AuthError {
    match e {
        ApiError::Unauthorized => AuthError::InvalidCredentials,
        ApiError::Status { status, .. } => AuthError::ServerError { status },
        ApiError::Network(e) => AuthError::Network(e.to_string()),
        ApiError::Decode(message) => AuthError::Malformed(message),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn claims() -> SessionClaims {
        SessionClaims {
            email: Email::parse("reviewer@initech.test").unwrap(),
            role: RoleKind::Member("manager".to_owned()),
            company_id: CompanyId::new(1),
            employee_id: EmployeeId::new(12),
            permission_level: PermissionLevel::new(2),
        }
    }

    #[test]
    fn test_session_is_fully_populated_from_claims() {
        let session = Session::from_claims(SecretString::from("tok-1"), claims());
        assert_eq!(session.email.as_str(), "reviewer@initech.test");
        assert_eq!(session.company_id, CompanyId::new(1));
        assert_eq!(session.employee_id, EmployeeId::new(12));
        assert_eq!(session.permission_level, PermissionLevel::new(2));
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::from_claims(SecretString::from("tok-secret-1"), claims());
        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tok-secret-1"));
    }

    #[test]
    fn test_login_error_taxonomy() {
        assert!(matches!(
            login_error(ApiError::Unauthorized),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            login_error(ApiError::Status {
                status: 500,
                message: String::new()
            }),
            AuthError::ServerError { status: 500 }
        ));
        assert!(matches!(
            login_error(ApiError::Decode("truncated".to_owned())),
            AuthError::Malformed(_)
        ));
    }
}
