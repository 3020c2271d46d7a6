//! HTTP client for the expense backend.

use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use outlay_core::{CompanyId, EmployeeId, RoleId};

use crate::config::ClientConfig;
use crate::workflow::ApprovalBackend;

use super::error::{ApiError, message_from_body};
use super::types::{
    ApprovalCommand, ApprovalReceipt, Company, Employee, LoginResponse, NewCompany, NewRequest,
    NewRole, ReimbursementRequest, RoleRecord, SessionClaims, UploadOutcome,
    ValidateTokenResponse,
};

/// Expense backend REST client.
///
/// One instance per process; it is cheap to clone and holds no session
/// state - callers pass the bearer token per call, read from the session
/// store at call time.
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// HTTP client.
    client: reqwest::Client,
    /// Base URL with any trailing slash removed.
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed (TLS
    /// backend initialization failure).
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_owned(),
        }
    }

    /// Build a full endpoint URL from a path starting with `/`.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Validate a persisted bearer token and return its claims.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` if the token is expired or unknown.
    #[instrument(skip(self, token))]
    pub async fn validate_token(&self, token: &SecretString) -> Result<SessionClaims, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/validate-token"))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let body: ValidateTokenResponse = read_json(response).await?;
        Ok(body.user)
    }

    /// Exchange credentials for a bearer token and claims.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` on wrong credentials; the session store maps
    /// that to `InvalidCredentials`.
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        #[derive(serde::Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let response = self
            .client
            .post(self.endpoint("/login"))
            .json(&LoginRequest {
                email,
                password: password.expose_secret(),
            })
            .send()
            .await?;

        read_json(response).await
    }

    // =========================================================================
    // Companies
    // =========================================================================

    /// List all companies (product-admin view).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on auth, transport, or backend failure.
    #[instrument(skip(self, token))]
    pub async fn companies(&self, token: &SecretString) -> Result<Vec<Company>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/companies"))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        read_json(response).await
    }

    /// Create a company together with its admin account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    #[instrument(skip(self, company), fields(name = %company.company_name))]
    pub async fn create_company(&self, company: &NewCompany) -> Result<Company, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/create-company"))
            .json(company)
            .send()
            .await?;

        read_json(response).await
    }

    /// Fetch one company's details.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on auth, transport, or backend failure.
    #[instrument(skip(self, token))]
    pub async fn company(
        &self,
        token: &SecretString,
        company_id: CompanyId,
    ) -> Result<Company, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/company/{company_id}")))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        read_json(response).await
    }

    // =========================================================================
    // Roles
    // =========================================================================

    /// List a company's roles.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on auth, transport, or backend failure.
    #[instrument(skip(self, token))]
    pub async fn roles(
        &self,
        token: &SecretString,
        company_id: CompanyId,
    ) -> Result<Vec<RoleRecord>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/roles/{company_id}")))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        read_json(response).await
    }

    /// Create a role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on auth, transport, or backend failure.
    #[instrument(skip(self, token, role), fields(name = %role.role_name))]
    pub async fn create_role(
        &self,
        token: &SecretString,
        role: &NewRole,
    ) -> Result<RoleRecord, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/roles"))
            .bearer_auth(token.expose_secret())
            .json(role)
            .send()
            .await?;

        read_json(response).await
    }

    /// Delete a role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on auth, transport, or backend failure.
    #[instrument(skip(self, token))]
    pub async fn delete_role(
        &self,
        token: &SecretString,
        role_id: RoleId,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/roles/{role_id}")))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        read_ok(response).await
    }

    // =========================================================================
    // Employees
    // =========================================================================

    /// List a company's employee roster.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on auth, transport, or backend failure.
    #[instrument(skip(self, token))]
    pub async fn employees(
        &self,
        token: &SecretString,
        company_id: CompanyId,
    ) -> Result<Vec<Employee>, ApiError> {
        #[derive(serde::Serialize)]
        struct EmployeesQuery {
            #[serde(rename = "companyID")]
            company_id: CompanyId,
        }

        let response = self
            .client
            .post(self.endpoint("/employees"))
            .bearer_auth(token.expose_secret())
            .json(&EmployeesQuery { company_id })
            .send()
            .await?;

        read_json(response).await
    }

    /// Upload an employee roster file (CSV) for a company.
    ///
    /// One multipart POST; the backend's summary message is returned
    /// verbatim. There is no transfer-progress signal.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    #[instrument(skip(self, contents), fields(bytes = contents.len()))]
    pub async fn upload_employees(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        company_id: CompanyId,
    ) -> Result<UploadOutcome, ApiError> {
        let file_part = reqwest::multipart::Part::bytes(contents).file_name(file_name.to_owned());
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("companyID", company_id.to_string());

        let response = self
            .client
            .post(self.endpoint("/upload-employees"))
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }

    // =========================================================================
    // Reimbursement requests
    // =========================================================================

    /// List the caller's own reimbursement requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    #[instrument(skip(self))]
    pub async fn my_requests(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
    ) -> Result<Vec<ReimbursementRequest>, ApiError> {
        #[derive(serde::Serialize)]
        struct MyRequestsQuery {
            #[serde(rename = "companyID")]
            company_id: CompanyId,
            #[serde(rename = "employeeID")]
            employee_id: EmployeeId,
        }

        let response = self
            .client
            .post(self.endpoint("/get-reimbursement-requests"))
            .json(&MyRequestsQuery {
                company_id,
                employee_id,
            })
            .send()
            .await?;

        read_json(response).await
    }

    /// List pending-review requests from the caller's team.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    #[instrument(skip(self))]
    pub async fn team_requests(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<ReimbursementRequest>, ApiError> {
        #[derive(serde::Serialize)]
        struct TeamRequestsQuery {
            #[serde(rename = "EmployeeID")]
            employee_id: EmployeeId,
        }

        let response = self
            .client
            .post(self.endpoint("/my-team-requests"))
            .json(&TeamRequestsQuery { employee_id })
            .send()
            .await?;

        read_json(response).await
    }

    /// Submit a new reimbursement request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    #[instrument(skip(self, request), fields(purpose = %request.purpose))]
    pub async fn submit_request(
        &self,
        request: &NewRequest,
    ) -> Result<ReimbursementRequest, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/reimbursement-request"))
            .json(request)
            .send()
            .await?;

        read_json(response).await
    }
}

#[async_trait::async_trait]
impl ApprovalBackend for BackendClient {
    #[instrument(skip(self), fields(request = %command.request_id, action = %command.action))]
    async fn submit_decision(
        &self,
        command: &ApprovalCommand,
    ) -> Result<ApprovalReceipt, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/approve-reject"))
            .json(command)
            .send()
            .await?;

        let receipt: ApprovalReceipt = read_json(response).await?;
        debug!(message = ?receipt.message, "Decision acknowledged");
        Ok(receipt)
    }
}

/// Map a response to the error taxonomy, then decode its JSON body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map a response to the error taxonomy, discarding any body.
async fn read_ok(response: Response) -> Result<(), ApiError> {
    check_status(response).await.map(|_| ())
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: message_from_body(&body),
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(base: &str) -> ClientConfig {
        ClientConfig {
            api_base_url: base.parse().expect("valid test URL"),
            token_path: std::env::temp_dir().join("outlay-test-token"),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = BackendClient::new(&test_config("http://localhost:4000/"));
        assert_eq!(
            client.endpoint("/validate-token"),
            "http://localhost:4000/validate-token"
        );
    }

    #[test]
    fn test_endpoint_preserves_base_path() {
        let client = BackendClient::new(&test_config("http://localhost:4000/api/v1"));
        assert_eq!(client.endpoint("/login"), "http://localhost:4000/api/v1/login");
    }
}
