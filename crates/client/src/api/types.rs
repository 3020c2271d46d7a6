//! Wire types for the expense backend.
//!
//! Field casing is pinned per endpoint with explicit `rename` attributes
//! because the backend is not consistent about it: company resources are
//! camelCase, request and role rows are PascalCase, and session claims are
//! snake_case. Where two endpoints return the same resource under different
//! keys (the company detail endpoint), `alias` covers the second spelling.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use outlay_core::{
    ApprovalAction, CompanyId, Email, EmployeeId, Money, PermissionLevel, RequestId,
    RequestStatus, RoleId, RoleKind,
};

/// Identity attributes derived from a validated session.
///
/// Returned by both `/login` (as `user`, with the role under `role_id`) and
/// `/validate-token` (as `user`, with the role under `role`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Login identity.
    pub email: Email,
    /// Role held by this identity.
    #[serde(alias = "role_id")]
    pub role: RoleKind,
    /// Company the identity belongs to.
    pub company_id: CompanyId,
    /// Employee record behind the identity.
    pub employee_id: EmployeeId,
    /// Workflow authority rank.
    pub permission_level: PermissionLevel,
}

/// Successful `/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent calls.
    pub token: String,
    /// Claims for the authenticated identity.
    pub user: SessionClaims,
}

/// Successful `/validate-token` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateTokenResponse {
    /// Claims for the validated identity.
    pub user: SessionClaims,
}

/// A company as listed by `GET /companies` and `GET /company/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "companyID")]
    pub company_id: CompanyId,
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(rename = "address", alias = "companyAddress")]
    pub address: String,
    #[serde(rename = "contactEmail", alias = "companyEmail")]
    pub contact_email: Email,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /create-company`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(rename = "address")]
    pub address: String,
    #[serde(rename = "contactEmail")]
    pub contact_email: Email,
    /// Email of the person who becomes the company's admin.
    #[serde(rename = "adminEmail")]
    pub admin_email: Email,
}

/// A role row as listed by `GET /roles/:companyID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    #[serde(rename = "RoleID")]
    pub role_id: RoleId,
    #[serde(rename = "RoleName")]
    pub role_name: String,
    #[serde(rename = "PermissionLevel")]
    pub permission_level: PermissionLevel,
    #[serde(rename = "CompanyID")]
    pub company_id: CompanyId,
}

/// Payload for `POST /roles`. Goes out camelCase even though rows come back
/// PascalCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRole {
    #[serde(rename = "roleName")]
    pub role_name: String,
    #[serde(rename = "permissionLevel")]
    pub permission_level: PermissionLevel,
    #[serde(rename = "companyID")]
    pub company_id: CompanyId,
}

/// An employee roster row as listed by `POST /employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "EmployeeID")]
    pub employee_id: EmployeeId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: Email,
    #[serde(rename = "RoleName")]
    pub role_name: String,
}

/// Canonical expense-category labels offered by the request form.
pub mod expense_categories {
    pub const TRAVEL: &str = "Travel";
    pub const ACCOMMODATION: &str = "Accommodation";
    pub const MEALS: &str = "Meals";
    pub const MISCELLANEOUS: &str = "Miscellaneous";
}

/// One expense category with its claimed amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseLine {
    /// Category label (see [`expense_categories`]).
    pub label: String,
    /// Claimed amount.
    pub amount: Money,
}

/// A reimbursement request as returned by the request-listing endpoints.
///
/// `expense_types` and `amounts` are positionally aligned parallel arrays on
/// the wire; [`Self::lines`] zips them back together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReimbursementRequest {
    #[serde(rename = "RequestID")]
    pub request_id: RequestId,
    #[serde(rename = "CompanyEmployeeID")]
    pub company_employee_id: EmployeeId,
    #[serde(rename = "Purpose")]
    pub purpose: String,
    #[serde(rename = "ExpenseTypes")]
    pub expense_types: Vec<String>,
    #[serde(rename = "Amounts")]
    pub amounts: Vec<Money>,
    #[serde(rename = "TravelStartDate")]
    pub travel_start_date: NaiveDate,
    #[serde(rename = "TravelEndDate")]
    pub travel_end_date: NaiveDate,
    #[serde(rename = "Status")]
    pub status: RequestStatus,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Receipts", default)]
    pub receipts: Vec<String>,
}

impl ReimbursementRequest {
    /// Total claimed amount across all expense lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.amounts.iter().sum()
    }

    /// The expense lines, re-zipped from the parallel wire arrays.
    pub fn lines(&self) -> impl Iterator<Item = (&str, Money)> {
        self.expense_types
            .iter()
            .map(String::as_str)
            .zip(self.amounts.iter().copied())
    }

    /// Whether the parallel arrays are positionally aligned.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.expense_types.len() == self.amounts.len()
    }
}

/// Payload for `POST /reimbursement-request`.
///
/// Constructed only through [`Self::new`], which derives the parallel
/// `ExpenseTypes` / `Amounts` arrays from one list of lines - misaligned
/// submissions cannot be expressed.
#[derive(Debug, Clone, Serialize)]
pub struct NewRequest {
    #[serde(rename = "EmployeeID")]
    pub employee_id: EmployeeId,
    #[serde(rename = "CompanyID")]
    pub company_id: CompanyId,
    #[serde(rename = "ExpenseTypes")]
    expense_types: Vec<String>,
    #[serde(rename = "Amounts")]
    amounts: Vec<Money>,
    #[serde(rename = "TravelStartDate")]
    pub travel_start_date: NaiveDate,
    #[serde(rename = "TravelEndDate")]
    pub travel_end_date: NaiveDate,
    #[serde(rename = "Purpose")]
    pub purpose: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Receipts")]
    pub receipts: Vec<String>,
}

impl NewRequest {
    /// Build a submission from expense lines.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        employee_id: EmployeeId,
        company_id: CompanyId,
        lines: Vec<ExpenseLine>,
        travel_start_date: NaiveDate,
        travel_end_date: NaiveDate,
        purpose: String,
        description: String,
        receipts: Vec<String>,
    ) -> Self {
        let (expense_types, amounts) = lines
            .into_iter()
            .map(|line| (line.label, line.amount))
            .unzip();

        Self {
            employee_id,
            company_id,
            expense_types,
            amounts,
            travel_start_date,
            travel_end_date,
            purpose,
            description,
            receipts,
        }
    }

    /// Total claimed amount.
    #[must_use]
    pub fn total(&self) -> Money {
        self.amounts.iter().sum()
    }
}

/// Payload for `POST /approve-reject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalCommand {
    #[serde(rename = "RequestID")]
    pub request_id: RequestId,
    #[serde(rename = "Action")]
    pub action: ApprovalAction,
    /// The reviewer acting on the request.
    #[serde(rename = "EmployeeID")]
    pub employee_id: EmployeeId,
}

/// Backend acknowledgement of an approval decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalReceipt {
    /// Optional status message from the backend.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from `POST /upload-employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Backend-provided summary (surfaced to the operator verbatim).
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request_json() -> &'static str {
        r#"{
            "RequestID": 7,
            "CompanyEmployeeID": 12,
            "Purpose": "Client visit",
            "ExpenseTypes": ["Travel", "Meals"],
            "Amounts": [100.5, 49.5],
            "TravelStartDate": "2026-02-03",
            "TravelEndDate": "2026-02-05",
            "Status": "Pending",
            "Description": "Quarterly on-site",
            "Receipts": ["/uploads/taxi.pdf"]
        }"#
    }

    #[test]
    fn test_request_deserializes_from_wire_casing() {
        let request: ReimbursementRequest = serde_json::from_str(request_json()).unwrap();
        assert_eq!(request.request_id, RequestId::new(7));
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.is_aligned());
        assert_eq!(
            request.lines().collect::<Vec<_>>(),
            vec![
                ("Travel", Money::from_cents(10050)),
                ("Meals", Money::from_cents(4950)),
            ]
        );
    }

    #[test]
    fn test_request_total_sums_amounts() {
        let request: ReimbursementRequest = serde_json::from_str(request_json()).unwrap();
        assert_eq!(request.total(), Money::from_cents(15000));
    }

    #[test]
    fn test_request_tolerates_missing_optional_fields() {
        let json = r#"{
            "RequestID": 1,
            "CompanyEmployeeID": 2,
            "Purpose": "Conference",
            "ExpenseTypes": [],
            "Amounts": [],
            "TravelStartDate": "2026-01-01",
            "TravelEndDate": "2026-01-02",
            "Status": "Approved"
        }"#;
        let request: ReimbursementRequest = serde_json::from_str(json).unwrap();
        assert!(request.description.is_empty());
        assert!(request.receipts.is_empty());
        assert_eq!(request.total(), Money::ZERO);
    }

    #[test]
    fn test_claims_accept_both_role_spellings() {
        // /validate-token says "role", /login says "role_id"
        let validate = r#"{"email":"a@x.com","role":"manager","company_id":1,"employee_id":2,"permission_level":2}"#;
        let login = r#"{"email":"a@x.com","role_id":"manager","company_id":1,"employee_id":2,"permission_level":2}"#;

        let from_validate: SessionClaims = serde_json::from_str(validate).unwrap();
        let from_login: SessionClaims = serde_json::from_str(login).unwrap();
        assert_eq!(from_validate, from_login);
    }

    #[test]
    fn test_company_accepts_detail_endpoint_spellings() {
        let detail = r#"{
            "companyID": 3,
            "companyName": "Initech",
            "companyAddress": "1 Main St",
            "companyEmail": "info@initech.test",
            "createdAt": "2025-11-01T09:00:00Z"
        }"#;
        let company: Company = serde_json::from_str(detail).unwrap();
        assert_eq!(company.address, "1 Main St");
        assert_eq!(company.contact_email.as_str(), "info@initech.test");
    }

    #[test]
    fn test_new_request_arrays_stay_aligned() {
        let submission = NewRequest::new(
            EmployeeId::new(2),
            CompanyId::new(1),
            vec![
                ExpenseLine {
                    label: expense_categories::TRAVEL.to_owned(),
                    amount: Money::from_cents(10050),
                },
                ExpenseLine {
                    label: expense_categories::MEALS.to_owned(),
                    amount: Money::from_cents(4950),
                },
            ],
            NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            "Client visit".to_owned(),
            String::new(),
            vec![],
        );

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["ExpenseTypes"], serde_json::json!(["Travel", "Meals"]));
        assert_eq!(json["Amounts"], serde_json::json!([100.5, 49.5]));
        assert_eq!(submission.total(), Money::from_cents(15000));
    }

    #[test]
    fn test_approval_command_wire_shape() {
        let command = ApprovalCommand {
            request_id: RequestId::new(7),
            action: ApprovalAction::Approve,
            employee_id: EmployeeId::new(12),
        };
        let json = serde_json::to_value(command).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"RequestID": 7, "Action": "approve", "EmployeeID": 12})
        );
    }
}
