//! Integration tests for Outlay.
//!
//! The client under test talks to a real HTTP server: a stub expense
//! backend built on axum with in-memory state, one instance per test,
//! bound to an ephemeral localhost port. Tests exercise the full path -
//! session bootstrap, claims, listings, and the approval workflow -
//! over the same wire shapes the production backend speaks.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p outlay-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;

use outlay_core::{
    CompanyId, Email, EmployeeId, Money, PermissionLevel, RequestId, RequestStatus, RoleId,
    RoleKind,
};

use outlay_client::api::types::{
    ApprovalCommand, Company, Employee, NewCompany, NewRole, ReimbursementRequest, RoleRecord,
    SessionClaims,
};
use outlay_client::{BackendClient, ClientConfig, SessionStore, TokenCache};

type SharedState = Arc<Mutex<BackendState>>;

/// A login account known to the stub backend.
pub struct StubUser {
    pub email: String,
    pub password: String,
    pub claims: SessionClaims,
}

/// In-memory state behind the stub backend.
pub struct BackendState {
    pub users: Vec<StubUser>,
    pub companies: Vec<Company>,
    pub roles: Vec<RoleRecord>,
    pub employees: Vec<Employee>,
    pub requests: Vec<ReimbursementRequest>,
    /// Issued bearer tokens and the claims behind them.
    pub tokens: HashMap<String, SessionClaims>,
    /// How many approve/reject commands reached the backend.
    pub decisions_received: usize,
    /// When set, every approve/reject commit fails with a 500.
    pub fail_decisions: bool,
    next_token: u32,
    next_id: i32,
}

impl BackendState {
    /// Empty backend with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            companies: Vec::new(),
            roles: Vec::new(),
            employees: Vec::new(),
            requests: Vec::new(),
            tokens: HashMap::new(),
            decisions_received: 0,
            fail_decisions: false,
            next_token: 0,
            next_id: 100,
        }
    }

    /// The standard fixture used by most tests: one company, four accounts
    /// (product admin, company admin, a level-2 reviewer, a level-1
    /// employee), and three requests in assorted states.
    #[must_use]
    pub fn seeded() -> Self {
        let mut state = Self::new();

        state.companies.push(Company {
            company_id: CompanyId::new(1),
            company_name: "Initech".to_owned(),
            address: "1 Main St".to_owned(),
            contact_email: email("info@initech.test"),
            created_at: Utc
                .with_ymd_and_hms(2025, 11, 1, 9, 0, 0)
                .single()
                .expect("valid fixture timestamp"),
        });

        state.roles.push(RoleRecord {
            role_id: RoleId::new(1),
            role_name: "manager".to_owned(),
            permission_level: PermissionLevel::new(2),
            company_id: CompanyId::new(1),
        });
        state.roles.push(RoleRecord {
            role_id: RoleId::new(2),
            role_name: "engineer".to_owned(),
            permission_level: PermissionLevel::new(1),
            company_id: CompanyId::new(1),
        });

        state.users.push(StubUser {
            email: "root@outlay.test".to_owned(),
            password: "pw-root".to_owned(),
            claims: claims("root@outlay.test", RoleKind::ProductAdmin, 1, 1, 1),
        });
        state.users.push(StubUser {
            email: "admin@initech.test".to_owned(),
            password: "pw-admin".to_owned(),
            claims: claims("admin@initech.test", RoleKind::CompanyAdmin, 1, 2, 1),
        });
        state.users.push(StubUser {
            email: "reviewer@initech.test".to_owned(),
            password: "pw-reviewer".to_owned(),
            claims: claims(
                "reviewer@initech.test",
                RoleKind::Member("manager".to_owned()),
                1,
                12,
                2,
            ),
        });
        state.users.push(StubUser {
            email: "casey@initech.test".to_owned(),
            password: "pw-casey".to_owned(),
            claims: claims(
                "casey@initech.test",
                RoleKind::Member("engineer".to_owned()),
                1,
                40,
                1,
            ),
        });

        state.requests.push(request(
            7,
            40,
            "Client visit",
            &[10050, 4950],
            RequestStatus::Pending,
        ));
        state.requests.push(request(
            8,
            41,
            "Team offsite",
            &[30000],
            RequestStatus::Pending,
        ));
        state.requests.push(request(
            9,
            40,
            "Conference",
            &[89900],
            RequestStatus::Approved,
        ));

        state
    }

    fn issue_token(&mut self, claims: SessionClaims) -> String {
        self.next_token += 1;
        let token = format!("tok-{}", self.next_token);
        self.tokens.insert(token.clone(), claims);
        token
    }

    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

fn email(address: &str) -> Email {
    Email::parse(address).expect("fixture email is valid")
}

fn claims(
    address: &str,
    role: RoleKind,
    company: i32,
    employee: i32,
    level: i32,
) -> SessionClaims {
    SessionClaims {
        email: email(address),
        role,
        company_id: CompanyId::new(company),
        employee_id: EmployeeId::new(employee),
        permission_level: PermissionLevel::new(level),
    }
}

fn request(
    id: i32,
    owner: i32,
    purpose: &str,
    amount_cents: &[i64],
    status: RequestStatus,
) -> ReimbursementRequest {
    ReimbursementRequest {
        request_id: RequestId::new(id),
        company_employee_id: EmployeeId::new(owner),
        purpose: purpose.to_owned(),
        expense_types: amount_cents
            .iter()
            .enumerate()
            .map(|(i, _)| format!("Category {i}"))
            .collect(),
        amounts: amount_cents.iter().map(|&c| Money::from_cents(c)).collect(),
        travel_start_date: NaiveDate::from_ymd_opt(2026, 2, 3).expect("valid fixture date"),
        travel_end_date: NaiveDate::from_ymd_opt(2026, 2, 5).expect("valid fixture date"),
        status,
        description: String::new(),
        receipts: Vec::new(),
    }
}

/// A running stub backend plus everything a test needs to talk to it.
pub struct TestContext {
    pub base_url: String,
    state: SharedState,
}

impl TestContext {
    /// Boot a stub backend on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind (no free localhost port).
    pub async fn start(state: BackendState) -> Self {
        let shared = Arc::new(Mutex::new(state));
        let app = router(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend listener");
        let addr = listener.local_addr().expect("stub backend local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("stub backend serve");
        });

        Self {
            base_url: format!("http://{addr}"),
            state: shared,
        }
    }

    /// Boot a stub backend with the standard fixture.
    pub async fn seeded() -> Self {
        Self::start(BackendState::seeded()).await
    }

    /// Client configuration pointing at this stub, with a unique token path.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
        ClientConfig {
            api_base_url: self.base_url.parse().expect("stub base URL is valid"),
            token_path: std::env::temp_dir().join(format!(
                "outlay-it-token-{}-{unique}",
                std::process::id()
            )),
            request_timeout: Duration::from_secs(5),
        }
    }

    /// A session store wired to this stub through the given configuration.
    #[must_use]
    pub fn store(&self, config: &ClientConfig) -> SessionStore {
        let client = BackendClient::new(config);
        let cache = TokenCache::new(config.token_path.clone());
        SessionStore::new(client, cache)
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("stub state poisoned")
    }

    /// Current status of a request in the system of record.
    #[must_use]
    pub fn request_status(&self, id: i32) -> RequestStatus {
        self.lock()
            .requests
            .iter()
            .find(|r| r.request_id == RequestId::new(id))
            .expect("request exists in stub state")
            .status
    }

    /// How many approve/reject commands reached the backend.
    #[must_use]
    pub fn decisions_received(&self) -> usize {
        self.lock().decisions_received
    }

    /// Make every subsequent approve/reject commit fail with a 500.
    pub fn fail_decisions(&self, fail: bool) {
        self.lock().fail_decisions = fail;
    }
}

// =============================================================================
// Stub routes
// =============================================================================

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/validate-token", get(validate_token))
        .route("/companies", get(companies))
        .route("/create-company", post(create_company))
        .route("/company/{id}", get(company_detail))
        .route("/roles/{company_id}", get(roles_for_company).delete(delete_role))
        .route("/roles", post(create_role))
        .route("/employees", post(employees))
        .route("/upload-employees", post(upload_employees))
        .route("/get-reimbursement-requests", post(my_requests))
        .route("/my-team-requests", post(team_requests))
        .route("/reimbursement-request", post(submit_request))
        .route("/approve-reject", post(approve_reject))
        .with_state(state)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "invalid or expired token"})),
    )
        .into_response()
}

fn authorize(state: &BackendState, headers: &HeaderMap) -> Result<SessionClaims, Response> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| state.tokens.get(token).cloned())
        .ok_or_else(unauthorized)
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(State(state): State<SharedState>, Json(body): Json<LoginBody>) -> Response {
    let mut state = state.lock().expect("stub state poisoned");

    let Some(claims) = state
        .users
        .iter()
        .find(|u| u.email == body.email && u.password == body.password)
        .map(|u| u.claims.clone())
    else {
        return unauthorized();
    };

    let token = state.issue_token(claims.clone());
    Json(json!({"token": token, "user": claims})).into_response()
}

async fn validate_token(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.lock().expect("stub state poisoned");
    match authorize(&state, &headers) {
        Ok(claims) => Json(json!({"user": claims})).into_response(),
        Err(response) => response,
    }
}

async fn companies(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.lock().expect("stub state poisoned");
    match authorize(&state, &headers) {
        Ok(_) => Json(&state.companies).into_response(),
        Err(response) => response,
    }
}

async fn create_company(
    State(state): State<SharedState>,
    Json(body): Json<NewCompany>,
) -> Response {
    let mut state = state.lock().expect("stub state poisoned");
    let id = state.allocate_id();
    let company = Company {
        company_id: CompanyId::new(id),
        company_name: body.company_name,
        address: body.address,
        contact_email: body.contact_email,
        created_at: Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp"),
    };
    state.companies.push(company.clone());
    Json(company).into_response()
}

async fn company_detail(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    let state = state.lock().expect("stub state poisoned");
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    state
        .companies
        .iter()
        .find(|c| c.company_id == CompanyId::new(id))
        .map_or_else(
            || {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "company not found"})),
                )
                    .into_response()
            },
            |company| Json(company).into_response(),
        )
}

async fn roles_for_company(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(company_id): Path<i32>,
) -> Response {
    let state = state.lock().expect("stub state poisoned");
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let rows: Vec<&RoleRecord> = state
        .roles
        .iter()
        .filter(|r| r.company_id == CompanyId::new(company_id))
        .collect();
    Json(rows).into_response()
}

async fn create_role(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<NewRole>,
) -> Response {
    let mut state = state.lock().expect("stub state poisoned");
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let id = state.allocate_id();
    let role = RoleRecord {
        role_id: RoleId::new(id),
        role_name: body.role_name,
        permission_level: body.permission_level,
        company_id: body.company_id,
    };
    state.roles.push(role.clone());
    Json(role).into_response()
}

async fn delete_role(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(role_id): Path<i32>,
) -> Response {
    let mut state = state.lock().expect("stub state poisoned");
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let before = state.roles.len();
    state.roles.retain(|r| r.role_id != RoleId::new(role_id));
    if state.roles.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "role not found"})),
        )
            .into_response();
    }
    Json(json!({"message": "role deleted"})).into_response()
}

async fn employees(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.lock().expect("stub state poisoned");
    match authorize(&state, &headers) {
        Ok(_) => Json(&state.employees).into_response(),
        Err(response) => response,
    }
}

async fn upload_employees(State(state): State<SharedState>, mut multipart: Multipart) -> Response {
    let mut file_contents = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            file_contents = field.text().await.ok();
        }
    }

    let Some(contents) = file_contents else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "missing roster file"})),
        )
            .into_response();
    };

    // Roster format: header line, then `name,email,role` rows.
    let mut state = state.lock().expect("stub state poisoned");
    let mut imported = 0;
    for line in contents.lines().skip(1) {
        let mut fields = line.split(',');
        let (Some(name), Some(address), Some(role)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let id = state.allocate_id();
        state.employees.push(Employee {
            employee_id: EmployeeId::new(id),
            name: name.trim().to_owned(),
            email: email(address.trim()),
            role_name: role.trim().to_owned(),
        });
        imported += 1;
    }

    Json(json!({"message": format!("Imported {imported} employees")})).into_response()
}

#[derive(Deserialize)]
struct MyRequestsBody {
    #[serde(rename = "employeeID")]
    employee_id: EmployeeId,
}

async fn my_requests(
    State(state): State<SharedState>,
    Json(body): Json<MyRequestsBody>,
) -> Response {
    let state = state.lock().expect("stub state poisoned");
    let rows: Vec<&ReimbursementRequest> = state
        .requests
        .iter()
        .filter(|r| r.company_employee_id == body.employee_id)
        .collect();
    Json(rows).into_response()
}

#[derive(Deserialize)]
struct TeamRequestsBody {
    #[serde(rename = "EmployeeID")]
    employee_id: EmployeeId,
}

async fn team_requests(
    State(state): State<SharedState>,
    Json(body): Json<TeamRequestsBody>,
) -> Response {
    let state = state.lock().expect("stub state poisoned");
    let rows: Vec<&ReimbursementRequest> = state
        .requests
        .iter()
        .filter(|r| r.company_employee_id != body.employee_id)
        .collect();
    Json(rows).into_response()
}

#[derive(Deserialize)]
struct SubmitBody {
    #[serde(rename = "EmployeeID")]
    employee_id: EmployeeId,
    #[serde(rename = "ExpenseTypes")]
    expense_types: Vec<String>,
    #[serde(rename = "Amounts")]
    amounts: Vec<Money>,
    #[serde(rename = "TravelStartDate")]
    travel_start_date: NaiveDate,
    #[serde(rename = "TravelEndDate")]
    travel_end_date: NaiveDate,
    #[serde(rename = "Purpose")]
    purpose: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Receipts", default)]
    receipts: Vec<String>,
}

async fn submit_request(State(state): State<SharedState>, Json(body): Json<SubmitBody>) -> Response {
    if body.expense_types.len() != body.amounts.len() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "expense types and amounts are misaligned"})),
        )
            .into_response();
    }

    let mut state = state.lock().expect("stub state poisoned");
    let id = state.allocate_id();
    let created = ReimbursementRequest {
        request_id: RequestId::new(id),
        company_employee_id: body.employee_id,
        purpose: body.purpose,
        expense_types: body.expense_types,
        amounts: body.amounts,
        travel_start_date: body.travel_start_date,
        travel_end_date: body.travel_end_date,
        status: RequestStatus::Pending,
        description: body.description,
        receipts: body.receipts,
    };
    state.requests.push(created.clone());
    Json(created).into_response()
}

async fn approve_reject(
    State(state): State<SharedState>,
    Json(command): Json<ApprovalCommand>,
) -> Response {
    let mut state = state.lock().expect("stub state poisoned");
    state.decisions_received += 1;

    if state.fail_decisions {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "decision store unavailable"})),
        )
            .into_response();
    }

    let Some(request) = state
        .requests
        .iter_mut()
        .find(|r| r.request_id == command.request_id)
    else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "request not found"})),
        )
            .into_response();
    };

    if request.status != RequestStatus::Pending {
        return (
            StatusCode::CONFLICT,
            Json(json!({"error": "request already decided"})),
        )
            .into_response();
    }

    request.status = command.action.resulting_status();
    Json(json!({"message": "decision recorded"})).into_response()
}
