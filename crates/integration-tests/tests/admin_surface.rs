//! Company, role, and roster administration against the stub backend.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use outlay_core::{CompanyId, Email, Money, PermissionLevel, RequestStatus};

use outlay_client::SessionStore;
use outlay_client::api::types::{ExpenseLine, NewCompany, NewRequest, NewRole, expense_categories};
use outlay_integration_tests::TestContext;

async fn login(ctx: &TestContext, email: &str, password: &str) -> SessionStore {
    let config = ctx.config();
    let mut store = ctx.store(&config);
    store
        .login(email, &SecretString::from(password.to_owned()))
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn test_company_directory_and_detail() {
    let ctx = TestContext::seeded().await;
    let store = login(&ctx, "root@outlay.test", "pw-root").await;
    let token = store.current().unwrap().token().clone();

    let companies = store.client().companies(&token).await.unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies.first().unwrap().company_name, "Initech");

    let detail = store
        .client()
        .company(&token, CompanyId::new(1))
        .await
        .unwrap();
    assert_eq!(&detail, companies.first().unwrap());
}

#[tokio::test]
async fn test_created_company_appears_in_the_directory() {
    let ctx = TestContext::seeded().await;
    let store = login(&ctx, "root@outlay.test", "pw-root").await;
    let token = store.current().unwrap().token().clone();

    let created = store
        .client()
        .create_company(&NewCompany {
            company_name: "Globex".to_owned(),
            address: "2 Side St".to_owned(),
            contact_email: Email::parse("info@globex.test").unwrap(),
            admin_email: Email::parse("admin@globex.test").unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(created.company_name, "Globex");

    let companies = store.client().companies(&token).await.unwrap();
    assert!(companies.iter().any(|c| c.company_id == created.company_id));
}

#[tokio::test]
async fn test_role_lifecycle_create_list_delete() {
    let ctx = TestContext::seeded().await;
    let store = login(&ctx, "admin@initech.test", "pw-admin").await;
    let session = store.current().unwrap();
    let token = session.token().clone();
    let company_id = session.company_id;

    let created = store
        .client()
        .create_role(
            &token,
            &NewRole {
                role_name: "team lead".to_owned(),
                permission_level: PermissionLevel::new(3),
                company_id,
            },
        )
        .await
        .unwrap();

    let roles = store.client().roles(&token, company_id).await.unwrap();
    assert!(roles.iter().any(|r| r.role_id == created.role_id));

    store
        .client()
        .delete_role(&token, created.role_id)
        .await
        .unwrap();

    let roles = store.client().roles(&token, company_id).await.unwrap();
    assert!(!roles.iter().any(|r| r.role_id == created.role_id));
}

#[tokio::test]
async fn test_roster_upload_imports_rows() {
    let ctx = TestContext::seeded().await;
    let store = login(&ctx, "admin@initech.test", "pw-admin").await;
    let session = store.current().unwrap();
    let token = session.token().clone();
    let company_id = session.company_id;

    let roster = "name,email,role\n\
                  Ada Lovelace,ada@initech.test,engineer\n\
                  Sam Porter,sam@initech.test,manager\n";

    let outcome = store
        .client()
        .upload_employees("roster.csv", roster.as_bytes().to_vec(), company_id)
        .await
        .unwrap();
    assert_eq!(outcome.message, "Imported 2 employees");

    let employees = store.client().employees(&token, company_id).await.unwrap();
    assert!(employees.iter().any(|e| e.name == "Ada Lovelace"));
    assert!(employees.iter().any(|e| e.email.as_str() == "sam@initech.test"));
}

#[tokio::test]
async fn test_submitted_request_appears_in_own_listing_as_pending() {
    let ctx = TestContext::seeded().await;
    let store = login(&ctx, "casey@initech.test", "pw-casey").await;
    let session = store.current().unwrap();
    let (company_id, employee_id) = (session.company_id, session.employee_id);

    let submission = NewRequest::new(
        employee_id,
        company_id,
        vec![
            ExpenseLine {
                label: expense_categories::TRAVEL.to_owned(),
                amount: Money::from_cents(12500),
            },
            ExpenseLine {
                label: expense_categories::ACCOMMODATION.to_owned(),
                amount: Money::from_cents(40000),
            },
        ],
        chrono::NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
        "Vendor audit".to_owned(),
        "On-site audit of the fulfillment vendor".to_owned(),
        vec!["/uploads/hotel.pdf".to_owned()],
    );

    let created = store.client().submit_request(&submission).await.unwrap();
    assert_eq!(created.status, RequestStatus::Pending);
    assert_eq!(created.total(), Money::from_cents(52500));
    assert!(created.is_aligned());

    let mine = store
        .client()
        .my_requests(company_id, employee_id)
        .await
        .unwrap();
    assert!(mine.iter().any(|r| r.request_id == created.request_id));
}
