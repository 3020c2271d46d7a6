//! Session bootstrap and login flows against the stub backend.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use outlay_core::{CompanyId, EmployeeId, PermissionLevel, RoleKind};

use outlay_client::AuthError;
use outlay_integration_tests::TestContext;

fn password(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

#[tokio::test]
async fn test_login_then_validate_yields_identical_claims() {
    let ctx = TestContext::seeded().await;
    let config = ctx.config();

    // Log in; the token lands in the cache file.
    let mut store = ctx.store(&config);
    store
        .login("reviewer@initech.test", &password("pw-reviewer"))
        .await
        .unwrap();

    let session = store.current().unwrap();
    assert_eq!(session.email.as_str(), "reviewer@initech.test");
    assert_eq!(session.role, RoleKind::Member("manager".to_owned()));
    assert_eq!(session.company_id, CompanyId::new(1));
    assert_eq!(session.employee_id, EmployeeId::new(12));
    assert_eq!(session.permission_level, PermissionLevel::new(2));

    // A fresh store over the same token file validates the persisted token
    // and derives the same claims.
    let mut restored = ctx.store(&config);
    assert!(restored.initialize().await);

    let restored_session = restored.current().unwrap();
    assert_eq!(restored_session.email.as_str(), "reviewer@initech.test");
    assert_eq!(restored_session.role, RoleKind::Member("manager".to_owned()));
    assert_eq!(restored_session.company_id, CompanyId::new(1));
    assert_eq!(restored_session.employee_id, EmployeeId::new(12));
    assert_eq!(restored_session.permission_level, PermissionLevel::new(2));

    store.logout();
}

#[tokio::test]
async fn test_wrong_password_leaves_no_session_and_no_token() {
    let ctx = TestContext::seeded().await;
    let config = ctx.config();

    let mut store = ctx.store(&config);
    let err = store
        .login("reviewer@initech.test", &password("wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(store.current().is_none());
    assert!(
        !config.token_path.exists(),
        "no token may be persisted on a failed login"
    );
}

#[tokio::test]
async fn test_unknown_account_is_invalid_credentials() {
    let ctx = TestContext::seeded().await;
    let config = ctx.config();

    let mut store = ctx.store(&config);
    let err = store
        .login("nobody@initech.test", &password("whatever"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_logout_clears_session_and_persisted_token() {
    let ctx = TestContext::seeded().await;
    let config = ctx.config();

    let mut store = ctx.store(&config);
    store
        .login("casey@initech.test", &password("pw-casey"))
        .await
        .unwrap();
    assert!(config.token_path.exists());

    store.logout();
    assert!(store.current().is_none());
    assert!(!config.token_path.exists());

    // With the token gone, startup is unauthenticated.
    let mut restored = ctx.store(&config);
    assert!(!restored.initialize().await);
}

#[tokio::test]
async fn test_stale_token_is_cleared_on_startup() {
    let ctx = TestContext::seeded().await;
    let config = ctx.config();

    // A token the backend never issued (or has expired).
    std::fs::create_dir_all(config.token_path.parent().unwrap()).unwrap();
    std::fs::write(&config.token_path, "tok-stale").unwrap();

    let mut store = ctx.store(&config);
    assert!(!store.initialize().await);
    assert!(store.current().is_none());
    assert!(
        !config.token_path.exists(),
        "rejected tokens are not kept around"
    );
}

#[tokio::test]
async fn test_login_replaces_previous_identity() {
    let ctx = TestContext::seeded().await;
    let config = ctx.config();

    let mut store = ctx.store(&config);
    store
        .login("casey@initech.test", &password("pw-casey"))
        .await
        .unwrap();
    store
        .login("root@outlay.test", &password("pw-root"))
        .await
        .unwrap();

    let session = store.current().unwrap();
    assert_eq!(session.role, RoleKind::ProductAdmin);
    assert_eq!(session.employee_id, EmployeeId::new(1));

    store.logout();
}
