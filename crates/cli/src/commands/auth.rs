//! Session commands: login, logout, whoami.

use std::error::Error;

use secrecy::SecretString;

use outlay_client::authz;

use super::{open_store, require_claims};

/// Sign in and persist the bearer token for later invocations.
pub async fn login(email: &str, password: String) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let password = SecretString::from(password);

    store.login(email, &password).await?;

    let claims = require_claims(&store)?;
    println!(
        "Signed in as {} ({}) -> {}",
        claims.email,
        claims.role,
        authz::landing_route(&claims.role).path()
    );
    Ok(())
}

/// Sign out. Clears the session and the persisted token unconditionally.
pub fn logout() -> Result<(), Box<dyn Error>> {
    let config = outlay_client::ClientConfig::from_env()?;
    let client = outlay_client::BackendClient::new(&config);
    let cache = outlay_client::TokenCache::new(config.token_path.clone());
    let mut store = outlay_client::SessionStore::new(client, cache);

    store.logout();
    println!("Signed out.");
    Ok(())
}

/// Show the current session's claims and the screens it can see.
pub async fn whoami() -> Result<(), Box<dyn Error>> {
    let store = open_store().await?;

    let Ok(claims) = require_claims(&store) else {
        println!("Not logged in.");
        return Ok(());
    };

    println!("Email:            {}", claims.email);
    println!("Role:             {}", claims.role);
    println!("Company:          {}", claims.company_id);
    println!("Employee ID:      {}", claims.employee_id);
    println!("Permission level: {}", claims.permission_level);
    println!(
        "Landing route:    {}",
        authz::landing_route(&claims.role).path()
    );

    let screens: Vec<String> = authz::visible_nav_items(&claims.role, claims.permission_level)
        .into_iter()
        .map(|item| format!("{item:?}"))
        .collect();
    println!("Screens:          {}", screens.join(", "));
    Ok(())
}
