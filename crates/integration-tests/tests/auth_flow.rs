//! Integration tests for registration and login.
//!
//! These tests require a running `PostgreSQL` database; see the crate docs
//! for setup. Run with: `cargo test -p parceldock-integration-tests -- --ignored`

use parceldock_integration_tests::{test_pool, unique_email};
use parceldock_server::services::{AuthError, AuthService};

const PASSWORD: &str = "Valid1Pass!";

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set PARCELDOCK_TEST_DATABASE_URL)"]
async fn test_duplicate_registration_is_conflict() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let email = unique_email();

    let first = auth
        .register("First", &email, PASSWORD)
        .await
        .expect("first registration should succeed");

    let second = auth.register("Second", &email, PASSWORD).await;
    assert!(matches!(second, Err(AuthError::ClientAlreadyExists)));

    // No second account was created, and the first is untouched
    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM client WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .expect("count query should succeed");
    assert_eq!(count, 1);

    let stored = auth
        .get_client(first.id)
        .await
        .expect("original account should still exist");
    assert_eq!(stored.name, "First");
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set PARCELDOCK_TEST_DATABASE_URL)"]
async fn test_login_with_wrong_password_is_rejected() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let email = unique_email();

    let registered = auth
        .register("Wrong Password", &email, PASSWORD)
        .await
        .expect("registration should succeed");

    let rejected = auth.login(&email, "Wrong2Pass!").await;
    assert!(matches!(rejected, Err(AuthError::InvalidCredentials)));

    // The account record is untouched and the real password still works
    let accepted = auth
        .login(&email, PASSWORD)
        .await
        .expect("correct password should log in");
    assert_eq!(accepted.id, registered.id);
    assert_eq!(accepted.email.as_str(), email);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set PARCELDOCK_TEST_DATABASE_URL)"]
async fn test_login_with_unknown_email_is_rejected() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);

    let rejected = auth.login(&unique_email(), PASSWORD).await;
    assert!(matches!(rejected, Err(AuthError::InvalidCredentials)));
}
