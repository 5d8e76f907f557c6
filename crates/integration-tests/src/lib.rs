//! Integration tests for Parceldock.
//!
//! # Running Tests
//!
//! ```bash
//! # Point the tests at a scratch database
//! export PARCELDOCK_TEST_DATABASE_URL=postgres://localhost/parceldock_test
//!
//! # Run integration tests (ignored by default)
//! cargo test -p parceldock-integration-tests -- --ignored
//! ```
//!
//! Each test creates its own clients with unique emails, so tests can run
//! concurrently against the same database without interfering.

use sqlx::PgPool;
use uuid::Uuid;

/// Connect to the test database and bring its schema up to date.
///
/// Reads `PARCELDOCK_TEST_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// # Panics
///
/// Panics if no database URL is configured or the connection fails; the
/// tests using this are ignored by default and only run when a database
/// has been set up.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("PARCELDOCK_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("set PARCELDOCK_TEST_DATABASE_URL to run integration tests");

    let pool = PgPool::connect(&url)
        .await
        .expect("failed to connect to the test database");

    sqlx::migrate!("../server/migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations on the test database");

    pool
}

/// A fresh email address no other test run will have used.
#[must_use]
pub fn unique_email() -> String {
    format!("client-{}@example.com", Uuid::new_v4())
}
