//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (database ping)
//!
//! # Auth
//! POST   /auth/register       - Register a new client, returns a token
//! POST   /auth/login          - Login, returns a token
//! POST   /auth/logout         - Logout (stateless; requires a presented token)
//!
//! # Account (all require auth)
//! GET    /account             - Current client profile
//! PATCH  /account             - Partial profile update
//! DELETE /account             - Delete account and owned packages
//!
//! # Packages (all require auth, all owner-scoped)
//! POST   /packages            - Create a package
//! GET    /packages            - List owned packages
//! DELETE /packages            - Delete all owned packages
//! GET    /packages/{id}       - Fetch one owned package
//! PATCH  /packages/{id}       - Partial update of one owned package
//! DELETE /packages/{id}       - Delete one owned package
//! ```

pub mod account;
pub mod auth;
pub mod packages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route(
            "/account",
            get(account::current)
                .patch(account::update)
                .delete(account::delete),
        )
        .route(
            "/packages",
            post(packages::create)
                .get(packages::list)
                .delete(packages::delete_all),
        )
        .route(
            "/packages/{id}",
            get(packages::fetch)
                .patch(packages::update)
                .delete(packages::delete),
        )
}
