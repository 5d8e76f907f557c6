//! Business logic services.
//!
//! - [`auth`] - Credential management: registration, login, profile updates
//! - [`tokens`] - Stateless session token issuance and verification

pub mod auth;
pub mod tokens;

pub use auth::{AuthError, AuthService};
pub use tokens::{SessionToken, TokenAuthority, TokenError};
