//! Client domain types.
//!
//! These types represent validated domain objects separate from database row
//! types. The password hash is never part of the domain object; repositories
//! return it separately when login needs it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use parceldock_core::{ClientId, Email};

/// A customer account (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client ID.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Client's email address (unique).
    pub email: Email,
    /// When the client registered.
    pub created_at: DateTime<Utc>,
    /// When the client was last updated.
    pub updated_at: DateTime<Utc>,
}
