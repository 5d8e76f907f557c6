//! Package domain types.
//!
//! A package is a shipment request owned by exactly one client. The physical
//! specs are free-form JSON (weight, dimensions, fragile flags and whatever
//! else the client app collects); scheduling and address fields are plain
//! strings entered by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parceldock_core::{ClientId, PackageId, PackageStatus};

/// A shipment request (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Unique package ID.
    pub id: PackageId,
    /// Owning client.
    pub client_id: ClientId,
    /// Physical specs (dimensions, weight, ...) as free-form JSON.
    pub specs: serde_json::Value,
    /// Requested pickup date.
    pub date: Option<String>,
    /// Requested pickup time.
    pub time: Option<String>,
    /// Pickup city.
    pub pick_city: Option<String>,
    /// Pickup street address.
    pub pick_address: Option<String>,
    /// Destination city.
    pub dest_city: Option<String>,
    /// Destination street address.
    pub dest_address: Option<String>,
    /// Recipient name.
    pub recipient_name: Option<String>,
    /// Recipient tax ID.
    pub recipient_tax_id: Option<String>,
    /// Lifecycle status.
    pub status: PackageStatus,
    /// When the package was created.
    pub created_at: DateTime<Utc>,
    /// When the package was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a new package.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    #[serde(default)]
    pub specs: serde_json::Value,
    pub date: Option<String>,
    pub time: Option<String>,
    pub pick_city: Option<String>,
    pub pick_address: Option<String>,
    pub dest_city: Option<String>,
    pub dest_address: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_tax_id: Option<String>,
    #[serde(default)]
    pub status: PackageStatus,
}

/// Partial update of a package. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageChanges {
    pub specs: Option<serde_json::Value>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub pick_city: Option<String>,
    pub pick_address: Option<String>,
    pub dest_city: Option<String>,
    pub dest_address: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_tax_id: Option<String>,
    pub status: Option<PackageStatus>,
}

impl PackageChanges {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.specs.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.pick_city.is_none()
            && self.pick_address.is_none()
            && self.dest_city.is_none()
            && self.dest_address.is_none()
            && self.recipient_name.is_none()
            && self.recipient_tax_id.is_none()
            && self.status.is_none()
    }
}
