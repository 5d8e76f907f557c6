//! Package lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a package (shipment request).
///
/// Packages start as `Saved` when created. A background sweep promotes
/// `Saved` packages to `Completed` after a fixed age; the owning client can
/// cancel at any time before that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PackageStatus {
    #[default]
    Saved,
    Canceled,
    Completed,
}

impl std::fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saved => write!(f, "Saved"),
            Self::Canceled => write!(f, "Canceled"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

impl std::str::FromStr for PackageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Saved" => Ok(Self::Saved),
            "Canceled" => Ok(Self::Canceled),
            "Completed" => Ok(Self::Completed),
            _ => Err(format!("invalid package status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_saved() {
        assert_eq!(PackageStatus::default(), PackageStatus::Saved);
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in [
            PackageStatus::Saved,
            PackageStatus::Canceled,
            PackageStatus::Completed,
        ] {
            let parsed: PackageStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("Shipped".parse::<PackageStatus>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PackageStatus::Canceled).unwrap();
        assert_eq!(json, "\"Canceled\"");
    }
}
