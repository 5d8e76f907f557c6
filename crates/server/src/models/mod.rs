//! Domain models.

pub mod client;
pub mod package;

pub use client::Client;
pub use package::{NewPackage, Package, PackageChanges};
