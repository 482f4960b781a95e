#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database row and insert payload types for the farmstop seeder.
//!
//! These types represent the shapes of data as written to the `PostGIS`
//! database. They are distinct from the transient lead records in
//! `farmstop_seeder_models`, which exist only for the duration of one
//! seeding run.

use serde::{Deserialize, Serialize};

/// Contact details stored in the `contact` JSONB column of a farm row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Phone number as supplied by the lead.
    pub phone: String,
    /// Free-text address the location was geocoded from.
    pub address: String,
}

/// Insert payload for a new farm lead row.
///
/// The `type` and `status` columns are not represented here: every seeded
/// row is written with the fixed values `'lead'` and `'unclaimed'`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFarmLead {
    /// Farm name. The seeder's duplicate check keys on an exact match.
    pub name: String,
    /// Product strings for the `products` text-array column.
    pub products: Vec<String>,
    /// Contact blob for the `contact` JSONB column.
    pub contact: ContactInfo,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
}
