#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Lead, statistics, and job response types for the farmstop seeder.

use serde::{Deserialize, Serialize};

/// An unverified candidate farm record awaiting geocoding and insertion.
///
/// Leads exist only for the duration of one seeding run; they are never
/// persisted in this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Farm name. Duplicate detection keys on an exact match.
    pub name: String,
    /// Free-text address handed to the geocoder.
    pub address: String,
    /// Product strings for the farm row.
    pub products: Vec<String>,
    /// Contact phone number.
    pub phone: String,
}

/// Result of a completed seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedStats {
    /// Leads inserted as new farm rows.
    pub added: u64,
    /// Leads skipped because a row with the same name already exists.
    pub skipped: u64,
    /// Leads dropped by geocoding failures or unexpected per-lead errors.
    pub errors: u64,
}

/// HTTP-style response returned by the job invocation handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResponse {
    /// 200 when the job ran to completion (even with per-lead errors);
    /// 500 when a failure occurred outside the per-lead loop.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded [`SeedStats`] on success, or an error message.
    pub body: String,
}
