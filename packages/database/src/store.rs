//! Farm persistence seam for the seeding job.
//!
//! The seeder core talks to [`FarmStore`] rather than to the database
//! directly so test suites can substitute an in-memory store and a future
//! batch runner can swap the backing storage.

use async_trait::async_trait;
use farmstop_database_models::NewFarmLead;
use switchy_database::Database;

use crate::{DbError, queries};

/// Duplicate lookup and insert operations used by the seeding job.
#[async_trait]
pub trait FarmStore: Send + Sync {
    /// Returns the ID of an existing farm row with the given name, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the lookup fails.
    async fn find_lead_by_name(&self, name: &str) -> Result<Option<i32>, DbError>;

    /// Inserts a new farm row for a geocoded lead.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the insert fails.
    async fn insert_lead(&self, lead: &NewFarmLead) -> Result<(), DbError>;
}

/// [`FarmStore`] backed by the `PostGIS` database.
///
/// Owns the connection for the duration of the job; each statement runs
/// under auto-commit. There is no transaction spanning the duplicate check
/// and the insert, which is a known race if the job is ever parallelized.
pub struct PgFarmStore {
    db: Box<dyn Database>,
}

impl PgFarmStore {
    /// Wraps an open database connection.
    #[must_use]
    pub fn new(db: Box<dyn Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FarmStore for PgFarmStore {
    async fn find_lead_by_name(&self, name: &str) -> Result<Option<i32>, DbError> {
        queries::find_farm_id_by_name(self.db.as_ref(), name).await
    }

    async fn insert_lead(&self, lead: &NewFarmLead) -> Result<(), DbError> {
        queries::insert_farm_lead(self.db.as_ref(), lead).await
    }
}
