//! Idempotent schema provisioning for the spatial datastore.
//!
//! Every statement is `CREATE … IF NOT EXISTS`, so provisioning is safe to
//! re-run. Statements execute in order under auto-commit; a failure aborts
//! the remaining statements and surfaces the triggering error.

use switchy_database::Database;

use crate::DbError;

/// The `farms` table.
///
/// `name` is deduplicated by the seeder's check-then-insert, not by a
/// UNIQUE constraint.
const CREATE_FARMS_TABLE: &str = "CREATE TABLE IF NOT EXISTS farms (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT,
    status TEXT,
    products TEXT[],
    contact JSONB,
    owner_id UUID,
    location GEOGRAPHY(POINT, 4326)
)";

/// Spatial index for location searches.
const CREATE_FARMS_GEO_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS farms_geo_index ON farms USING GIST (location)";

/// The `users` table. `id` matches the external auth provider's user ID.
const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    email TEXT UNIQUE,
    role TEXT,
    name TEXT,
    created_at TIMESTAMP DEFAULT NOW(),
    updated_at TIMESTAMP DEFAULT NOW()
)";

/// Ensures the `PostGIS` extension, the `farms` table (with its spatial
/// index), and the `users` table exist.
///
/// Touches schema only; no data rows are read or written.
///
/// # Errors
///
/// Returns [`DbError`] if any statement fails; remaining statements are
/// not attempted.
pub async fn provision(db: &dyn Database) -> Result<(), DbError> {
    log::info!("Enabling PostGIS extension...");
    db.exec_raw("CREATE EXTENSION IF NOT EXISTS postgis").await?;

    log::info!("Creating farms table...");
    db.exec_raw(CREATE_FARMS_TABLE).await?;
    db.exec_raw(CREATE_FARMS_GEO_INDEX).await?;

    log::info!("Creating users table...");
    db.exec_raw(CREATE_USERS_TABLE).await?;

    log::info!("Database schema provisioning complete");
    Ok(())
}
