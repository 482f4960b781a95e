#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database connection, schema provisioning, and queries for the farmstop
//! seeder.
//!
//! Uses `switchy_database` behind `Box<dyn Database>`. `PostGIS` statements
//! use raw SQL via `exec_raw_params()` / `query_raw_params()`. Every
//! statement runs under auto-commit; nothing here opens a transaction.

pub mod db;
pub mod queries;
pub mod schema;
pub mod store;

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
