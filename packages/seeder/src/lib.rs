#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for seeding the farmstop `PostGIS` database with lead records.
//!
//! The seeding job walks a finite list of candidate leads in order:
//! duplicate names are skipped without touching the geocoder, new names
//! are geocoded with bounded retry, and successful results are inserted
//! as `lead`/`unclaimed` farm rows. Per-lead failures are counted and
//! never abort the batch; only failures outside the per-lead loop fail
//! the job.

pub mod config;
pub mod handler;
pub mod leads;

use std::time::{Duration, Instant};

use farmstop_database::DbError;
use farmstop_database::store::FarmStore;
use farmstop_database_models::{ContactInfo, NewFarmLead};
use farmstop_geocoder::{GeocodeError, Geocoder, RetryPolicy, geocode_with_retry};
use farmstop_seeder_models::{Lead, SeedStats};

use crate::leads::LeadSource;

/// Errors that can occur outside the per-lead loop.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// The lead source failed to produce its records.
    #[error("Lead source error: {message}")]
    Source {
        /// Description of what went wrong.
        message: String,
    },
}

/// Knobs for one seeding run.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Pause after each lead that reached the geocoder, keeping usage
    /// under the external service's rate limit.
    pub request_delay: Duration,
    /// Retry schedule for transient geocoding failures.
    pub retry: RetryPolicy,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs(1),
            retry: RetryPolicy::default(),
        }
    }
}

/// How a single lead finished.
enum LeadOutcome {
    /// A farm row with the same name already exists.
    Skipped,
    /// A new farm row was inserted.
    Added,
    /// Geocoding failed after retries (or with a permanent error).
    GeocodeFailed(GeocodeError),
    /// The geocoder answered but resolved no location.
    NoLocation,
}

/// Runs the seeding job over every lead the source produces.
///
/// Lead processing is strictly sequential. A failure while processing one
/// lead is logged, counted, and never aborts the remaining leads; a
/// failure fetching the lead list is job-level and aborts with no stats.
///
/// # Errors
///
/// Returns [`SeedError`] if the lead source fails.
pub async fn run_seed_job(
    store: &dyn FarmStore,
    geocoder: &dyn Geocoder,
    source: &dyn LeadSource,
    options: &SeedOptions,
) -> Result<SeedStats, SeedError> {
    let start = Instant::now();
    log::info!("Starting seeding job with leads from {}", source.name());

    let leads = source.fetch_leads().await?;
    let mut stats = SeedStats::default();

    for lead in &leads {
        match process_lead(store, geocoder, &options.retry, lead).await {
            Ok(LeadOutcome::Skipped) => {
                log::info!("Duplicate, skipping: {}", lead.name);
                stats.skipped += 1;
                // No geocode call was made, so no rate-limit pause is owed.
                continue;
            }
            Ok(LeadOutcome::Added) => {
                log::info!("Added: {}", lead.name);
                stats.added += 1;
            }
            Ok(LeadOutcome::GeocodeFailed(e)) => {
                log::warn!("Could not geocode {}: {e}", lead.name);
                stats.errors += 1;
            }
            Ok(LeadOutcome::NoLocation) => {
                log::warn!("Address resolved to no location: {}", lead.name);
                stats.errors += 1;
            }
            Err(e) => {
                log::error!("Failed processing {}: {e}", lead.name);
                stats.errors += 1;
            }
        }

        tokio::time::sleep(options.request_delay).await;
    }

    let elapsed = start.elapsed();
    log::info!(
        "Seeding complete: {} added, {} skipped, {} errors in {:.1}s",
        stats.added,
        stats.skipped,
        stats.errors,
        elapsed.as_secs_f64()
    );

    Ok(stats)
}

/// Processes one lead: duplicate check, geocode with retry, insert.
///
/// Store failures propagate as `Err` and are handled at the loop
/// boundary; geocoding failures are part of the lead's outcome.
async fn process_lead(
    store: &dyn FarmStore,
    geocoder: &dyn Geocoder,
    retry: &RetryPolicy,
    lead: &Lead,
) -> Result<LeadOutcome, SeedError> {
    if store.find_lead_by_name(&lead.name).await?.is_some() {
        return Ok(LeadOutcome::Skipped);
    }

    let location = match geocode_with_retry(geocoder, &lead.address, retry).await {
        Ok(Some(location)) => location,
        Ok(None) => return Ok(LeadOutcome::NoLocation),
        Err(e) => return Ok(LeadOutcome::GeocodeFailed(e)),
    };

    store
        .insert_lead(&NewFarmLead {
            name: lead.name.clone(),
            products: lead.products.clone(),
            contact: ContactInfo {
                phone: lead.phone.clone(),
                address: lead.address.clone(),
            },
            longitude: location.longitude,
            latitude: location.latitude,
        })
        .await?;

    Ok(LeadOutcome::Added)
}
