//! Job invocation entry point.
//!
//! Mirrors a serverless invocation contract: an opaque event/context pair
//! comes in (ignored by the job logic) and an HTTP-style response goes
//! out. The job returns 200 when it ran to completion, even if individual
//! leads errored; 500 is reserved for failures outside the per-lead loop.

use farmstop_database::db;
use farmstop_database::store::PgFarmStore;
use farmstop_geocoder::nominatim::NominatimGeocoder;
use farmstop_seeder_models::JobResponse;

use crate::config::Config;
use crate::leads::StaticLeadSource;
use crate::{SeedOptions, run_seed_job};

/// User-agent identifying this seeder to the geocoding service.
pub const USER_AGENT: &str = "farmstop_seeder/0.1";

/// Runs one seeding job.
///
/// The event and context are accepted for invocation-contract
/// compatibility and ignored. The database connection is scoped to this
/// call and dropped on every exit path.
pub async fn handle(_event: &serde_json::Value, _context: &serde_json::Value) -> JobResponse {
    match run().await {
        Ok(body) => JobResponse {
            status_code: 200,
            body,
        },
        Err(e) => {
            log::error!("Seeding job failed: {e}");
            JobResponse {
                status_code: 500,
                body: serde_json::Value::from(format!("Job failed: {e}")).to_string(),
            }
        }
    }
}

/// Wires up the collaborators, runs the job, and serializes the stats.
async fn run() -> Result<String, Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let db = db::connect(&config.database_url).await?;
    let store = PgFarmStore::new(db);

    let geocoder = NominatimGeocoder::new(USER_AGENT)?;
    let source = StaticLeadSource;

    let options = SeedOptions {
        request_delay: config.request_delay,
        ..SeedOptions::default()
    };

    let stats = run_seed_job(&store, &geocoder, &source, &options).await?;

    Ok(serde_json::to_string(&stats)?)
}
