//! Lead sources for the seeding job.
//!
//! A lead source produces the finite candidate list one seeding run walks.
//! The static source below is a placeholder for a future scraping
//! collaborator; swapping in a real crawler only means implementing
//! [`LeadSource`].

use async_trait::async_trait;
use farmstop_seeder_models::Lead;

use crate::SeedError;

/// Supplies the finite sequence of candidate leads for one run.
#[async_trait]
pub trait LeadSource: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Produces the candidate leads, in processing order.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the source cannot produce its records.
    async fn fetch_leads(&self) -> Result<Vec<Lead>, SeedError>;
}

/// Hardcoded candidate list standing in for a real scraper.
pub struct StaticLeadSource;

#[async_trait]
impl LeadSource for StaticLeadSource {
    fn name(&self) -> &str {
        "static lead list"
    }

    async fn fetch_leads(&self) -> Result<Vec<Lead>, SeedError> {
        Ok(vec![
            Lead {
                name: "Dairy King Estate".to_string(),
                address: "Irene Dairy Farm, Pretoria, South Africa".to_string(),
                products: vec!["Milk".to_string()],
                phone: "012-000-1111".to_string(),
            },
            Lead {
                name: "Centurion Egg Depot".to_string(),
                address: "Rooihuiskraal, Centurion, South Africa".to_string(),
                products: vec!["Eggs".to_string()],
                phone: "012-666-7777".to_string(),
            },
            // Unresolvable address; exercises the geocode failure path.
            Lead {
                name: "Bad Address Farm".to_string(),
                address: "Nowhere, Mars".to_string(),
                products: vec!["Space Dust".to_string()],
                phone: "000-000-0000".to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_source_lists_the_candidate_leads() {
        let leads = StaticLeadSource.fetch_leads().await.unwrap();

        let names: Vec<&str> = leads.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            ["Dairy King Estate", "Centurion Egg Depot", "Bad Address Farm"]
        );
    }
}
