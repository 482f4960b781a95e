#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the farmstop seeding tool.

use clap::{Parser, Subcommand};
use farmstop_database::{db, schema};
use farmstop_seeder::config::Config;
use farmstop_seeder::handler;
use farmstop_seeder::leads::{LeadSource as _, StaticLeadSource};

#[derive(Parser)]
#[command(name = "farmstop_seeder", about = "Farm lead seeding tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the database schema (PostGIS extension, farms and users tables)
    Provision,
    /// Run the lead seeding job and print the summary
    Seed,
    /// List the configured candidate leads
    Leads,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Provision => {
            let config = Config::from_env()?;
            log::info!("Provisioning database schema...");
            let db = db::connect(&config.database_url).await?;
            schema::provision(db.as_ref()).await?;
        }
        Commands::Seed => {
            let response =
                handler::handle(&serde_json::Value::Null, &serde_json::Value::Null).await;
            println!("{}", response.body);
            if response.status_code != 200 {
                return Err(
                    format!("Seeding job failed with status {}", response.status_code).into(),
                );
            }
        }
        Commands::Leads => {
            let source = StaticLeadSource;
            let leads = source.fetch_leads().await?;
            println!("{:<25} ADDRESS", "NAME");
            println!("{}", "-".repeat(60));
            for lead in &leads {
                println!("{:<25} {}", lead.name, lead.address);
            }
        }
    }

    Ok(())
}
