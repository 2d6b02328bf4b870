use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use itemseed_core::{ConnectionSettings, DEFAULT_POSTGRES_PORT};
use itemseed_storage::{SeedOutcome, create_engine, seed_items, verify_similarity};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "itemseed")]
#[command(about = "Seed the items table with embedding-bearing catalog records", long_about = None)]
struct Cli {
    /// Postgres host; when omitted, connection parameters come from
    /// POSTGRES_* environment variables
    #[arg(long)]
    host: Option<String>,
    /// Postgres username
    #[arg(long, requires = "host")]
    username: Option<String>,
    /// Postgres password
    #[arg(long, requires = "host")]
    password: Option<String>,
    /// Postgres database
    #[arg(long, requires = "host")]
    database: Option<String>,
    /// Postgres sslmode
    #[arg(long, requires = "host")]
    sslmode: Option<String>,
    /// Seed records to load
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/seed_data.json"))]
    seed_file: PathBuf,
}

impl Cli {
    fn connection_settings(&self) -> Result<ConnectionSettings> {
        let Some(host) = &self.host else {
            return Ok(ConnectionSettings::from_env()?);
        };
        Ok(ConnectionSettings {
            host: host.clone(),
            port: DEFAULT_POSTGRES_PORT,
            username: self.username.clone().context("--username is required with --host")?,
            password: self.password.clone(),
            database: self.database.clone().context("--database is required with --host")?,
            sslmode: self.sslmode.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv_override().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let settings = cli.connection_settings()?;
    let pool = create_engine(&settings).await?;

    // A missing table is a soft failure: logged by the seeder, nothing to
    // verify, exit code stays zero.
    if let SeedOutcome::Seeded(_) = seed_items(&pool, &cli.seed_file).await? {
        verify_similarity(&pool).await?;
    }

    pool.close().await;
    Ok(())
}
