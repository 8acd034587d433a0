//! customernexus CLI - customer graph loader and fraud analytics
//!
//! This binary provides the command-line interface for loading the customer,
//! transfer and purchase CSV files into Neo4j and querying the result.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use customernexus::{
    load_dotenv, load_dotenv_from, run_query_session, stage_load_tables, write_load_graph,
};
use customernexus_core::Config;
use customernexus_staging::NominatimGeocoder;
use customernexus_storage::Neo4jGraphClient;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "customernexus")]
#[command(about = "Customer graph loader and fraud analytics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Env file read before configuration (default: `.env` when present)
    #[arg(long, value_name = "FILE", global = true)]
    env_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the CSV files into a new graph database
    Load {
        /// Directory holding customers.csv, transfers.csv and purchases.csv
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Score the account graph and run analytical queries interactively
    Query,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file = match cli.env_file.as_deref() {
        Some(path) => {
            load_dotenv_from(path)?;
            Some(path.to_path_buf())
        }
        None => load_dotenv(),
    };

    init_logging(cli.verbose)?;
    if let Some(path) = env_file {
        debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        Commands::Load { data_dir } => load(cli.config.as_deref(), data_dir).await,
        Commands::Query => query(cli.config.as_deref()).await,
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "customernexus_core={level},customernexus_staging={level},\
             customernexus_storage={level},customernexus_analytics={level},{}={level}",
            env!("CARGO_PKG_NAME")
        ))
        .init();

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.validate()?;
    Ok(config)
}

async fn load(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(&config.load.data_dir));

    let geocoder = NominatimGeocoder::new(&config.geocoding)?;
    let tables = stage_load_tables(&data_dir, &geocoder).await?;

    let client = Neo4jGraphClient::connect(&config.neo4j, &config.load.database).await?;
    let summary = write_load_graph(&config, &tables, &client).await?;
    info!(
        "Load complete: database '{}' holds {} nodes and {} relationships",
        summary.export.database, summary.export.node_count, summary.export.relationship_count
    );

    Ok(())
}

async fn query(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let client = Neo4jGraphClient::connect(&config.neo4j, &config.neo4j.database).await?;

    let stdin = io::stdin();
    let executed = run_query_session(&config, &client, stdin.lock(), io::stdout()).await?;
    info!("Ran {executed} queries");

    Ok(())
}
