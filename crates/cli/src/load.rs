//! CSV to graph database load

use anyhow::{Context, Result};
use customernexus_core::{Config, GraphTables};
use customernexus_staging::{prepare_graph_tables, Geocoder, InputFiles};
use customernexus_storage::{ConstructSummary, ExportSummary, GraphClientTrait};
use std::path::Path;
use tracing::{info, warn};

/// What one load produced
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    pub construct: ConstructSummary,
    pub export: ExportSummary,
}

/// Read, geocode and assemble the CSV files in `data_dir`
///
/// Needs no graph connection, so bad input fails before one is opened.
pub async fn stage_load_tables(data_dir: &Path, geocoder: &dyn Geocoder) -> Result<GraphTables> {
    let files = InputFiles::in_dir(data_dir);
    info!("Loading input files from {}", data_dir.display());

    prepare_graph_tables(&files, geocoder)
        .await
        .context("Failed to stage input files")
}

/// Construct the graph from staged tables, export it and release the
/// in-memory copy
pub async fn write_load_graph(
    config: &Config,
    tables: &GraphTables,
    client: &dyn GraphClientTrait,
) -> Result<LoadSummary> {
    let graph_name = config.load.graph_name.as_str();
    if client.graph_exists(graph_name).await? {
        warn!("Graph '{graph_name}' is left over from an earlier run, dropping it");
        client.drop_graph(graph_name).await?;
    }

    let construct = client
        .construct_graph(graph_name, tables)
        .await
        .context("Failed to construct graph")?;
    info!(
        "Constructed '{}' with {} nodes and {} relationships",
        construct.graph_name, construct.node_count, construct.relationship_count
    );

    let export = client
        .export_graph(graph_name, &config.load.export_database)
        .await
        .context("Failed to export graph")?;
    info!(
        "Exported {} nodes and {} relationships to database '{}'",
        export.node_count, export.relationship_count, export.database
    );

    client.drop_graph(graph_name).await?;

    Ok(LoadSummary { construct, export })
}

/// Stage the CSV files in `data_dir`, then write them through `client`
pub async fn run_load(
    config: &Config,
    data_dir: &Path,
    client: &dyn GraphClientTrait,
    geocoder: &dyn Geocoder,
) -> Result<LoadSummary> {
    let tables = stage_load_tables(data_dir, geocoder).await?;
    write_load_graph(config, &tables, client).await
}
