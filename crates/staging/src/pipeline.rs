//! End-to-end staging: CSV files in, validated graph tables out

use customernexus_core::{GraphTables, Result};
use tracing::info;

use crate::allocator::NodeIdAllocator;
use crate::builder::build_graph_tables;
use crate::entities::{stage_customers, stage_purchases, stage_transfers, StagedData};
use crate::geocode::{resolve_coordinates, Geocoder};
use crate::ingest::{InputFiles, RawData};

/// Read, geocode and normalize the three input files
pub async fn stage_inputs(files: &InputFiles, geocoder: &dyn Geocoder) -> Result<StagedData> {
    let raw = RawData::read(files)?;
    stage_raw(raw, geocoder).await
}

/// Geocode and normalize rows that are already in memory
pub async fn stage_raw(raw: RawData, geocoder: &dyn Geocoder) -> Result<StagedData> {
    let customers = resolve_coordinates(raw.customers, geocoder).await?;

    let staged = StagedData {
        customers: stage_customers(&customers)?,
        transfers: stage_transfers(&raw.transfers)?,
        purchases: stage_purchases(&raw.purchases)?,
    };

    info!("Normalized input rows");
    Ok(staged)
}

/// Stage the inputs and assemble the tables for one bulk construct
pub async fn prepare_graph_tables(
    files: &InputFiles,
    geocoder: &dyn Geocoder,
) -> Result<GraphTables> {
    let staged = stage_inputs(files, geocoder).await?;
    let mut allocator = NodeIdAllocator::new();
    build_graph_tables(&staged, &mut allocator)
}
