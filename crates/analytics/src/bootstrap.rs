//! Preparation of the account projection before the menu starts

use customernexus_core::{AnalyticsConfig, Result};
use customernexus_storage::{AlgorithmSummary, GraphClientTrait, ProjectionSummary};
use tracing::info;

/// Node labels of the account projection
pub const PROJECTION_LABELS: &[&str] = &["Account"];

/// Relationship types of the account projection
pub const PROJECTION_RELATIONSHIPS: &[&str] = &["TRANSFER"];

/// What [`init_graph`] did
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    /// A projection of the same name was left over and has been dropped;
    /// scores written by the earlier run stay on the accounts
    DroppedExisting,
    Projected {
        projection: ProjectionSummary,
        pagerank: AlgorithmSummary,
        louvain: AlgorithmSummary,
    },
}

/// Estimate, then either drop a stale projection or project and score it
pub async fn init_graph(
    client: &dyn GraphClientTrait,
    config: &AnalyticsConfig,
) -> Result<BootstrapOutcome> {
    let estimate = client
        .estimate_projection(PROJECTION_LABELS, PROJECTION_RELATIONSHIPS)
        .await?;
    info!(
        " Required memory for native loading >> {}",
        estimate.required_memory
    );

    if client.graph_exists(&config.catalog_name).await? {
        client.drop_graph(&config.catalog_name).await?;
        info!("Dropped existing projection '{}'", config.catalog_name);
        return Ok(BootstrapOutcome::DroppedExisting);
    }

    let projection = client
        .project_graph(
            &config.catalog_name,
            PROJECTION_LABELS,
            PROJECTION_RELATIONSHIPS,
        )
        .await?;
    info!(
        "Projected '{}' with {} nodes and {} relationships",
        projection.graph_name, projection.node_count, projection.relationship_count
    );

    let pagerank = client
        .write_pagerank(&config.catalog_name, &config.pagerank_property)
        .await?;
    info!("{}", serde_json::Value::Object(pagerank.metadata.clone()));

    let louvain = client
        .write_louvain(&config.catalog_name, &config.community_property)
        .await?;
    info!("{}", serde_json::Value::Object(louvain.metadata.clone()));

    Ok(BootstrapOutcome::Projected {
        projection,
        pagerank,
        louvain,
    })
}
