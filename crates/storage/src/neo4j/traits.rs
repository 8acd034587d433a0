use async_trait::async_trait;
use customernexus_core::{GraphTables, Result};

use super::types::{
    AlgorithmSummary, ConstructSummary, ExportSummary, MemoryEstimate, ProjectionSummary,
    QueryResult,
};

/// Trait for graph engine operations
///
/// Graph names, labels, relationship types and property names are always
/// sent as query parameters. Only [`run_cypher`](Self::run_cypher) executes
/// caller-supplied statement text.
#[async_trait]
pub trait GraphClientTrait: Send + Sync {
    // ===== Load =====

    /// Build an in-memory graph from pre-assembled tables in one request
    async fn construct_graph(
        &self,
        graph_name: &str,
        tables: &GraphTables,
    ) -> Result<ConstructSummary>;

    /// Write an in-memory graph out as a new database
    async fn export_graph(&self, graph_name: &str, database: &str) -> Result<ExportSummary>;

    // ===== Catalog =====

    /// Estimate the memory a native projection would need
    async fn estimate_projection(
        &self,
        node_labels: &[&str],
        relationship_types: &[&str],
    ) -> Result<MemoryEstimate>;

    async fn graph_exists(&self, graph_name: &str) -> Result<bool>;

    /// Remove a graph from the catalog; dropping a missing graph is not an error
    async fn drop_graph(&self, graph_name: &str) -> Result<()>;

    /// Project stored nodes and relationships into a named in-memory graph
    ///
    /// Relationships are projected with their natural orientation.
    async fn project_graph(
        &self,
        graph_name: &str,
        node_labels: &[&str],
        relationship_types: &[&str],
    ) -> Result<ProjectionSummary>;

    // ===== Algorithms =====

    /// Run PageRank and store each score in `property` on the stored nodes
    async fn write_pagerank(&self, graph_name: &str, property: &str) -> Result<AlgorithmSummary>;

    /// Run Louvain and store each community id in `property` on the stored nodes
    async fn write_louvain(&self, graph_name: &str, property: &str) -> Result<AlgorithmSummary>;

    // ===== Queries =====

    /// Run a read query and collect the named columns of every row
    async fn run_cypher(&self, cypher: &str, columns: &[&str]) -> Result<QueryResult>;
}
