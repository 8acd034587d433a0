use anyhow::{Context, Result};
use async_trait::async_trait;
use customernexus_core::{GraphTables, Neo4jConfig};
use neo4rs::{BoltType, ConfigBuilder, Graph, Query};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::construct::{construct_rows, CONSTRUCT_QUERY};
use super::traits::GraphClientTrait;
use super::types::{
    AlgorithmSummary, ConstructSummary, ExportSummary, MemoryEstimate, ProjectionSummary,
    QueryResult, Record,
};
use crate::error::{into_core, StorageError};

const PAGERANK_COLUMNS: &[&str] = &[
    "nodePropertiesWritten",
    "ranIterations",
    "didConverge",
    "computeMillis",
    "writeMillis",
];

const LOUVAIN_COLUMNS: &[&str] = &[
    "communityCount",
    "modularity",
    "ranLevels",
    "nodePropertiesWritten",
    "computeMillis",
    "writeMillis",
];

/// Neo4j client for graph engine operations
pub struct Neo4jGraphClient {
    graph: Arc<Graph>,
    database: String,
}

impl Neo4jGraphClient {
    /// Connect to Neo4j and run every session against `database`
    ///
    /// The URI from the configuration gets a `bolt://` scheme when it has none.
    pub async fn connect(config: &Neo4jConfig, database: &str) -> Result<Self> {
        let uri = config.bolt_uri();

        info!("Connecting to Neo4j at {} (database {})", uri, database);

        let neo4j_config = ConfigBuilder::default()
            .uri(uri.as_str())
            .user(config.username.as_str())
            .password(config.password.as_str())
            .db(database)
            .build()
            .map_err(|e| StorageError::InvalidConfig(e.to_string()))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("{uri}: {e}")))?;

        Ok(Self {
            graph: Arc::new(graph),
            database: database.to_string(),
        })
    }

    /// Database every session runs against
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Get a reference to the underlying Graph for direct query execution
    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    /// Execute a query and read the named columns of each row as JSON
    async fn fetch_records(&self, query: Query, columns: &[&str]) -> Result<Vec<Record>> {
        let mut stream = self.graph.execute(query).await?;
        let mut records = Vec::new();

        while let Some(row) = stream.next().await? {
            let mut record = Record::new();
            for column in columns {
                let value: Value =
                    row.get(column)
                        .map_err(|e| StorageError::UnreadableColumn {
                            column: column.to_string(),
                            message: e.to_string(),
                        })?;
                record.insert(column.to_string(), value);
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Like [`fetch_records`](Self::fetch_records) for procedures that yield exactly one row
    async fn fetch_single(
        &self,
        procedure: &str,
        query: Query,
        columns: &[&str],
    ) -> Result<Record> {
        self.fetch_records(query, columns)
            .await
            .with_context(|| format!("Failed to call {procedure}"))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                StorageError::EmptyResult {
                    procedure: procedure.to_string(),
                }
                .into()
            })
    }

    pub async fn construct(&self, graph_name: &str, tables: &GraphTables) -> Result<ConstructSummary> {
        let rows: Vec<HashMap<String, BoltType>> = construct_rows(tables)?
            .iter()
            .map(|row| row.to_bolt())
            .collect();

        info!(
            "Constructing graph '{}' from {} nodes and {} relationships",
            graph_name,
            tables.node_count(),
            tables.relationship_count()
        );

        let query = Query::new(CONSTRUCT_QUERY.to_string())
            .param("graph_name", graph_name)
            .param("rows", rows);

        let record = self
            .fetch_single(
                "gds.graph.project",
                query,
                &["graphName", "nodeCount", "relationshipCount"],
            )
            .await?;

        Ok(ConstructSummary {
            graph_name: string_field(&record, "graphName")?,
            node_count: int_field(&record, "nodeCount")?,
            relationship_count: int_field(&record, "relationshipCount")?,
        })
    }

    pub async fn export(&self, graph_name: &str, database: &str) -> Result<ExportSummary> {
        info!("Exporting graph '{}' to database '{}'", graph_name, database);

        let query = Query::new(
            "CALL gds.graph.export($graph_name, {dbName: $database})
             YIELD dbName, graphName, nodeCount, relationshipCount
             RETURN dbName, graphName, nodeCount, relationshipCount"
                .to_string(),
        )
        .param("graph_name", graph_name)
        .param("database", database);

        let record = self
            .fetch_single(
                "gds.graph.export",
                query,
                &["dbName", "graphName", "nodeCount", "relationshipCount"],
            )
            .await?;

        Ok(ExportSummary {
            database: string_field(&record, "dbName")?,
            graph_name: string_field(&record, "graphName")?,
            node_count: int_field(&record, "nodeCount")?,
            relationship_count: int_field(&record, "relationshipCount")?,
        })
    }

    pub async fn estimate(
        &self,
        node_labels: &[&str],
        relationship_types: &[&str],
    ) -> Result<MemoryEstimate> {
        let query = Query::new(
            "CALL gds.graph.project.estimate($node_labels, $relationships)
             YIELD requiredMemory, nodeCount, relationshipCount
             RETURN requiredMemory, nodeCount, relationshipCount"
                .to_string(),
        )
        .param("node_labels", labels_param(node_labels))
        .param("relationships", relationship_projection(relationship_types));

        let record = self
            .fetch_single(
                "gds.graph.project.estimate",
                query,
                &["requiredMemory", "nodeCount", "relationshipCount"],
            )
            .await?;

        Ok(MemoryEstimate {
            required_memory: string_field(&record, "requiredMemory")?,
            node_count: int_field(&record, "nodeCount")?,
            relationship_count: int_field(&record, "relationshipCount")?,
        })
    }

    pub async fn exists(&self, graph_name: &str) -> Result<bool> {
        let query = Query::new(
            "CALL gds.graph.exists($graph_name) YIELD exists RETURN exists".to_string(),
        )
        .param("graph_name", graph_name);

        let record = self
            .fetch_single("gds.graph.exists", query, &["exists"])
            .await?;

        record
            .get("exists")
            .and_then(Value::as_bool)
            .ok_or_else(|| unreadable("exists", "expected a boolean"))
    }

    pub async fn drop_projection(&self, graph_name: &str) -> Result<()> {
        info!("Dropping in-memory graph '{}'", graph_name);

        let query = Query::new(
            "CALL gds.graph.drop($graph_name, false) YIELD graphName RETURN graphName"
                .to_string(),
        )
        .param("graph_name", graph_name);

        self.graph
            .run(query)
            .await
            .with_context(|| format!("Failed to drop graph '{graph_name}'"))?;

        Ok(())
    }

    pub async fn project(
        &self,
        graph_name: &str,
        node_labels: &[&str],
        relationship_types: &[&str],
    ) -> Result<ProjectionSummary> {
        info!(
            "Projecting graph '{}' over {:?} / {:?}",
            graph_name, node_labels, relationship_types
        );

        let query = Query::new(
            "CALL gds.graph.project($graph_name, $node_labels, $relationships)
             YIELD graphName, nodeCount, relationshipCount
             RETURN graphName, nodeCount, relationshipCount"
                .to_string(),
        )
        .param("graph_name", graph_name)
        .param("node_labels", labels_param(node_labels))
        .param("relationships", relationship_projection(relationship_types));

        let record = self
            .fetch_single(
                "gds.graph.project",
                query,
                &["graphName", "nodeCount", "relationshipCount"],
            )
            .await?;

        Ok(ProjectionSummary {
            graph_name: string_field(&record, "graphName")?,
            node_count: int_field(&record, "nodeCount")?,
            relationship_count: int_field(&record, "relationshipCount")?,
        })
    }

    async fn write_algorithm(
        &self,
        procedure: &str,
        graph_name: &str,
        property: &str,
        columns: &[&str],
    ) -> Result<AlgorithmSummary> {
        debug!("Running {} on '{}' into '{}'", procedure, graph_name, property);

        let yielded = columns.join(", ");
        let query = Query::new(format!(
            "CALL {procedure}($graph_name, {{writeProperty: $property}})
             YIELD {yielded}
             RETURN {yielded}"
        ))
        .param("graph_name", graph_name)
        .param("property", property);

        let metadata = self.fetch_single(procedure, query, columns).await?;

        Ok(AlgorithmSummary {
            algorithm: procedure.to_string(),
            metadata,
        })
    }

    pub async fn query(&self, cypher: &str, columns: &[&str]) -> Result<QueryResult> {
        let rows = self
            .fetch_records(Query::new(cypher.to_string()), columns)
            .await
            .context("Failed to run Cypher query")?;

        Ok(QueryResult::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows,
        ))
    }
}

fn labels_param(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

/// `{TYPE: {orientation: 'NATURAL'}}` for each relationship type
fn relationship_projection(relationship_types: &[&str]) -> HashMap<String, BoltType> {
    relationship_types
        .iter()
        .map(|rel_type| {
            let mut spec: HashMap<String, BoltType> = HashMap::new();
            spec.insert("orientation".to_string(), "NATURAL".into());
            (rel_type.to_string(), spec.into())
        })
        .collect()
}

fn unreadable(column: &str, message: &str) -> anyhow::Error {
    StorageError::UnreadableColumn {
        column: column.to_string(),
        message: message.to_string(),
    }
    .into()
}

fn int_field(record: &Record, column: &str) -> Result<i64> {
    record
        .get(column)
        .and_then(Value::as_i64)
        .ok_or_else(|| unreadable(column, "expected an integer"))
}

fn string_field(record: &Record, column: &str) -> Result<String> {
    record
        .get(column)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| unreadable(column, "expected a string"))
}

#[async_trait]
impl GraphClientTrait for Neo4jGraphClient {
    async fn construct_graph(
        &self,
        graph_name: &str,
        tables: &GraphTables,
    ) -> customernexus_core::Result<ConstructSummary> {
        self.construct(graph_name, tables).await.map_err(into_core)
    }

    async fn export_graph(
        &self,
        graph_name: &str,
        database: &str,
    ) -> customernexus_core::Result<ExportSummary> {
        self.export(graph_name, database).await.map_err(into_core)
    }

    async fn estimate_projection(
        &self,
        node_labels: &[&str],
        relationship_types: &[&str],
    ) -> customernexus_core::Result<MemoryEstimate> {
        self.estimate(node_labels, relationship_types)
            .await
            .map_err(into_core)
    }

    async fn graph_exists(&self, graph_name: &str) -> customernexus_core::Result<bool> {
        self.exists(graph_name).await.map_err(into_core)
    }

    async fn drop_graph(&self, graph_name: &str) -> customernexus_core::Result<()> {
        self.drop_projection(graph_name).await.map_err(into_core)
    }

    async fn project_graph(
        &self,
        graph_name: &str,
        node_labels: &[&str],
        relationship_types: &[&str],
    ) -> customernexus_core::Result<ProjectionSummary> {
        self.project(graph_name, node_labels, relationship_types)
            .await
            .map_err(into_core)
    }

    async fn write_pagerank(
        &self,
        graph_name: &str,
        property: &str,
    ) -> customernexus_core::Result<AlgorithmSummary> {
        self.write_algorithm("gds.pageRank.write", graph_name, property, PAGERANK_COLUMNS)
            .await
            .map_err(into_core)
    }

    async fn write_louvain(
        &self,
        graph_name: &str,
        property: &str,
    ) -> customernexus_core::Result<AlgorithmSummary> {
        self.write_algorithm("gds.louvain.write", graph_name, property, LOUVAIN_COLUMNS)
            .await
            .map_err(into_core)
    }

    async fn run_cypher(
        &self,
        cypher: &str,
        columns: &[&str],
    ) -> customernexus_core::Result<QueryResult> {
        self.query(cypher, columns).await.map_err(into_core)
    }
}
