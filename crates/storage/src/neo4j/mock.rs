//! Mock graph client for testing

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use async_trait::async_trait;
use customernexus_core::{Error, GraphTables, Result};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::GraphClientTrait;
use super::types::{
    AlgorithmSummary, ConstructSummary, ExportSummary, MemoryEstimate, ProjectionSummary,
    QueryResult, Record,
};

/// A call received by [`MockGraphClient`], in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Construct {
        graph_name: String,
        node_count: usize,
        relationship_count: usize,
    },
    Export {
        graph_name: String,
        database: String,
    },
    Estimate {
        node_labels: Vec<String>,
        relationship_types: Vec<String>,
    },
    Exists(String),
    Drop(String),
    Project {
        graph_name: String,
        node_labels: Vec<String>,
        relationship_types: Vec<String>,
    },
    PageRank {
        graph_name: String,
        property: String,
    },
    Louvain {
        graph_name: String,
        property: String,
    },
    Cypher(String),
}

/// In-memory graph data
#[derive(Debug, Clone, Copy)]
struct InMemoryGraph {
    node_count: i64,
    relationship_count: i64,
}

#[derive(Debug, Default)]
struct MockData {
    calls: Vec<MockCall>,
    graphs: HashMap<String, InMemoryGraph>, // graph_name -> graph
    exported: HashMap<String, String>,      // database -> graph_name
    query_results: Vec<(String, QueryResult)>,
    failing_queries: Vec<String>,
}

/// Mock graph client for testing
#[derive(Clone)]
pub struct MockGraphClient {
    data: Arc<Mutex<MockData>>,
}

impl MockGraphClient {
    /// Create a new mock client
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData::default())),
        }
    }

    /// Start with a graph already present in the catalog
    pub fn with_graph(self, graph_name: &str, node_count: i64, relationship_count: i64) -> Self {
        self.data.lock().unwrap().graphs.insert(
            graph_name.to_string(),
            InMemoryGraph {
                node_count,
                relationship_count,
            },
        );
        self
    }

    /// Answer any Cypher statement containing `needle` with `result`
    pub fn with_query_result(self, needle: &str, result: QueryResult) -> Self {
        self.data
            .lock()
            .unwrap()
            .query_results
            .push((needle.to_string(), result));
        self
    }

    /// Fail any Cypher statement containing `needle`
    pub fn failing_on(self, needle: &str) -> Self {
        self.data
            .lock()
            .unwrap()
            .failing_queries
            .push(needle.to_string());
        self
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.data.lock().unwrap().calls.clone()
    }

    /// Names of the graphs currently in the catalog, sorted
    pub fn graph_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.data.lock().unwrap().graphs.keys().cloned().collect();
        names.sort();
        names
    }

    /// Graph exported into `database`, if any
    pub fn exported_graph(&self, database: &str) -> Option<String> {
        self.data.lock().unwrap().exported.get(database).cloned()
    }

    fn record(&self, call: MockCall) {
        self.data.lock().unwrap().calls.push(call);
    }
}

impl Default for MockGraphClient {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[async_trait]
impl GraphClientTrait for MockGraphClient {
    async fn construct_graph(
        &self,
        graph_name: &str,
        tables: &GraphTables,
    ) -> Result<ConstructSummary> {
        self.record(MockCall::Construct {
            graph_name: graph_name.to_string(),
            node_count: tables.node_count(),
            relationship_count: tables.relationship_count(),
        });

        tables.validate()?;

        let mut data = self.data.lock().unwrap();
        if data.graphs.contains_key(graph_name) {
            return Err(Error::storage(format!(
                "A graph with name '{graph_name}' already exists"
            )));
        }

        let graph = InMemoryGraph {
            node_count: tables.node_count() as i64,
            relationship_count: tables.relationship_count() as i64,
        };
        data.graphs.insert(graph_name.to_string(), graph);

        Ok(ConstructSummary {
            graph_name: graph_name.to_string(),
            node_count: graph.node_count,
            relationship_count: graph.relationship_count,
        })
    }

    async fn export_graph(&self, graph_name: &str, database: &str) -> Result<ExportSummary> {
        self.record(MockCall::Export {
            graph_name: graph_name.to_string(),
            database: database.to_string(),
        });

        let mut data = self.data.lock().unwrap();
        let graph = *data
            .graphs
            .get(graph_name)
            .ok_or_else(|| Error::storage(format!("Graph '{graph_name}' does not exist")))?;
        if data.exported.contains_key(database) {
            return Err(Error::storage(format!(
                "Database '{database}' already exists"
            )));
        }
        data.exported
            .insert(database.to_string(), graph_name.to_string());

        Ok(ExportSummary {
            database: database.to_string(),
            graph_name: graph_name.to_string(),
            node_count: graph.node_count,
            relationship_count: graph.relationship_count,
        })
    }

    async fn estimate_projection(
        &self,
        node_labels: &[&str],
        relationship_types: &[&str],
    ) -> Result<MemoryEstimate> {
        self.record(MockCall::Estimate {
            node_labels: owned(node_labels),
            relationship_types: owned(relationship_types),
        });

        Ok(MemoryEstimate {
            required_memory: "[1208 KiB ... 1336 KiB]".to_string(),
            node_count: 0,
            relationship_count: 0,
        })
    }

    async fn graph_exists(&self, graph_name: &str) -> Result<bool> {
        self.record(MockCall::Exists(graph_name.to_string()));
        Ok(self.data.lock().unwrap().graphs.contains_key(graph_name))
    }

    async fn drop_graph(&self, graph_name: &str) -> Result<()> {
        self.record(MockCall::Drop(graph_name.to_string()));
        self.data.lock().unwrap().graphs.remove(graph_name);
        Ok(())
    }

    async fn project_graph(
        &self,
        graph_name: &str,
        node_labels: &[&str],
        relationship_types: &[&str],
    ) -> Result<ProjectionSummary> {
        self.record(MockCall::Project {
            graph_name: graph_name.to_string(),
            node_labels: owned(node_labels),
            relationship_types: owned(relationship_types),
        });

        let mut data = self.data.lock().unwrap();
        if data.graphs.contains_key(graph_name) {
            return Err(Error::storage(format!(
                "A graph with name '{graph_name}' already exists"
            )));
        }
        data.graphs.insert(
            graph_name.to_string(),
            InMemoryGraph {
                node_count: 0,
                relationship_count: 0,
            },
        );

        Ok(ProjectionSummary {
            graph_name: graph_name.to_string(),
            node_count: 0,
            relationship_count: 0,
        })
    }

    async fn write_pagerank(&self, graph_name: &str, property: &str) -> Result<AlgorithmSummary> {
        self.record(MockCall::PageRank {
            graph_name: graph_name.to_string(),
            property: property.to_string(),
        });

        let mut metadata = Record::new();
        metadata.insert("nodePropertiesWritten".to_string(), json!(0));
        metadata.insert("ranIterations".to_string(), json!(20));
        metadata.insert("didConverge".to_string(), json!(false));

        Ok(AlgorithmSummary {
            algorithm: "gds.pageRank.write".to_string(),
            metadata,
        })
    }

    async fn write_louvain(&self, graph_name: &str, property: &str) -> Result<AlgorithmSummary> {
        self.record(MockCall::Louvain {
            graph_name: graph_name.to_string(),
            property: property.to_string(),
        });

        let mut metadata = Record::new();
        metadata.insert("communityCount".to_string(), json!(0));
        metadata.insert("modularity".to_string(), json!(0.0));
        metadata.insert("nodePropertiesWritten".to_string(), json!(0));

        Ok(AlgorithmSummary {
            algorithm: "gds.louvain.write".to_string(),
            metadata,
        })
    }

    async fn run_cypher(&self, cypher: &str, columns: &[&str]) -> Result<QueryResult> {
        self.record(MockCall::Cypher(cypher.to_string()));

        let data = self.data.lock().unwrap();
        if let Some(needle) = data.failing_queries.iter().find(|n| cypher.contains(n.as_str())) {
            return Err(Error::query(format!("Mock failure for query containing '{needle}'")));
        }

        Ok(data
            .query_results
            .iter()
            .find(|(needle, _)| cypher.contains(needle.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| QueryResult::new(owned(columns), Vec::new())))
    }
}
