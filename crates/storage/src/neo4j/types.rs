//! Result types returned by graph engine calls

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One result row, keyed by column name in column order
pub type Record = Map<String, Value>;

/// Outcome of a bulk graph construct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructSummary {
    pub graph_name: String,
    pub node_count: i64,
    pub relationship_count: i64,
}

/// Outcome of exporting an in-memory graph to a database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub database: String,
    pub graph_name: String,
    pub node_count: i64,
    pub relationship_count: i64,
}

/// Memory estimate for a native projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEstimate {
    /// Human readable range, e.g. `"[1208 KiB ... 1336 KiB]"`
    pub required_memory: String,
    pub node_count: i64,
    pub relationship_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub graph_name: String,
    pub node_count: i64,
    pub relationship_count: i64,
}

/// Metadata yielded by an algorithm in write mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmSummary {
    pub algorithm: String,
    pub metadata: Record,
}

/// Rows returned by an arbitrary Cypher statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Record>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Render the rows as a compact JSON array of records
    pub fn to_json_records(&self) -> String {
        Value::Array(self.rows.iter().cloned().map(Value::Object).collect()).to_string()
    }
}
