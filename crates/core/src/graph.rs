//! Node and relationship tables handed to the bulk graph construct
//!
//! Every node carries a synthetic integer id. Relationship rows refer to
//! those ids, never to database-internal ids.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Numeric property value (the in-memory graph only stores numbers)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Integer(i64),
    Float(f64),
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Relationship types written to the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationshipType {
    HasAccount,
    Transfer,
    HasCard,
    HasType,
    Purchase,
    HasMerchant,
    HasCardIssuer,
}

impl RelationshipType {
    /// All relationship types, in table order
    pub const ALL: [RelationshipType; 7] = [
        RelationshipType::HasAccount,
        RelationshipType::Transfer,
        RelationshipType::HasCard,
        RelationshipType::HasType,
        RelationshipType::Purchase,
        RelationshipType::HasMerchant,
        RelationshipType::HasCardIssuer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HasAccount => "HAS_ACCOUNT",
            Self::Transfer => "TRANSFER",
            Self::HasCard => "HAS_CARD",
            Self::HasType => "HAS_TYPE",
            Self::Purchase => "PURCHASE",
            Self::HasMerchant => "HAS_MERCHANT",
            Self::HasCardIssuer => "HAS_CARD_ISSUER",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single node: id, labels and numeric properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    pub node_id: i64,
    pub labels: Vec<String>,
    pub properties: BTreeMap<String, PropertyValue>,
}

impl NodeRow {
    pub fn new(node_id: i64, label: impl Into<String>) -> Self {
        Self {
            node_id,
            labels: vec![label.into()],
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// A single relationship between two synthetic node ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRow {
    pub source: i64,
    pub target: i64,
    pub properties: BTreeMap<String, PropertyValue>,
}

impl RelationshipRow {
    pub fn new(source: i64, target: i64) -> Self {
        Self {
            source,
            target,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// Nodes of one kind (customers, accounts, merchants, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeTable {
    pub name: String,
    pub rows: Vec<NodeRow>,
}

impl NodeTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }
}

/// Relationships of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipTable {
    pub relationship_type: RelationshipType,
    pub rows: Vec<RelationshipRow>,
}

impl RelationshipTable {
    pub fn new(relationship_type: RelationshipType) -> Self {
        Self {
            relationship_type,
            rows: Vec::new(),
        }
    }
}

/// Everything submitted in one bulk construct call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphTables {
    pub nodes: Vec<NodeTable>,
    pub relationships: Vec<RelationshipTable>,
}

impl GraphTables {
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(|t| t.rows.len()).sum()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.iter().map(|t| t.rows.len()).sum()
    }

    /// Iterate over every node across all tables
    pub fn node_rows(&self) -> impl Iterator<Item = &NodeRow> {
        self.nodes.iter().flat_map(|t| t.rows.iter())
    }

    /// Look up the relationship table of a given type
    pub fn relationship_table(&self, relationship_type: RelationshipType) -> Option<&RelationshipTable> {
        self.relationships
            .iter()
            .find(|t| t.relationship_type == relationship_type)
    }

    /// Check that node ids are unique and every relationship endpoint exists
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.node_count());
        for table in &self.nodes {
            for row in &table.rows {
                if !seen.insert(row.node_id) {
                    return Err(Error::staging(format!(
                        "Duplicate node id {} in table '{}'",
                        row.node_id, table.name
                    )));
                }
                if row.labels.is_empty() {
                    return Err(Error::staging(format!(
                        "Node {} in table '{}' has no labels",
                        row.node_id, table.name
                    )));
                }
            }
        }

        for table in &self.relationships {
            for row in &table.rows {
                for endpoint in [row.source, row.target] {
                    if !seen.contains(&endpoint) {
                        return Err(Error::staging(format!(
                            "{} relationship {} -> {} references unknown node id {endpoint}",
                            table.relationship_type, row.source, row.target
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
