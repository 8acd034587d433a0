//! Row encoding for the bulk graph construct
//!
//! The construct is a single Cypher aggregation over an `UNWIND` parameter
//! list. Every node is sent once on its own row so isolated nodes survive,
//! and every relationship row repeats the labels and properties of both
//! endpoints so the aggregation sees one consistent definition per node.

use anyhow::{anyhow, Result};
use customernexus_core::{GraphTables, NodeRow, PropertyValue, RelationshipRow, RelationshipType};
use neo4rs::{BoltNull, BoltType};
use std::collections::{BTreeMap, HashMap};

pub(crate) const CONSTRUCT_QUERY: &str = "UNWIND $rows AS row
 WITH gds.graph.project(
     $graph_name,
     row.source,
     row.target,
     {
         sourceNodeLabels: row.sourceLabels,
         sourceNodeProperties: row.sourceProperties,
         targetNodeLabels: row.targetLabels,
         targetNodeProperties: row.targetProperties
     },
     {
         relationshipType: row.relationshipType,
         properties: row.relationshipProperties
     }
 ) AS g
 RETURN g.graphName AS graphName, g.nodeCount AS nodeCount, g.relationshipCount AS relationshipCount";

/// One aggregation input row
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConstructRow<'a> {
    pub source: &'a NodeRow,
    pub target: Option<&'a NodeRow>,
    pub relationship: Option<(RelationshipType, &'a RelationshipRow)>,
}

/// Flatten the tables into aggregation rows: all nodes first, then all relationships
pub(crate) fn construct_rows(tables: &GraphTables) -> Result<Vec<ConstructRow<'_>>> {
    let by_id: HashMap<i64, &NodeRow> = tables.node_rows().map(|n| (n.node_id, n)).collect();

    let mut rows: Vec<ConstructRow<'_>> = tables
        .node_rows()
        .map(|source| ConstructRow {
            source,
            target: None,
            relationship: None,
        })
        .collect();

    for table in &tables.relationships {
        for rel in &table.rows {
            let endpoint = |id: i64| {
                by_id.get(&id).copied().ok_or_else(|| {
                    anyhow!(
                        "{} relationship {} -> {} references unknown node id {id}",
                        table.relationship_type,
                        rel.source,
                        rel.target
                    )
                })
            };
            rows.push(ConstructRow {
                source: endpoint(rel.source)?,
                target: Some(endpoint(rel.target)?),
                relationship: Some((table.relationship_type, rel)),
            });
        }
    }

    Ok(rows)
}

fn property_value(value: &PropertyValue) -> BoltType {
    match value {
        PropertyValue::Integer(v) => (*v).into(),
        PropertyValue::Float(v) => (*v).into(),
    }
}

fn property_map(properties: &BTreeMap<String, PropertyValue>) -> BoltType {
    let map: HashMap<String, BoltType> = properties
        .iter()
        .map(|(key, value)| (key.clone(), property_value(value)))
        .collect();
    map.into()
}

fn null() -> BoltType {
    BoltType::Null(BoltNull)
}

impl ConstructRow<'_> {
    pub(crate) fn to_bolt(&self) -> HashMap<String, BoltType> {
        let mut map = HashMap::new();
        map.insert("source".to_string(), self.source.node_id.into());
        map.insert("sourceLabels".to_string(), self.source.labels.clone().into());
        map.insert(
            "sourceProperties".to_string(),
            property_map(&self.source.properties),
        );

        match self.target {
            Some(target) => {
                map.insert("target".to_string(), target.node_id.into());
                map.insert("targetLabels".to_string(), target.labels.clone().into());
                map.insert("targetProperties".to_string(), property_map(&target.properties));
            }
            None => {
                map.insert("target".to_string(), null());
                map.insert("targetLabels".to_string(), null());
                map.insert("targetProperties".to_string(), null());
            }
        }

        match self.relationship {
            Some((relationship_type, rel)) => {
                map.insert(
                    "relationshipType".to_string(),
                    relationship_type.as_str().into(),
                );
                map.insert(
                    "relationshipProperties".to_string(),
                    property_map(&rel.properties),
                );
            }
            None => {
                map.insert("relationshipType".to_string(), null());
                map.insert("relationshipProperties".to_string(), null());
            }
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use customernexus_core::{NodeTable, RelationshipTable};

    fn tables() -> GraphTables {
        let mut accounts = NodeTable::new("account");
        accounts
            .rows
            .push(NodeRow::new(1, "Account").with_property("AccountNumber", 111_i64));
        accounts
            .rows
            .push(NodeRow::new(2, "Account").with_property("AccountNumber", 222_i64));
        accounts
            .rows
            .push(NodeRow::new(3, "Account").with_property("AccountNumber", 333_i64));

        let mut transfers = RelationshipTable::new(RelationshipType::Transfer);
        transfers.rows.push(
            RelationshipRow::new(1, 2)
                .with_property("transactionId", 9_i64)
                .with_property("transactionAmount", 100.0),
        );

        GraphTables {
            nodes: vec![accounts],
            relationships: vec![transfers],
        }
    }

    #[test]
    fn test_every_node_and_relationship_becomes_a_row() {
        let tables = tables();
        let rows = construct_rows(&tables).unwrap();

        assert_eq!(rows.len(), 4);
        assert!(rows[..3].iter().all(|r| r.target.is_none()));

        let rel_row = &rows[3];
        assert_eq!(rel_row.source.node_id, 1);
        assert_eq!(rel_row.target.map(|t| t.node_id), Some(2));
        assert_eq!(
            rel_row.relationship.map(|(t, _)| t),
            Some(RelationshipType::Transfer)
        );
    }

    #[test]
    fn test_unknown_endpoint_is_rejected() {
        let mut tables = tables();
        tables.relationships[0].rows.push(RelationshipRow::new(3, 42));

        let err = construct_rows(&tables).unwrap_err();
        assert!(err.to_string().contains("unknown node id 42"));
    }

    #[test]
    fn test_node_only_row_has_null_target() {
        let tables = tables();
        let rows = construct_rows(&tables).unwrap();
        let bolt = rows[0].to_bolt();

        assert!(matches!(bolt.get("target"), Some(BoltType::Null(_))));
        assert!(matches!(bolt.get("relationshipType"), Some(BoltType::Null(_))));
        assert!(matches!(bolt.get("source"), Some(BoltType::Integer(_))));
        assert!(matches!(bolt.get("sourceLabels"), Some(BoltType::List(_))));
    }

    #[test]
    fn test_relationship_row_carries_both_endpoints() {
        let tables = tables();
        let rows = construct_rows(&tables).unwrap();
        let bolt = rows[3].to_bolt();

        assert!(matches!(bolt.get("target"), Some(BoltType::Integer(_))));
        assert!(matches!(bolt.get("targetProperties"), Some(BoltType::Map(_))));
        assert!(matches!(bolt.get("relationshipType"), Some(BoltType::String(_))));
        assert!(matches!(
            bolt.get("relationshipProperties"),
            Some(BoltType::Map(_))
        ));
    }
}
