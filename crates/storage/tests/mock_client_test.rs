//! The mock client behind the trait object, as the loader and menu use it

use customernexus_core::{GraphTables, NodeRow, NodeTable};
use customernexus_storage::neo4j::MockCall;
use customernexus_storage::{GraphClientTrait, MockGraphClient};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn tables() -> GraphTables {
    let mut table = NodeTable::new("merchant");
    table.rows.push(NodeRow::new(7, "Facebook"));
    table.rows.push(NodeRow::new(8, "Merchant"));
    GraphTables {
        nodes: vec![table],
        relationships: Vec::new(),
    }
}

#[tokio::test]
async fn test_calls_are_recorded_in_order() {
    let mock = MockGraphClient::new();
    let client: Arc<dyn GraphClientTrait> = Arc::new(mock.clone());

    client.construct_graph("g", &tables()).await.unwrap();
    client.export_graph("g", "customernexus360").await.unwrap();
    client.drop_graph("g").await.unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            MockCall::Construct {
                graph_name: "g".to_string(),
                node_count: 2,
                relationship_count: 0,
            },
            MockCall::Export {
                graph_name: "g".to_string(),
                database: "customernexus360".to_string(),
            },
            MockCall::Drop("g".to_string()),
        ]
    );
    assert!(mock.graph_names().is_empty());
}

#[tokio::test]
async fn test_construct_rejects_inconsistent_tables() {
    let mock = MockGraphClient::new();
    let mut bad = tables();
    bad.nodes[0].rows.push(NodeRow::new(7, "Duplicate"));

    let err = mock.construct_graph("g", &bad).await.unwrap_err();
    assert!(err.to_string().contains("Duplicate node id 7"));
    assert!(mock.graph_names().is_empty());
}

#[tokio::test]
async fn test_preexisting_graph_is_visible() {
    let mock = MockGraphClient::new().with_graph("AccountGraph", 10, 20);
    assert!(mock.graph_exists("AccountGraph").await.unwrap());
    assert!(!mock.graph_exists("Other").await.unwrap());
}
