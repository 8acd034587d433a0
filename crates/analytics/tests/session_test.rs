//! Bootstrap and menu sessions against the mock graph client

use customernexus_analytics::{find_query, init_graph, run_menu, BootstrapOutcome};
use customernexus_core::{AnalyticsConfig, Error};
use customernexus_storage::neo4j::MockCall;
use customernexus_storage::{GraphClientTrait, MockGraphClient, QueryResult};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Cursor;

fn cypher_calls(mock: &MockGraphClient) -> Vec<String> {
    mock.calls()
        .into_iter()
        .filter_map(|call| match call {
            MockCall::Cypher(text) => Some(text),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_init_graph_projects_and_writes_scores() {
    let mock = MockGraphClient::new();
    let config = AnalyticsConfig::default();

    let outcome = init_graph(&mock, &config).await.unwrap();
    assert!(matches!(outcome, BootstrapOutcome::Projected { .. }));

    assert_eq!(
        mock.calls(),
        vec![
            MockCall::Estimate {
                node_labels: vec!["Account".to_string()],
                relationship_types: vec!["TRANSFER".to_string()],
            },
            MockCall::Exists("AccountGraph".to_string()),
            MockCall::Project {
                graph_name: "AccountGraph".to_string(),
                node_labels: vec!["Account".to_string()],
                relationship_types: vec!["TRANSFER".to_string()],
            },
            MockCall::PageRank {
                graph_name: "AccountGraph".to_string(),
                property: "pagerank".to_string(),
            },
            MockCall::Louvain {
                graph_name: "AccountGraph".to_string(),
                property: "communityId".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_init_graph_drops_existing_projection_without_rescoring() {
    let mock = MockGraphClient::new().with_graph("AccountGraph", 3, 2);
    let config = AnalyticsConfig::default();

    let outcome = init_graph(&mock, &config).await.unwrap();
    assert_eq!(outcome, BootstrapOutcome::DroppedExisting);

    let calls = mock.calls();
    assert_eq!(calls.last(), Some(&MockCall::Drop("AccountGraph".to_string())));
    assert!(!calls
        .iter()
        .any(|c| matches!(c, MockCall::PageRank { .. } | MockCall::Louvain { .. })));
    assert!(mock.graph_names().is_empty());
}

#[tokio::test]
async fn test_menu_runs_selected_queries_until_quit() {
    let mut row = serde_json::Map::new();
    row.insert("CIF".to_string(), json!(1001));
    row.insert("TotalExpenditure".to_string(), json!(42.0));
    let mock = MockGraphClient::new().with_query_result(
        "TotalExpenditure DESC",
        QueryResult::new(vec!["CIF".into(), "TotalExpenditure".into()], vec![row]),
    );

    let input = Cursor::new("1\n5\nQ\n9\n");
    let mut prompt = Vec::new();
    let executed = run_menu(&mock, &AnalyticsConfig::default(), input, &mut prompt)
        .await
        .unwrap();

    assert_eq!(executed, 2);
    let calls = cypher_calls(&mock);
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("SUM(p.purchaseAmount)"));
    assert!(calls[1].contains("ORDER BY a.pagerank DESC"));

    let shown = String::from_utf8(prompt).unwrap();
    assert_eq!(shown.matches("Enter the query number").count(), 3);
}

#[tokio::test]
async fn test_menu_reprompts_on_bad_input() {
    let mock = MockGraphClient::new();
    let input = Cursor::new("abc\n0\n12\n3\nq\n");

    let executed = run_menu(&mock, &AnalyticsConfig::default(), input, Vec::new())
        .await
        .unwrap();

    assert_eq!(executed, 1);
    let calls = cypher_calls(&mock);
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("'Facebook' IN labels(n)"));
}

#[tokio::test]
async fn test_menu_ends_at_end_of_input() {
    let mock = MockGraphClient::new();
    let executed = run_menu(&mock, &AnalyticsConfig::default(), Cursor::new("2\n"), Vec::new())
        .await
        .unwrap();
    assert_eq!(executed, 1);
}

#[tokio::test]
async fn test_failing_query_ends_the_session() {
    let mock = MockGraphClient::new().failing_on("apoc.nodes.cycles");
    let err = run_menu(
        &mock,
        &AnalyticsConfig::default(),
        Cursor::new("5\n1\n"),
        Vec::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Query(_)));
    assert_eq!(cypher_calls(&mock).len(), 1);
}

#[tokio::test]
async fn test_catalog_columns_are_requested() {
    let mock = MockGraphClient::new();
    let client: &dyn GraphClientTrait = &mock;
    let query = find_query(7).unwrap();

    let result = client
        .run_cypher(&query.render(&AnalyticsConfig::default()), query.columns)
        .await
        .unwrap();
    assert_eq!(result.columns.len(), 5);
    assert_eq!(result.columns[2], "DistanceKm");
}
