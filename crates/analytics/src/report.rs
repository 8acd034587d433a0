//! Logging of query results

use customernexus_storage::QueryResult;
use tracing::info;

use crate::catalog::AnalyticsQuery;

/// The name, description and JSON records of one query run
pub fn render_report(query: &AnalyticsQuery, result: &QueryResult) -> String {
    format!(
        "[{}]\nDescription -> {}\nResults -> \n{}",
        query.name,
        query.description,
        result.to_json_records()
    )
}

pub fn log_query_result(query: &AnalyticsQuery, result: &QueryResult) {
    info!("{}\n\n", render_report(query, result));
}
