//! Graph analytics over the loaded customer graph
//!
//! Prepares the account projection (PageRank and Louvain scores written back
//! to the accounts) and serves a numbered menu of fraud-oriented queries.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod bootstrap;
pub mod catalog;
pub mod menu;
pub mod report;

pub use bootstrap::{init_graph, BootstrapOutcome};
pub use catalog::{find_query, AnalyticsQuery, QUERY_CATALOG};
pub use menu::{parse_selection, run_menu, MenuSelection};
pub use report::{log_query_result, render_report};
