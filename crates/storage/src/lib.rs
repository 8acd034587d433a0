#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Graph engine access for the customer graph
//!
//! The [`GraphClientTrait`] covers everything the loader and the analytics
//! menu ask of Neo4j and its Graph Data Science plugin: the bulk construct,
//! export, in-memory projections, algorithm writes and plain Cypher.

pub mod error;
pub mod neo4j;

pub use error::StorageError;
pub use neo4j::{
    AlgorithmSummary, ConstructSummary, ExportSummary, GraphClientTrait, MemoryEstimate,
    MockGraphClient, Neo4jGraphClient, ProjectionSummary, QueryResult,
};
