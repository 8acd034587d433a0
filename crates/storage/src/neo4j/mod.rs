//! Neo4j and Graph Data Science client

pub(crate) mod client;
pub(crate) mod construct;
pub(crate) mod mock;
pub(crate) mod traits;
pub(crate) mod types;

pub use client::Neo4jGraphClient;
pub use mock::{MockCall, MockGraphClient};
pub use traits::GraphClientTrait;
pub use types::{
    AlgorithmSummary, ConstructSummary, ExportSummary, MemoryEstimate, ProjectionSummary,
    QueryResult, Record,
};
