//! Core types for the customernexus fraud-analytics loader
//!
//! This crate provides the foundations shared by the staging, storage and
//! analytics crates:
//!
//! - **Records**: row types for the customer, transfer and purchase CSV files
//! - **Graph tables**: node and relationship tables for the bulk construct
//! - **Normalization**: identifier, merchant and datetime reshaping
//! - **Configuration**: layered configuration (file, environment)
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod error;
pub mod graph;
pub mod normalize;
pub mod records;

// Re-export main types for convenience
pub use config::{AnalyticsConfig, Config, GeocodingConfig, LoadConfig, Neo4jConfig};
pub use error::{Error, Result, ResultExt};
pub use graph::{
    GraphTables, NodeRow, NodeTable, PropertyValue, RelationshipRow, RelationshipTable,
    RelationshipType,
};
pub use records::{CustomerRecord, PurchaseRecord, TransferRecord};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, ResultExt};
}
