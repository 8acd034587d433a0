//! CSV staging for the customer graph
//!
//! Turns the customer, transfer and purchase CSV files into the node and
//! relationship tables submitted to the graph engine in one bulk construct.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod allocator;
pub mod builder;
pub mod encode;
pub mod entities;
pub mod geocode;
pub mod ingest;
pub mod pipeline;

pub use allocator::NodeIdAllocator;
pub use builder::{build_graph_tables, PLACEHOLDER_MERCHANT_LABEL};
pub use encode::LabelEncoder;
pub use entities::{Customer, Purchase, StagedData, Transfer};
pub use geocode::{Coordinates, Geocoder, MockGeocoder, NominatimGeocoder};
pub use ingest::{InputFiles, RawData};
pub use pipeline::{prepare_graph_tables, stage_inputs, stage_raw};
