//! Library interface for the customernexus CLI
//!
//! The two workflows live here so integration tests can drive them with the
//! mock graph client and the mock geocoder; main.rs only wires up real
//! connections.

pub mod env_file;
pub mod load;
pub mod query;

pub use anyhow::Result;
pub use customernexus_core::Config;
pub use env_file::{load_dotenv, load_dotenv_from};
pub use load::{run_load, stage_load_tables, write_load_graph, LoadSummary};
pub use query::run_query_session;
