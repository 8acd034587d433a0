//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::{global_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

/// Helper to override a key from a bare environment variable, if set
fn override_from_env(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    var: &str,
    key: &str,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    match std::env::var(var) {
        Ok(value) => builder
            .set_override(key, value)
            .map_err(|e| Error::config(format!("Failed to set {var}: {e}"))),
        Err(_) => Ok(builder),
    }
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `CUSTOMERNEXUS_` and use double underscores
    /// for nested values. For example:
    /// - `CUSTOMERNEXUS_LOAD__DATA_DIR=/srv/data`
    ///
    /// The bare `NEO4J_URI`, `NEO4J_USERNAME` and `NEO4J_PASSWORD` variables win over
    /// everything else.
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // config crate doesn't apply serde defaults for missing sections
        let builder = set_config_default(builder, "neo4j.uri", "")?;
        let builder = set_config_default(builder, "neo4j.username", "")?;
        let builder = set_config_default(builder, "neo4j.password", "")?;
        let builder = set_config_default(builder, "neo4j.database", default_neo4j_database())?;
        let builder = set_config_default(builder, "load.data_dir", default_data_dir())?;
        let builder = set_config_default(builder, "load.graph_name", default_load_graph_name())?;
        let builder = set_config_default(builder, "load.database", default_load_database())?;
        let builder =
            set_config_default(builder, "load.export_database", default_neo4j_database())?;
        let builder =
            set_config_default(builder, "geocoding.base_url", default_geocoding_base_url())?;
        let builder =
            set_config_default(builder, "geocoding.user_agent", default_geocoding_user_agent())?;
        let builder = set_config_default(
            builder,
            "geocoding.timeout_secs",
            default_geocoding_timeout_secs() as i64,
        )?;
        let builder =
            set_config_default(builder, "analytics.catalog_name", default_catalog_name())?;
        let builder = set_config_default(
            builder,
            "analytics.pagerank_property",
            default_pagerank_property(),
        )?;
        let mut builder = set_config_default(
            builder,
            "analytics.community_property",
            default_community_property(),
        )?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with CUSTOMERNEXUS_ prefix
        builder = builder.add_source(
            Environment::with_prefix("CUSTOMERNEXUS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Neo4j connection variables
        let builder = override_from_env(builder, "NEO4J_URI", "neo4j.uri")?;
        let builder = override_from_env(builder, "NEO4J_USERNAME", "neo4j.username")?;
        let builder = override_from_env(builder, "NEO4J_PASSWORD", "neo4j.password")?;

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.customernexus/config.toml or custom --config path)
    /// 3. Environment variables (CUSTOMERNEXUS_*)
    /// 4. NEO4J_URI / NEO4J_USERNAME / NEO4J_PASSWORD
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
