//! Configuration module for customernexus
//!
//! Configuration can be loaded from TOML files and/or environment variables.
//! The Neo4j connection settings additionally honour the bare `NEO4J_URI`,
//! `NEO4J_USERNAME` and `NEO4J_PASSWORD` variables.

mod defaults;
mod loading;
mod neo4j;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.customernexus/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".customernexus").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Graph database connection
    #[serde(default)]
    pub neo4j: Neo4jConfig,

    /// CSV load settings
    #[serde(default)]
    pub load: LoadConfig,

    /// Address lookup settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Graph analytics settings
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Connection settings for the Neo4j server
#[derive(Clone, Serialize, Deserialize)]
pub struct Neo4jConfig {
    /// Server address, either `host:port` or a full `bolt://` / `neo4j://` URI
    #[serde(default)]
    pub uri: String,

    /// Username
    #[serde(default)]
    pub username: String,

    /// Password
    #[serde(default)]
    pub password: String,

    /// Database the analytical queries run against
    #[serde(default = "default_neo4j_database")]
    pub database: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            username: String::new(),
            password: String::new(),
            database: default_neo4j_database(),
        }
    }
}

impl std::fmt::Debug for Neo4jConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"***REDACTED***")
            .field("database", &self.database)
            .finish()
    }
}

/// Settings for the CSV to graph load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Directory holding `customers.csv`, `transfers.csv` and `purchases.csv`
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Name of the in-memory graph built by the bulk construct
    #[serde(default = "default_load_graph_name")]
    pub graph_name: String,

    /// Database the construct session runs against
    #[serde(default = "default_load_database")]
    pub database: String,

    /// Database the constructed graph is exported to
    #[serde(default = "default_neo4j_database")]
    pub export_database: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            graph_name: default_load_graph_name(),
            database: default_load_database(),
            export_database: default_neo4j_database(),
        }
    }
}

/// Settings for the address lookup service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of a Nominatim-compatible search API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// User agent sent with every lookup
    #[serde(default = "default_geocoding_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            user_agent: default_geocoding_user_agent(),
            timeout_secs: default_geocoding_timeout_secs(),
        }
    }
}

/// Settings for the account graph projection and the algorithms run over it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Name of the in-memory projection
    #[serde(default = "default_catalog_name")]
    pub catalog_name: String,

    /// Node property PageRank scores are written to
    #[serde(default = "default_pagerank_property")]
    pub pagerank_property: String,

    /// Node property Louvain community ids are written to
    #[serde(default = "default_community_property")]
    pub community_property: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            catalog_name: default_catalog_name(),
            pagerank_property: default_pagerank_property(),
            community_property: default_community_property(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.neo4j.uri.trim().is_empty() {
            return Err(Error::config(
                "neo4j.uri is not set (NEO4J_URI or CUSTOMERNEXUS_NEO4J__URI)".to_string(),
            ));
        }
        if self.neo4j.username.trim().is_empty() {
            return Err(Error::config(
                "neo4j.username is not set (NEO4J_USERNAME or CUSTOMERNEXUS_NEO4J__USERNAME)"
                    .to_string(),
            ));
        }
        if self.neo4j.password.is_empty() {
            return Err(Error::config(
                "neo4j.password is not set (NEO4J_PASSWORD or CUSTOMERNEXUS_NEO4J__PASSWORD)"
                    .to_string(),
            ));
        }

        if self.geocoding.timeout_secs == 0 {
            return Err(Error::config(
                "geocoding.timeout_secs must be greater than 0".to_string(),
            ));
        }

        for (key, value) in [
            ("analytics.pagerank_property", &self.analytics.pagerank_property),
            ("analytics.community_property", &self.analytics.community_property),
        ] {
            if !is_valid_identifier(value) {
                return Err(Error::config(format!(
                    "{key} must be a plain identifier (letters, digits, underscore), got '{value}'"
                )));
            }
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, toml_string)
            .map_err(|e| Error::config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}

/// Property names are spliced into GDS calls, so they are restricted to identifiers
fn is_valid_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
