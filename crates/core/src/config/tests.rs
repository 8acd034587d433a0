//! Tests for configuration module

use super::*;
use crate::error::{Error, Result};
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

fn with_env_var<F, T>(key: &str, value: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    std::env::set_var(key, value);
    let result = f();
    std::env::remove_var(key);
    result
}

fn valid_config() -> Config {
    let mut config = Config::default();
    config.neo4j.uri = "localhost:7687".to_string();
    config.neo4j.username = "neo4j".to_string();
    config.neo4j.password = "secret".to_string();
    config
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [neo4j]
        uri = "db.internal:7687"
        username = "analyst"
        password = "hunter2"

        [load]
        data_dir = "/srv/fincrime"

        [geocoding]
        timeout_secs = 30
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert_eq!(config.neo4j.uri, "db.internal:7687");
    assert_eq!(config.neo4j.username, "analyst");
    assert_eq!(config.load.data_dir, "/srv/fincrime");
    assert_eq!(config.geocoding.timeout_secs, 30);
}

#[test]
fn test_from_toml_str_empty_applies_defaults() {
    let config = Config::from_toml_str("").expect("Failed to parse empty TOML");

    assert_eq!(config.neo4j.database, "customernexus360");
    assert_eq!(config.load.data_dir, "../data");
    assert_eq!(config.load.graph_name, "customer-load-graph");
    assert_eq!(config.load.database, "neo4j");
    assert_eq!(config.load.export_database, "customernexus360");
    assert_eq!(config.geocoding.user_agent, "geolocator");
    assert_eq!(config.geocoding.timeout_secs, 10);
    assert_eq!(config.analytics.catalog_name, "AccountGraph");
    assert_eq!(config.analytics.pagerank_property, "pagerank");
    assert_eq!(config.analytics.community_property, "communityId");
}

#[test]
fn test_from_toml_str_invalid_syntax() {
    let toml = r#"
        [neo4j
        uri = "localhost"
    "#;

    let result = Config::from_toml_str(toml);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_from_file_reads_sections() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [load]
        graph_name = "nightly-load"

        [analytics]
        catalog_name = "TransfersOnly"
    "#,
    )?;

    let config = Config::from_file(file.path())?;
    assert_eq!(config.load.graph_name, "nightly-load");
    assert_eq!(config.analytics.catalog_name, "TransfersOnly");
    // Untouched sections keep their defaults
    assert_eq!(config.analytics.pagerank_property, "pagerank");
    Ok(())
}

#[test]
fn test_from_file_missing_file_uses_defaults() -> Result<()> {
    let config = Config::from_file(std::path::Path::new("/nonexistent/customernexus.toml"))?;
    assert_eq!(config.load.export_database, "customernexus360");
    Ok(())
}

#[test]
fn test_prefixed_env_var_overrides_file() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [geocoding]
        user_agent = "from-file"
    "#,
    )?;

    let config = with_env_var("CUSTOMERNEXUS_GEOCODING__USER_AGENT", "from-env", || {
        Config::from_file(file.path())
    })?;
    assert_eq!(config.geocoding.user_agent, "from-env");
    Ok(())
}

#[test]
fn test_prefixed_env_var_reaches_nested_neo4j_key() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [neo4j]
        database = "from-file"
    "#,
    )?;

    let config = with_env_var("CUSTOMERNEXUS_NEO4J__DATABASE", "fraud", || {
        Config::from_file(file.path())
    })?;
    assert_eq!(config.neo4j.database, "fraud");
    Ok(())
}

#[test]
fn test_legacy_neo4j_vars_win_over_file_and_prefixed_vars() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [neo4j]
        uri = "file-host:7687"
        username = "file-user"
        password = "file-pass"
    "#,
    )?;

    let config = with_env_var("CUSTOMERNEXUS_NEO4J__URI", "prefixed-host:7687", || {
        with_env_var("NEO4J_URI", "legacy-host:7687", || {
            with_env_var("NEO4J_USERNAME", "legacy-user", || {
                with_env_var("NEO4J_PASSWORD", "legacy-pass", || {
                    Config::from_file(file.path())
                })
            })
        })
    })?;

    assert_eq!(config.neo4j.uri, "legacy-host:7687");
    assert_eq!(config.neo4j.username, "legacy-user");
    assert_eq!(config.neo4j.password, "legacy-pass");
    assert_eq!(config.neo4j.bolt_uri(), "bolt://legacy-host:7687");
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_validate_accepts_complete_config() {
    assert!(valid_config().validate().is_ok());
}

#[test]
fn test_validate_rejects_missing_credentials() {
    let mut config = valid_config();
    config.neo4j.password.clear();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("neo4j.password"));

    let mut config = valid_config();
    config.neo4j.uri = "   ".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("neo4j.uri"));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = valid_config();
    config.geocoding.timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_non_identifier_property() {
    let mut config = valid_config();
    config.analytics.pagerank_property = "rank', x: 1".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("analytics.pagerank_property"));
}

#[test]
fn test_bolt_uri_adds_scheme_only_when_missing() {
    let mut neo4j = Neo4jConfig {
        uri: "localhost:7687".to_string(),
        ..Neo4jConfig::default()
    };
    assert_eq!(neo4j.bolt_uri(), "bolt://localhost:7687");

    neo4j.uri = "neo4j+s://abc.databases.neo4j.io".to_string();
    assert_eq!(neo4j.bolt_uri(), "neo4j+s://abc.databases.neo4j.io");
}

#[test]
fn test_debug_redacts_password() {
    let config = valid_config();
    let debug = format!("{:?}", config.neo4j);
    assert!(!debug.contains("secret"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn test_save_round_trips_through_toml() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    let mut config = valid_config();
    config.load.data_dir = "/tmp/loads".to_string();
    config.save(&path)?;

    let content = std::fs::read_to_string(&path)?;
    let reloaded = Config::from_toml_str(&content)?;
    assert_eq!(reloaded.load.data_dir, "/tmp/loads");
    assert_eq!(reloaded.neo4j.username, "neo4j");
    Ok(())
}
