//! Neo4j connection helpers

use super::Neo4jConfig;

const URI_SCHEMES: &[&str] = &["bolt://", "bolt+s://", "bolt+ssc://", "neo4j://", "neo4j+s://", "neo4j+ssc://"];

impl Neo4jConfig {
    /// Connection URI with a `bolt://` scheme prepended when none is given
    ///
    /// `NEO4J_URI` is conventionally a bare `host:port`, so
    /// `localhost:7687` becomes `bolt://localhost:7687` while an explicit
    /// `neo4j+s://...` is kept as is.
    pub fn bolt_uri(&self) -> String {
        let uri = self.uri.trim();
        if URI_SCHEMES.iter().any(|scheme| uri.starts_with(scheme)) {
            uri.to_string()
        } else {
            format!("bolt://{uri}")
        }
    }
}
