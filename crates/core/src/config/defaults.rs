//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_NEO4J_DATABASE: &str = "customernexus360";
pub(crate) const DEFAULT_LOAD_DATABASE: &str = "neo4j";
pub(crate) const DEFAULT_DATA_DIR: &str = "../data";
pub(crate) const DEFAULT_LOAD_GRAPH_NAME: &str = "customer-load-graph";
pub(crate) const DEFAULT_GEOCODING_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub(crate) const DEFAULT_GEOCODING_USER_AGENT: &str = "geolocator";
pub(crate) const DEFAULT_CATALOG_NAME: &str = "AccountGraph";
pub(crate) const DEFAULT_PAGERANK_PROPERTY: &str = "pagerank";
pub(crate) const DEFAULT_COMMUNITY_PROPERTY: &str = "communityId";

pub(crate) fn default_neo4j_database() -> String {
    DEFAULT_NEO4J_DATABASE.to_string()
}

pub(crate) fn default_load_database() -> String {
    DEFAULT_LOAD_DATABASE.to_string()
}

pub(crate) fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

pub(crate) fn default_load_graph_name() -> String {
    DEFAULT_LOAD_GRAPH_NAME.to_string()
}

pub(crate) fn default_geocoding_base_url() -> String {
    DEFAULT_GEOCODING_BASE_URL.to_string()
}

pub(crate) fn default_geocoding_user_agent() -> String {
    DEFAULT_GEOCODING_USER_AGENT.to_string()
}

pub(crate) fn default_geocoding_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_catalog_name() -> String {
    DEFAULT_CATALOG_NAME.to_string()
}

pub(crate) fn default_pagerank_property() -> String {
    DEFAULT_PAGERANK_PROPERTY.to_string()
}

pub(crate) fn default_community_property() -> String {
    DEFAULT_COMMUNITY_PROPERTY.to_string()
}
