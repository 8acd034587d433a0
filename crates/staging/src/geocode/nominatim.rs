//! Nominatim (OpenStreetMap) search API client

use async_trait::async_trait;
use customernexus_core::{Error, GeocodingConfig, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{Coordinates, Geocoder};

/// One search hit; Nominatim returns coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Geocoder backed by a Nominatim-compatible `/search` endpoint
pub struct NominatimGeocoder {
    client: Client,
    search_url: String,
}

impl NominatimGeocoder {
    /// Create a new geocoder from configuration
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        info!("Initializing Nominatim geocoder");
        info!("  Base URL: {}", config.base_url);
        info!("  Timeout: {}s", config.timeout_secs);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::geocoding(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            search_url: format!("{}/search", config.base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        debug!("Geocoding '{query}'");

        let response = self
            .client
            .get(&self.search_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| Error::geocoding(format!("Lookup request for '{query}' failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(Error::geocoding(format!(
                "Lookup for '{query}' returned error {status}: {error_text}"
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            Error::geocoding(format!("Failed to parse lookup response for '{query}': {e}"))
        })?;

        places.first().map(parse_place).transpose()
    }
}

fn parse_place(place: &NominatimPlace) -> Result<Coordinates> {
    let latitude = place
        .lat
        .parse::<f64>()
        .map_err(|e| Error::parse("lat", &place.lat, e.to_string()))?;
    let longitude = place
        .lon
        .parse::<f64>()
        .map_err(|e| Error::parse("lon", &place.lon, e.to_string()))?;
    Ok(Coordinates::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"[{"place_id": 1, "lat": "1.2840", "lon": "103.8510", "display_name": "Raffles Place"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        let coordinates = parse_place(&places[0]).unwrap();
        assert_eq!(coordinates, Coordinates::new(1.284, 103.851));
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let place = NominatimPlace {
            lat: "north".to_string(),
            lon: "0".to_string(),
        };
        assert!(parse_place(&place).is_err());
    }

    #[test]
    fn test_search_url_ignores_trailing_slash() {
        let config = GeocodingConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..GeocodingConfig::default()
        };
        let geocoder = NominatimGeocoder::new(&config).unwrap();
        assert_eq!(geocoder.search_url, "http://localhost:8080/search");
    }
}
