//! Table-driven geocoder for tests

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use customernexus_core::Result;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{Coordinates, Geocoder};

/// Answers from a fixed table and records every query it receives
#[derive(Debug, Default)]
pub struct MockGeocoder {
    locations: HashMap<String, Coordinates>,
    lookups: Mutex<Vec<String>>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, query: &str, coordinates: Coordinates) -> Self {
        self.locations.insert(query.to_string(), coordinates);
        self
    }

    /// Queries received so far, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        self.lookups.lock().unwrap().push(query.to_string());
        Ok(self.locations.get(query).copied())
    }
}
