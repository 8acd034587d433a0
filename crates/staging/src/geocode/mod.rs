//! Address to coordinate lookup
//!
//! Customers without coordinates are resolved by address first and by
//! country second. There is no further fallback: a customer neither lookup
//! can place fails the load.

mod mock;
mod nominatim;

pub use mock::MockGeocoder;
pub use nominatim::NominatimGeocoder;

use async_trait::async_trait;
use customernexus_core::{CustomerRecord, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Trait for geocoding services
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up a free-text location; `Ok(None)` when the service has no match
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>>;
}

/// True when at least one customer row lacks a coordinate pair
pub fn needs_geocoding(customers: &[CustomerRecord]) -> bool {
    customers.iter().any(|c| c.coordinates().is_none())
}

/// Fill in missing coordinates, trying the address then the country
pub async fn resolve_coordinates(
    customers: Vec<CustomerRecord>,
    geocoder: &dyn Geocoder,
) -> Result<Vec<CustomerRecord>> {
    if !needs_geocoding(&customers) {
        return Ok(customers);
    }

    info!("Converting addresses to geo-coordinates");

    let mut resolved = Vec::with_capacity(customers.len());
    for mut customer in customers {
        if customer.coordinates().is_none() {
            let coordinates = locate(&customer, geocoder).await?;
            customer.latitude = Some(coordinates.latitude);
            customer.longitude = Some(coordinates.longitude);
        }
        resolved.push(customer);
    }

    info!("Coordinates conversion is completed");
    Ok(resolved)
}

async fn locate(customer: &CustomerRecord, geocoder: &dyn Geocoder) -> Result<Coordinates> {
    if let Some(coordinates) = geocoder.geocode(&customer.address).await? {
        return Ok(coordinates);
    }

    debug!(
        cif = %customer.cif,
        address = %customer.address,
        "Address not found, falling back to country"
    );

    geocoder.geocode(&customer.country).await?.ok_or_else(|| {
        Error::geocoding(format!(
            "No location found for customer {} (address '{}', country '{}')",
            customer.cif, customer.address, customer.country
        ))
    })
}
