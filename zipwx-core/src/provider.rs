use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::ApiConfig,
    error::ProviderError,
    model::{Credential, LocationRecord, WeatherObservation},
};

pub mod geonames;

pub use geonames::GeoNamesClient;

/// Resolves a US zip code to a place and its coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` when the provider knows no place for `zip`.
    async fn resolve_zip(
        &self,
        zip: &str,
        credential: &Credential,
    ) -> Result<Option<LocationRecord>, ProviderError>;
}

/// Fetches the observation reported by the station nearest to a point.
#[async_trait]
pub trait ObservationSource: Send + Sync + Debug {
    async fn fetch_observation(
        &self,
        lat: f64,
        lng: f64,
        credential: &Credential,
    ) -> Result<WeatherObservation, ProviderError>;
}

/// Construct the GeoNames client from the `[api]` config section.
pub fn client_from_config(api: &ApiConfig) -> Result<GeoNamesClient, ProviderError> {
    GeoNamesClient::new(&api.base_url, api.timeout())
}
