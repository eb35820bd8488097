use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    error::ProviderError,
    model::{Credential, LocationRecord, WeatherObservation},
};

use super::{Geocoder, ObservationSource};

pub const DEFAULT_BASE_URL: &str = "https://api.geonames.org";

const POSTAL_CODE_SEARCH: &str = "postalCodeSearchJSON";
const NEARBY_WEATHER: &str = "findNearByWeatherJSON";
const COUNTRY: &str = "US";
const USER_AGENT: &str = concat!("zipwx/", env!("CARGO_PKG_VERSION"));

/// Client for the two GeoNames web services used by a lookup.
#[derive(Debug, Clone)]
pub struct GeoNamesClient {
    base_url: String,
    http: Client,
}

impl GeoNamesClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, "Sending GeoNames request");

        let res = self.http.get(&url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        // Service errors arrive as 200 with a `status` object instead of data.
        if let Ok(ServiceEnvelope { status: Some(err) }) =
            serde_json::from_str::<ServiceEnvelope>(&body)
        {
            return Err(ProviderError::Service {
                message: err.message,
                code: err.value,
            });
        }

        serde_json::from_str(&body).map_err(|source| ProviderError::Malformed { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct ServiceEnvelope {
    status: Option<ServiceStatus>,
}

#[derive(Debug, Deserialize)]
struct ServiceStatus {
    message: String,
    #[serde(default)]
    value: i64,
}

// Candidates stay raw; only the first one is decoded.
#[derive(Debug, Deserialize)]
struct PostalCodeResponse {
    #[serde(rename = "postalCodes")]
    postal_codes: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct NearbyWeatherResponse {
    #[serde(rename = "weatherObservation")]
    weather_observation: Option<WeatherObservation>,
}

#[async_trait]
impl Geocoder for GeoNamesClient {
    async fn resolve_zip(
        &self,
        zip: &str,
        credential: &Credential,
    ) -> Result<Option<LocationRecord>, ProviderError> {
        let parsed: PostalCodeResponse = self
            .get_json(
                POSTAL_CODE_SEARCH,
                &[
                    ("postalcode", zip),
                    ("country", COUNTRY),
                    ("username", credential.as_str()),
                ],
            )
            .await?;

        tracing::debug!(zip, candidates = parsed.postal_codes.len(), "Postal code search finished");

        parsed
            .postal_codes
            .into_iter()
            .next()
            .map(serde_json::from_value::<LocationRecord>)
            .transpose()
            .map_err(|source| ProviderError::Malformed {
                endpoint: POSTAL_CODE_SEARCH,
                source,
            })
    }
}

#[async_trait]
impl ObservationSource for GeoNamesClient {
    async fn fetch_observation(
        &self,
        lat: f64,
        lng: f64,
        credential: &Credential,
    ) -> Result<WeatherObservation, ProviderError> {
        let lat_param = lat.to_string();
        let lng_param = lng.to_string();

        let parsed: NearbyWeatherResponse = self
            .get_json(
                NEARBY_WEATHER,
                &[
                    ("lat", lat_param.as_str()),
                    ("lng", lng_param.as_str()),
                    ("username", credential.as_str()),
                ],
            )
            .await?;

        parsed
            .weather_observation
            .ok_or(ProviderError::NoObservation { lat, lng })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
