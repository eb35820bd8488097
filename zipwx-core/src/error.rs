use thiserror::Error;

/// Failures talking to GeoNames.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GeoNames {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// GeoNames reports account and quota problems in a `status` object with HTTP 200.
    #[error("GeoNames rejected the request: {message} (code {code})")]
    Service { message: String, code: i64 },

    #[error("Failed to parse GeoNames {endpoint} JSON: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("No weather station reported near {lat}, {lng}")]
    NoObservation { lat: f64, lng: f64 },
}

/// Why a lookup ended without displaying results.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("A GeoNames username is required to look up weather")]
    NoCredential,

    #[error("Invalid zip code {0:?} - please try again.")]
    InvalidZip(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
