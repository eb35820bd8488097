use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

/// Account name sent as `username` on every GeoNames request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// First candidate returned by the postal code search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(rename = "placeName")]
    pub place_name: String,
    #[serde(rename = "adminCode1", default)]
    pub admin_code: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lng: f64,
}

/// Nearest station reading for a pair of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    #[serde(rename = "temperature", deserialize_with = "number_or_string")]
    pub temperature_c: f64,
    #[serde(rename = "windSpeed", deserialize_with = "number_or_string")]
    pub wind_speed_mph: f64,
    // Calm readings omit the direction.
    #[serde(rename = "windDirection", default, deserialize_with = "number_or_string")]
    pub wind_direction_deg: f64,
    #[serde(rename = "clouds", default)]
    pub cloud_cover: String,
    #[serde(rename = "humidity", deserialize_with = "number_or_string")]
    pub humidity_pct: f64,
    #[serde(rename = "dewPoint", deserialize_with = "number_or_string")]
    pub dew_point_c: f64,
    #[serde(rename = "datetime")]
    pub observed_at_utc: String,
    #[serde(rename = "stationName")]
    pub station_name: String,
}

/// Thresholds driving the hot, cold and windy indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub windy_threshold_mph: f64,
    pub cold_threshold_f: f64,
    pub hot_threshold_f: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            windy_threshold_mph: 15.0,
            cold_threshold_f: 34.0,
            hot_threshold_f: 83.0,
        }
    }
}

/// GeoNames sends most numeric readings as strings ("05", "-1.2").
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got {s:?}")))?,
    };

    // "NaN" and "inf" parse as f64 but are not readings.
    if !value.is_finite() {
        return Err(de::Error::custom(format!("expected a finite number, got {value}")));
    }
    Ok(value)
}
