//! Core library for the `zipwx` zip code weather lookup.
//!
//! This crate defines:
//! - Shared domain models (credential, location, observation, display settings)
//! - The GeoNames geocoding and nearby-weather clients
//! - The presentation surface and the updater that fills it
//! - The lookup controller tying input, credential, providers and surface together
//!
//! It is used by `zipwx-cli`, but any front end implementing [`DisplaySurface`]
//! and [`Operator`] can drive it.

pub mod config;
pub mod controller;
pub mod credential;
pub mod error;
pub mod model;
pub mod operator;
pub mod present;
pub mod provider;
pub mod surface;
pub mod units;

pub use config::{ApiConfig, Config};
pub use controller::{LookupController, LookupOutcome};
pub use credential::CredentialStore;
pub use error::{LookupError, ProviderError};
pub use model::{Credential, DisplaySettings, LocationRecord, WeatherObservation};
pub use operator::Operator;
pub use provider::{GeoNamesClient, Geocoder, ObservationSource};
pub use surface::{DisplaySurface, Field, Indicator, Panel, StateClass};
pub use units::celsius_to_fahrenheit;
