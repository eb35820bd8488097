use std::sync::Arc;

use crate::{
    credential::CredentialStore,
    error::LookupError,
    model::{Credential, DisplaySettings, LocationRecord, WeatherObservation},
    operator::Operator,
    present,
    provider::{Geocoder, ObservationSource},
    surface::{DisplaySurface, Indicator, StateClass},
};

/// How a single trigger ended. The spinner is hidden again in every case.
#[derive(Debug)]
pub enum LookupOutcome {
    /// The zip input was empty; nothing happened.
    Skipped,
    Displayed {
        location: LocationRecord,
        observation: WeatherObservation,
    },
    Failed(LookupError),
}

/// Drives one zip lookup at a time from the input field to the surface.
///
/// [`LookupController::request`] takes `&mut self`, so a second trigger
/// cannot start while a lookup is in flight; callers serialise triggers.
/// The loading state is visible only through the surface: the spinner is
/// shown while the providers are awaited and hidden before `request` returns.
pub struct LookupController<S: DisplaySurface> {
    settings: DisplaySettings,
    credentials: Arc<CredentialStore>,
    geocoder: Arc<dyn Geocoder>,
    observations: Arc<dyn ObservationSource>,
    operator: Arc<dyn Operator>,
    surface: S,
    zip_input: String,
}

impl<S: DisplaySurface> LookupController<S> {
    pub fn new(
        settings: DisplaySettings,
        credentials: Arc<CredentialStore>,
        geocoder: Arc<dyn Geocoder>,
        observations: Arc<dyn ObservationSource>,
        operator: Arc<dyn Operator>,
        surface: S,
    ) -> Self {
        Self {
            settings,
            credentials,
            geocoder,
            observations,
            operator,
            surface,
            zip_input: String::new(),
        }
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn zip_input(&self) -> &str {
        &self.zip_input
    }

    pub fn set_zip_input(&mut self, zip: impl Into<String>) {
        self.zip_input = zip.into();
    }

    /// Look up the zip currently in the input field.
    pub async fn request(&mut self) -> LookupOutcome {
        let zip = self.zip_input.trim().to_string();
        if zip.is_empty() {
            return LookupOutcome::Skipped;
        }

        let credential = match self
            .credentials
            .ensure_credential(self.operator.as_ref())
            .await
        {
            Ok(credential) => credential,
            Err(err) => return self.fail(err).await,
        };

        self.surface.class_if(false, Indicator::Spinner, StateClass::Hidden);
        self.surface.class_if(true, Indicator::Results, StateClass::Hidden);

        let outcome = match self.fetch(&zip, &credential).await {
            Ok((location, observation)) => {
                present::render(&self.settings, &location, &observation, &mut self.surface);
                self.surface.class_if(false, Indicator::Results, StateClass::Hidden);
                self.zip_input.clear();

                tracing::info!(
                    zip = %zip,
                    place = %location.place_name,
                    station = %observation.station_name,
                    "Lookup displayed"
                );
                LookupOutcome::Displayed {
                    location,
                    observation,
                }
            }
            Err(err) => self.fail(err).await,
        };

        self.surface.class_if(true, Indicator::Spinner, StateClass::Hidden);

        outcome
    }

    async fn fetch(
        &self,
        zip: &str,
        credential: &Credential,
    ) -> Result<(LocationRecord, WeatherObservation), LookupError> {
        let location = self
            .geocoder
            .resolve_zip(zip, credential)
            .await?
            .ok_or_else(|| LookupError::InvalidZip(zip.to_string()))?;

        tracing::debug!(zip, lat = location.lat, lng = location.lng, "Zip resolved");

        let observation = self
            .observations
            .fetch_observation(location.lat, location.lng, credential)
            .await?;

        Ok((location, observation))
    }

    async fn fail(&self, err: LookupError) -> LookupOutcome {
        tracing::warn!("Lookup failed: {err}");
        self.operator.alert(&err.to_string()).await;
        LookupOutcome::Failed(err)
    }
}
