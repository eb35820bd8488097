use crate::{
    model::{DisplaySettings, LocationRecord, WeatherObservation},
    surface::{DisplaySurface, Field, Indicator, StateClass, WIND_DIR_PROPERTY},
    units::celsius_to_fahrenheit,
};

/// Write a location and its observation into `surface`.
///
/// The badge toggles apply `nodisplay` using these exact comparisons:
/// `hot` when the temperature is below the hot threshold, `cold` when it is
/// above the cold threshold, `windy` when the wind is at or below the windy
/// threshold. A badge is therefore visible only when its condition is met.
pub fn render(
    settings: &DisplaySettings,
    location: &LocationRecord,
    weather: &WeatherObservation,
    surface: &mut dyn DisplaySurface,
) {
    surface.set_field(
        Field::Headline,
        format!(
            "Current Weather for {}, {}  {}",
            location.place_name, location.admin_code, location.postal_code
        ),
    );

    let temp_f = celsius_to_fahrenheit(weather.temperature_c);
    surface.set_field(Field::Temp, format!("{temp_f}° F"));
    surface.class_if(
        (temp_f as f64) < settings.hot_threshold_f,
        Indicator::Hot,
        StateClass::NoDisplay,
    );
    surface.class_if(
        (temp_f as f64) > settings.cold_threshold_f,
        Indicator::Cold,
        StateClass::NoDisplay,
    );

    surface.set_field(Field::WindSpeed, format!("{} mph", weather.wind_speed_mph));
    surface.class_if(
        weather.wind_speed_mph <= settings.windy_threshold_mph,
        Indicator::Windy,
        StateClass::NoDisplay,
    );
    surface.set_wind_arrow_style(WIND_DIR_PROPERTY, format!("{}deg", weather.wind_direction_deg));

    surface.set_field(Field::CloudObs, weather.cloud_cover.clone());
    surface.set_field(Field::Humidity, format!("{}%", weather.humidity_pct));
    surface.set_field(
        Field::DewPoint,
        format!("{}° F", celsius_to_fahrenheit(weather.dew_point_c)),
    );

    surface.set_field(
        Field::DataSource,
        format!(
            "Reported at {} (GMT) from {}",
            weather.observed_at_utc, weather.station_name
        ),
    );
}
