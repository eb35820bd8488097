//! Presentation boundary: named text slots, a wind arrow and class toggles.
//!
//! [`Panel`] is an in-memory surface. Front ends either implement
//! [`DisplaySurface`] directly or wrap a `Panel` and read it back.

use std::collections::{BTreeMap, BTreeSet};

/// Text slots written by a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Headline,
    Temp,
    WindSpeed,
    CloudObs,
    Humidity,
    DewPoint,
    DataSource,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Headline => "headline",
            Field::Temp => "temp",
            Field::WindSpeed => "windSpeed",
            Field::CloudObs => "cloudObs",
            Field::Humidity => "humidity",
            Field::DewPoint => "dewPoint",
            Field::DataSource => "dataSource",
        }
    }

    pub const fn all() -> &'static [Field] {
        &[
            Field::Headline,
            Field::Temp,
            Field::WindSpeed,
            Field::CloudObs,
            Field::Humidity,
            Field::DewPoint,
            Field::DataSource,
        ]
    }
}

/// Elements whose state classes are toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Indicator {
    Spinner,
    Results,
    Hot,
    Cold,
    Windy,
}

impl Indicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Spinner => "spinner",
            Indicator::Results => "results",
            Indicator::Hot => "hot",
            Indicator::Cold => "cold",
            Indicator::Windy => "windy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateClass {
    /// Spinner and results panel.
    Hidden,
    /// Threshold badges.
    NoDisplay,
}

impl StateClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateClass::Hidden => "hidden",
            StateClass::NoDisplay => "nodisplay",
        }
    }
}

/// Style property on the wind arrow holding its rotation.
pub const WIND_DIR_PROPERTY: &str = "--wind-dir";

pub trait DisplaySurface {
    fn set_field(&mut self, field: Field, value: String);

    /// Add `class` to `target` when `condition` holds, remove it otherwise.
    fn class_if(&mut self, condition: bool, target: Indicator, class: StateClass);

    fn set_wind_arrow_style(&mut self, property: &'static str, value: String);
}

/// In-memory surface. Starts with the spinner and results hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    fields: BTreeMap<Field, String>,
    classes: BTreeSet<(Indicator, StateClass)>,
    wind_arrow: BTreeMap<&'static str, String>,
}

impl Default for Panel {
    fn default() -> Self {
        let mut classes = BTreeSet::new();
        classes.insert((Indicator::Spinner, StateClass::Hidden));
        classes.insert((Indicator::Results, StateClass::Hidden));

        Self {
            fields: BTreeMap::new(),
            classes,
            wind_arrow: BTreeMap::new(),
        }
    }
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn has_class(&self, target: Indicator, class: StateClass) -> bool {
        self.classes.contains(&(target, class))
    }

    /// Neither `hidden` nor `nodisplay` is set.
    pub fn is_shown(&self, target: Indicator) -> bool {
        !self.has_class(target, StateClass::Hidden) && !self.has_class(target, StateClass::NoDisplay)
    }

    pub fn wind_arrow_style(&self, property: &str) -> Option<&str> {
        self.wind_arrow.get(property).map(String::as_str)
    }

    /// Wind arrow rotation in degrees, parsed back from the style property.
    pub fn wind_direction_deg(&self) -> Option<f64> {
        self.wind_arrow_style(WIND_DIR_PROPERTY)?
            .strip_suffix("deg")?
            .parse()
            .ok()
    }
}

impl DisplaySurface for Panel {
    fn set_field(&mut self, field: Field, value: String) {
        self.fields.insert(field, value);
    }

    fn class_if(&mut self, condition: bool, target: Indicator, class: StateClass) {
        if condition {
            self.classes.insert((target, class));
        } else {
            self.classes.remove(&(target, class));
        }
    }

    fn set_wind_arrow_style(&mut self, property: &'static str, value: String) {
        self.wind_arrow.insert(property, value);
    }
}
