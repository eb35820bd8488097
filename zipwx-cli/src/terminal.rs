use async_trait::async_trait;
use inquire::InquireError;
use zipwx_core::{DisplaySurface, Field, Indicator, Operator, Panel, StateClass};

/// Prompts and alerts on the controlling terminal.
pub struct TerminalOperator;

#[async_trait]
impl Operator for TerminalOperator {
    async fn solicit_credential(&self) -> anyhow::Result<Option<String>> {
        let answer = tokio::task::spawn_blocking(|| {
            inquire::Text::new("user login:")
                .with_help_message("GeoNames account username")
                .prompt_skippable()
        })
        .await?;

        match answer {
            Ok(value) => Ok(value),
            Err(InquireError::OperationInterrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Panel that prints itself when the results become visible.
#[derive(Default)]
pub struct TerminalSurface {
    panel: Panel,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_field(&mut self, field: Field, value: String) {
        self.panel.set_field(field, value);
    }

    fn class_if(&mut self, condition: bool, target: Indicator, class: StateClass) {
        let was_shown = self.panel.is_shown(target);
        self.panel.class_if(condition, target, class);

        if was_shown || !self.panel.is_shown(target) {
            return;
        }
        match target {
            Indicator::Spinner => eprintln!("Fetching weather..."),
            Indicator::Results => print!("{}", format_panel(&self.panel)),
            _ => {}
        }
    }

    fn set_wind_arrow_style(&mut self, property: &'static str, value: String) {
        self.panel.set_wind_arrow_style(property, value);
    }
}

/// Lay out a rendered panel as terminal text.
pub fn format_panel(panel: &Panel) -> String {
    let text = move |field: Field| panel.field(field).unwrap_or("-");

    let mut badges = Vec::new();
    for (indicator, label) in [
        (Indicator::Hot, "HOT"),
        (Indicator::Cold, "COLD"),
        (Indicator::Windy, "WINDY"),
    ] {
        if panel.is_shown(indicator) {
            badges.push(label);
        }
    }

    let arrow = panel.wind_direction_deg().map(wind_arrow).unwrap_or(' ');

    let mut output = format!("{}\n", text(Field::Headline));
    output.push_str(&format!("  Temperature  {}\n", text(Field::Temp)));
    output.push_str(&format!("  Wind         {} {}\n", text(Field::WindSpeed), arrow));
    output.push_str(&format!("  Clouds       {}\n", text(Field::CloudObs)));
    output.push_str(&format!("  Humidity     {}\n", text(Field::Humidity)));
    output.push_str(&format!("  Dew point    {}\n", text(Field::DewPoint)));
    if !badges.is_empty() {
        output.push_str(&format!("  [{}]\n", badges.join("] [")));
    }
    output.push_str(&format!("{}\n", text(Field::DataSource)));
    output
}

/// Up arrow rotated clockwise by `degrees`, snapped to eight directions.
fn wind_arrow(degrees: f64) -> char {
    const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
    let idx = ((degrees.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize % 8;
    ARROWS[idx]
}
