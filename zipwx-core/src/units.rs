/// Convert Celsius to whole degrees Fahrenheit.
///
/// Halves round toward positive infinity, so `-0.5` becomes `0` and `0.5`
/// becomes `1`.
pub fn celsius_to_fahrenheit(celsius: f64) -> i64 {
    (celsius * 1.8 + 32.0 + 0.5).floor() as i64
}
