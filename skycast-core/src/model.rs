use serde::{Deserialize, Serialize};

/// Normalized current-weather observation for a single city.
///
/// Constructed once per successful lookup and discarded on the next one;
/// nothing outlives a single request/render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub description: String,
}

/// One autocomplete candidate from the geocoding provider.
///
/// Produced in provider response order; list order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country_name: String,
}

impl std::fmt::Display for CitySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country_name)
    }
}
