//! Display fragments for weather reports and suggestion lists.
//!
//! Rendering is pure: each function maps an immutable value to an HTML
//! fragment string. The hosting application decides how and where fragments
//! are mounted. [`DisplaySurface`] models the two addressable display
//! regions plus the input field, each replaced wholesale on every update.

use crate::model::{CitySuggestion, WeatherReport};

/// Render a weather report as an HTML fragment.
///
/// The fragment carries one row each for temperature, humidity, wind speed
/// and description, under a heading with the location name.
pub fn weather_fragment(report: &WeatherReport) -> String {
    format!(
        concat!(
            "<div class=\"weather-card\">",
            "<h2>Weather in {name}</h2>",
            "<p class=\"weather-temperature\">Temperature: {temp}°C</p>",
            "<p class=\"weather-humidity\">Humidity: {humidity}%</p>",
            "<p class=\"weather-wind\">Wind Speed: {wind} m/s</p>",
            "<p class=\"weather-description\">Description: {description}</p>",
            "</div>",
        ),
        name = escape(&report.location_name),
        temp = report.temperature_c,
        humidity = report.humidity_pct,
        wind = report.wind_speed_mps,
        description = escape(&report.description),
    )
}

/// Render a suggestion list as an HTML fragment, one selectable row per
/// suggestion, in the order given. An empty list renders as an empty
/// fragment.
///
/// Each row carries the suggestion name in a `data-name` attribute as the
/// selection hook for the hosting application.
pub fn suggestions_fragment(suggestions: &[CitySuggestion]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }

    let mut out = String::from("<ul class=\"suggestions\">");
    for suggestion in suggestions {
        out.push_str(&format!(
            "<li class=\"suggestion-row\" data-name=\"{name}\">{name}, {country}</li>",
            name = escape(&suggestion.name),
            country = escape(&suggestion.country_name),
        ));
    }
    out.push_str("</ul>");
    out
}

/// Escape text for interpolation into markup.
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The two addressable display regions and the input field.
///
/// Each update replaces a region wholesale; a late-arriving result simply
/// overwrites whatever is currently displayed. There is no generation
/// counter and no cancellation of superseded requests, so the last
/// completed write wins.
#[derive(Debug, Clone, Default)]
pub struct DisplaySurface {
    input: String,
    weather_region: String,
    suggestion_region: String,
    suggestions: Vec<CitySuggestion>,
}

impl DisplaySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn weather_region(&self) -> &str {
        &self.weather_region
    }

    pub fn suggestion_region(&self) -> &str {
        &self.suggestion_region
    }

    /// Replace the weather region with the rendered report.
    pub fn show_weather(&mut self, report: &WeatherReport) {
        self.weather_region = weather_fragment(report);
    }

    /// Replace the suggestion region with the rendered list.
    pub fn show_suggestions(&mut self, suggestions: &[CitySuggestion]) {
        self.suggestion_region = suggestions_fragment(suggestions);
        self.suggestions = suggestions.to_vec();
    }

    /// Select the suggestion at `index`: the input takes the suggestion's
    /// name and the suggestion region is cleared. Returns the selected name,
    /// or `None` when the index is out of range.
    pub fn select_suggestion(&mut self, index: usize) -> Option<String> {
        let name = self.suggestions.get(index)?.name.clone();

        self.input = name.clone();
        self.suggestions.clear();
        self.suggestion_region.clear();

        Some(name)
    }
}
