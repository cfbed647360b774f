//! Plain-text rendering of the application state.

use std::fmt::Write;

use weather_core::{
    AppState, FavoriteCity, ForecastEntry, Unit,
    format::{format_hour, format_precipitation, format_rain, format_temp},
};

/// Entries shown from the forecast series: the next ~18 hours at 3-hour steps.
pub const FORECAST_HOURS: usize = 6;

const EMPTY_PROMPT: &str = "Enter a city or use your location to see weather.";

pub fn render(state: &AppState) -> String {
    let mut out = String::new();

    if state.loading {
        out.push_str("Loading weather data...\n");
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "Error: {error}");
    }
    if state.is_idle_empty() {
        let _ = writeln!(out, "{EMPTY_PROMPT}");
    }

    if !state.loading {
        out.push_str(&render_weather(state));
    }

    out.push('\n');
    out.push_str(&render_favorites(&state.favorites));
    out
}

fn render_weather(state: &AppState) -> String {
    let mut out = String::new();
    let (Some(snapshot), Some(forecast)) = (&state.snapshot, &state.forecast) else {
        return out;
    };
    let unit = state.snapshot_unit;
    let star = if state.is_favorite() { "★" } else { "☆" };

    let _ = writeln!(out, "{}, {}  {star}", snapshot.name, snapshot.country);
    let condition = snapshot
        .primary_condition()
        .map(|c| c.description.as_str())
        .unwrap_or("");
    let _ = writeln!(
        out,
        "{}  {condition}",
        format_temp(Some(snapshot.temperature), unit)
    );
    let _ = writeln!(
        out,
        "H: {} L: {}",
        format_temp(Some(snapshot.temp_max), unit),
        format_temp(Some(snapshot.temp_min), unit)
    );

    let hours = forecast.next_hours(FORECAST_HOURS);
    if !hours.is_empty() {
        out.push('\n');
        for entry in hours {
            let _ = writeln!(out, "{}", render_hour(entry, unit));
        }
    }
    out
}

fn render_hour(entry: &ForecastEntry, unit: Unit) -> String {
    let description = entry
        .condition
        .as_ref()
        .map(|c| c.description.as_str())
        .unwrap_or("weather");
    let mut line = format!(
        "{}  {:>5}  {:<16} ☔ {}",
        format_hour(entry.timestamp),
        format_temp(Some(entry.temperature), unit),
        description,
        format_precipitation(entry.precipitation_probability),
    );
    if let Some(rain) = format_rain(entry.rain_volume_mm) {
        let _ = write!(line, " • {rain}");
    }
    line
}

pub fn render_favorites(favorites: &[FavoriteCity]) -> String {
    let mut out = String::from("Favorite cities:\n");
    if favorites.is_empty() {
        out.push_str("  No favorite cities yet.\n");
    }
    for city in favorites {
        let _ = writeln!(out, "  {city}  [{}]", city.id);
    }
    out
}
