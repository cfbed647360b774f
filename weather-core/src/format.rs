//! Display strings for temperatures, times and precipitation.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::model::Unit;

/// `21°C`, rounded to the nearest degree; `--` when there is no value.
pub fn format_temp(value: Option<f64>, unit: Unit) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}°{}", v.round() as i64, unit.symbol()),
        _ => "--".to_string(),
    }
}

/// Hour and minute of `timestamp` in the local time zone.
pub fn format_hour(timestamp: DateTime<Utc>) -> String {
    format_hour_in(timestamp, &Local)
}

pub fn format_hour_in<Tz: TimeZone>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format("%H:%M").to_string()
}

/// Precipitation probability (0.0 to 1.0) as a whole percentage.
pub fn format_precipitation(probability: f64) -> String {
    format!("{}%", (probability.clamp(0.0, 1.0) * 100.0).round() as i64)
}

/// Rain volume over the forecast step; `None` when there is nothing to show.
pub fn format_rain(volume_mm: Option<f64>) -> Option<String> {
    volume_mm.filter(|v| *v > 0.0).map(|v| format!("{v} mm"))
}
