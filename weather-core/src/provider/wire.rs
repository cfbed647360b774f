//! OpenWeather-shaped JSON, as returned both by OpenWeather itself and by the
//! backend proxy that forwards it.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::model::{Condition, ForecastEntry, ForecastSeries, WeatherSnapshot};

#[derive(Debug, Deserialize)]
pub(crate) struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

impl From<OwWeather> for Condition {
    fn from(w: OwWeather) -> Self {
        Condition {
            description: w.description,
            icon: w.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    temp_min: Option<f64>,
    #[serde(default)]
    temp_max: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCurrentResponse {
    name: String,
    main: OwMain,
    #[serde(default)]
    sys: OwSys,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(parsed: OwCurrentResponse) -> Self {
        WeatherSnapshot {
            name: parsed.name,
            country: parsed.sys.country,
            temperature: parsed.main.temp,
            temp_min: parsed.main.temp_min.unwrap_or(parsed.main.temp),
            temp_max: parsed.main.temp_max.unwrap_or(parsed.main.temp),
            conditions: parsed.weather.into_iter().map(Condition::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwRain {
    #[serde(rename = "3h")]
    three_hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    rain: Option<OwRain>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

impl From<OwForecastResponse> for ForecastSeries {
    fn from(parsed: OwForecastResponse) -> Self {
        let entries = parsed
            .list
            .into_iter()
            .filter_map(|entry| {
                let Some(timestamp) = unix_to_utc(entry.dt) else {
                    warn!(dt = entry.dt, "dropping forecast entry with out-of-range timestamp");
                    return None;
                };
                Some(ForecastEntry {
                    timestamp,
                    temperature: entry.main.temp,
                    precipitation_probability: entry.pop.clamp(0.0, 1.0),
                    rain_volume_mm: entry.rain.and_then(|r| r.three_hours),
                    condition: entry.weather.into_iter().next().map(Condition::from),
                })
            })
            .collect();

        ForecastSeries { entries }
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
