use async_trait::async_trait;
use reqwest::Client;

use super::{
    WeatherProvider,
    wire::{OwCurrentResponse, OwForecastResponse},
};
use crate::{
    error::TransportError,
    http::{get_json, http_client},
    model::{ForecastSeries, LocationQuery, Suggestion, Unit, WeatherSnapshot},
};

pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org";
const SUGGESTION_LIMIT: &str = "5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> reqwest::Result<Self> {
        Self::with_base_url(api_key, OPENWEATHER_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> reqwest::Result<Self> {
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client()?,
        })
    }

    fn weather_params(&self, query: &LocationQuery, unit: Unit) -> Vec<(&'static str, String)> {
        let mut params = query.query_pairs();
        params.push(("appid", self.api_key.clone()));
        params.push(("units", unit.as_str().to_string()));
        params
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(
        &self,
        query: &LocationQuery,
        unit: Unit,
    ) -> Result<WeatherSnapshot, TransportError> {
        let request = self
            .http
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&self.weather_params(query, unit));

        let parsed: OwCurrentResponse = get_json(request, "OpenWeather current").await?;
        Ok(parsed.into())
    }

    async fn forecast(
        &self,
        query: &LocationQuery,
        unit: Unit,
    ) -> Result<ForecastSeries, TransportError> {
        let request = self
            .http
            .get(format!("{}/data/2.5/forecast", self.base_url))
            .query(&self.weather_params(query, unit));

        let parsed: OwForecastResponse = get_json(request, "OpenWeather forecast").await?;
        Ok(parsed.into())
    }

    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, TransportError> {
        let request = self
            .http
            .get(format!("{}/geo/1.0/direct", self.base_url))
            .query(&[
                ("q", text),
                ("limit", SUGGESTION_LIMIT),
                ("appid", self.api_key.as_str()),
            ]);

        get_json(request, "OpenWeather geocoding").await
    }
}
