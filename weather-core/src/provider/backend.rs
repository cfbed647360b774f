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

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// The cities proxy service, which forwards OpenWeather responses and keeps
/// the API key server-side.
#[derive(Debug, Clone)]
pub struct BackendProvider {
    base_url: String,
    http: Client,
}

impl BackendProvider {
    pub fn new(base_url: &str) -> reqwest::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/cities/{path}", self.base_url)
    }

    fn weather_params(query: &LocationQuery, unit: Unit) -> Vec<(&'static str, String)> {
        let mut params = query.query_pairs();
        params.push(("unit", unit.as_str().to_string()));
        params
    }
}

#[async_trait]
impl WeatherProvider for BackendProvider {
    async fn current(
        &self,
        query: &LocationQuery,
        unit: Unit,
    ) -> Result<WeatherSnapshot, TransportError> {
        let request = self
            .http
            .get(self.url("weather"))
            .query(&Self::weather_params(query, unit));

        let parsed: OwCurrentResponse = get_json(request, "backend weather").await?;
        Ok(parsed.into())
    }

    async fn forecast(
        &self,
        query: &LocationQuery,
        unit: Unit,
    ) -> Result<ForecastSeries, TransportError> {
        let request = self
            .http
            .get(self.url("forecast"))
            .query(&Self::weather_params(query, unit));

        let parsed: OwForecastResponse = get_json(request, "backend forecast").await?;
        Ok(parsed.into())
    }

    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, TransportError> {
        let request = self.http.get(self.url("search")).query(&[("q", text)]);
        get_json(request, "backend search").await
    }
}
