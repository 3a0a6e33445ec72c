use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, instrument};

use crate::{ForecastResponse, Query, error::FetchError};

use super::ForecastProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1/forecast.json";

/// Client for WeatherAPI.com's `forecast.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    #[instrument(skip_all, fields(location = %query.location, days = %query.days))]
    async fn fetch(&self, query: &Query) -> Result<ForecastResponse, FetchError> {
        let days = query.days.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.location.as_str()),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "forecast request failed");
                FetchError::Transport(e)
            })?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Transport)?;

        if !status.is_success() {
            error!(%status, "forecast provider rejected request");
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "forecast body is not JSON");
            FetchError::Body(e.to_string())
        })?;

        debug!(bytes = body.len(), "forecast received");
        Ok(ForecastResponse::from(parsed))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("{\"error\":1}"), "{\"error\":1}");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
    }

    #[test]
    fn default_base_url_is_forecast_endpoint() {
        let provider = WeatherApiProvider::new("KEY".into());
        assert_eq!(provider.base_url(), DEFAULT_BASE_URL);
    }
}
