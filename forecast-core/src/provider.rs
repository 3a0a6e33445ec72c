use crate::{Config, ForecastResponse, Query, error::FetchError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// One request/response exchange with the forecast service.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &Query) -> Result<ForecastResponse, FetchError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherApiProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `forecast configure` or set FORECAST_API_KEY."
        )
    })?;

    Ok(WeatherApiProvider::new(api_key.to_owned()).with_base_url(config.base_url()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `forecast configure`"));
    }

    #[test]
    fn provider_from_config_uses_configured_base_url() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:9999/v1/forecast.json".into()),
            ..Config::default()
        };

        let provider = provider_from_config(&cfg).expect("key is set");
        assert_eq!(provider.base_url(), "http://localhost:9999/v1/forecast.json");
    }
}
