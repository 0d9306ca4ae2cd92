//! Weather API client
//!
//! Proxies location lookups to the configured weather endpoint and hands the
//! JSON payload back untouched.

use reqwest::{Client, StatusCode};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    /// Create a client from the weather configuration section
    pub fn new(config: &WeatherConfig) -> Self {
        Self::with_base_url(config.api_key.clone(), config.api_endpoint.clone())
    }

    /// Create a client against a custom endpoint
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch weather data for a location
    pub async fn get_weather_data(&self, location: &str) -> AppResult<serde_json::Value> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("location", location), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Weather API request failed");
                AppError::WeatherServiceUnavailable
            })?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::GATEWAY_TIMEOUT {
            return Err(AppError::WeatherServiceUnavailable);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse weather response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_endpoint() {
        let config = WeatherConfig {
            api_endpoint: "http://localhost:9999/weather".to_string(),
            api_key: "secret".to_string(),
        };
        let client = WeatherClient::new(&config);

        assert_eq!(client.base_url, "http://localhost:9999/weather");
        assert_eq!(client.api_key, "secret");
    }

    #[test]
    fn test_unreachable_endpoint_is_unavailable() {
        let client = WeatherClient::with_base_url(
            "key".to_string(),
            "http://127.0.0.1:9/weather".to_string(),
        );

        let result = tokio_test::block_on(client.get_weather_data("Fresno"));
        assert!(matches!(result, Err(AppError::WeatherServiceUnavailable)));
    }
}
