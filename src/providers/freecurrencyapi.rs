use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::{CurrencyRateProvider, FetchError};
use crate::core::validate::CurrencyCode;

pub const DEFAULT_BASE_URL: &str = "https://api.freecurrencyapi.com";

// FreeCurrencyApiProvider implementation for CurrencyRateProvider
pub struct FreeCurrencyApiProvider {
    endpoint: Url,
    api_key: String,
    client: reqwest::Client,
}

impl FreeCurrencyApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let endpoint = Url::parse(&format!("{}/v1/latest", base_url.trim_end_matches('/')))
            .with_context(|| format!("Invalid FreeCurrencyAPI base URL: {base_url}"))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(FreeCurrencyApiProvider {
            endpoint,
            api_key: api_key.to_string(),
            client,
        })
    }

    fn latest_url(&self, base: &CurrencyCode, target: &CurrencyCode) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("base_currency", base.as_str())
            .append_pair("currencies", target.as_str());
        url
    }
}

// Rates are kept as raw JSON so a non-numeric value can be reported as such
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    data: Option<HashMap<String, Value>>,
}

fn extract_rate(
    body: &str,
    base: &CurrencyCode,
    target: &CurrencyCode,
) -> Result<f64, FetchError> {
    let response: LatestRatesResponse = serde_json::from_str(body).map_err(|e| {
        debug!("Failed to parse JSON response: {}", e);
        FetchError::UnexpectedFormat
    })?;
    let data = response.data.ok_or(FetchError::UnexpectedFormat)?;

    match data.get(target.as_str()) {
        None | Some(Value::Null) => Err(FetchError::RateNotFound {
            base: base.clone(),
            target: target.clone(),
        }),
        Some(value) => value
            .as_f64()
            .filter(|rate| rate.is_finite())
            .ok_or_else(|| FetchError::InvalidRate {
                target: target.clone(),
                value: value.to_string(),
            }),
    }
}

#[async_trait]
impl CurrencyRateProvider for FreeCurrencyApiProvider {
    #[instrument(
        name = "FreeCurrencyApiRateFetch",
        skip_all,
        fields(base = %base, target = %target)
    )]
    async fn get_rate(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<f64, FetchError> {
        let url = self.latest_url(base, target);
        debug!("Requesting latest rates from {}", self.endpoint);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        debug!(status = %response.status(), "Received FreeCurrencyAPI response");

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let text = response.text().await.map_err(FetchError::Network)?;
        extract_rate(&text, base, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    async fn create_mock_server(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/latest"))
            .and(query_param("apikey", "test-key"))
            .and(query_param("base_currency", "CAD"))
            .and(query_param("currencies", "USD"))
            .respond_with(template)
            .mount(&mock_server)
            .await;

        mock_server
    }

    async fn fetch(mock_server: &MockServer) -> Result<f64, FetchError> {
        let provider = FreeCurrencyApiProvider::new(&mock_server.uri(), "test-key").unwrap();
        provider.get_rate(&code("CAD"), &code("USD")).await
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200).set_body_string(r#"{"data": {"USD": 1.35}}"#),
        )
        .await;

        let rate = fetch(&mock_server).await.expect("Failed to get rate");
        assert_eq!(rate, 1.35);
    }

    #[tokio::test]
    async fn test_server_error_carries_status() {
        let mock_server = create_mock_server(ResponseTemplate::new(500)).await;

        let err = fetch(&mock_server).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Network error: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_unauthorized_key() {
        let body = r#"{"message": "Invalid authentication credentials"}"#;
        let mock_server = create_mock_server(ResponseTemplate::new(401).set_body_string(body)).await;

        let err = fetch(&mock_server).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_missing_target_rate() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(r#"{"data": {}}"#))
                .await;

        let err = fetch(&mock_server).await.unwrap_err();
        assert!(matches!(err, FetchError::RateNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Could not find exchange rate for the given currency pair."
        );
    }

    #[tokio::test]
    async fn test_null_target_rate() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200).set_body_string(r#"{"data": {"USD": null}}"#),
        )
        .await;

        let err = fetch(&mock_server).await.unwrap_err();
        assert!(matches!(err, FetchError::RateNotFound { .. }));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200).set_body_string(r#"{"rates": {"USD": 1.35}}"#),
        )
        .await;

        let err = fetch(&mock_server).await.unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedFormat));
        assert_eq!(err.to_string(), "Unexpected API response format.");
    }

    #[tokio::test]
    async fn test_non_json_response() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string("<html></html>")).await;

        let err = fetch(&mock_server).await.unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedFormat));
    }

    #[tokio::test]
    async fn test_non_numeric_rate_is_rejected() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200).set_body_string(r#"{"data": {"USD": "1.35"}}"#),
        )
        .await;

        let err = fetch(&mock_server).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRate { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Nothing listens on the discard port
        let provider = FreeCurrencyApiProvider::new("http://127.0.0.1:9", "test-key").unwrap();
        let err = provider
            .get_rate(&code("CAD"), &code("USD"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
        assert!(err.to_string().starts_with("Failed to fetch exchange rate."));
    }

    #[test]
    fn test_latest_url_query() {
        let provider = FreeCurrencyApiProvider::new("http://example.com/", "k3y").unwrap();
        let url = provider.latest_url(&code("CAD"), &code("USD"));
        assert_eq!(
            url.as_str(),
            "http://example.com/v1/latest?apikey=k3y&base_currency=CAD&currencies=USD"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(FreeCurrencyApiProvider::new("not a url", "k3y").is_err());
    }

    #[test]
    fn test_extract_rate_ignores_other_currencies() {
        let body = r#"{"data": {"EUR": 0.68, "USD": 0.73}}"#;
        let rate = extract_rate(body, &code("CAD"), &code("USD")).unwrap();
        assert_eq!(rate, 0.73);
    }
}
