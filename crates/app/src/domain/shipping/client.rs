//! Carrier-rate HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::shipping::{
    errors::ShippingError,
    models::{RateRequest, ServiceRate},
};

/// Configuration for the carrier-rate API.
#[derive(Debug, Clone)]
pub struct ShippingRateConfig {
    /// Rate API base address, e.g. `"https://api.rajaongkir.example"`.
    pub base_url: String,

    /// API key sent with every request.
    pub api_key: String,

    /// Request deadline; a slow carrier fails the lookup rather than
    /// stalling the checkout.
    pub timeout: Duration,
}

/// Quotes shipping costs for a route, weight, and courier.
#[automock]
#[async_trait]
pub trait ShippingRateClient: Send + Sync {
    /// Fetch the service options for one shipment.
    ///
    /// An empty option list is reported as [`ShippingError::NoServices`]
    /// so callers never mistake it for a free shipment.
    async fn rates(&self, request: RateRequest) -> Result<Vec<ServiceRate>, ShippingError>;
}

/// HTTP implementation against a RajaOngkir-style `POST /cost` endpoint.
#[derive(Debug, Clone)]
pub struct HttpShippingRateClient {
    config: ShippingRateConfig,
    http: Client,
}

impl HttpShippingRateClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be
    /// constructed with the configured timeout.
    pub fn new(config: ShippingRateConfig) -> Result<Self, ShippingError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl ShippingRateClient for HttpShippingRateClient {
    async fn rates(&self, request: RateRequest) -> Result<Vec<ServiceRate>, ShippingError> {
        let url = format!("{}/cost", self.config.base_url);

        let body = serde_json::json!({
            "origin": request.origin_id,
            "destination": request.destination_id,
            "weight": request.weight_grams,
            "courier": request.courier.as_str(),
        });

        let response = self
            .http
            .post(&url)
            .header("key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(ShippingError::UnexpectedResponse(format!(
                "rate request failed with status {status}: {text}"
            )));
        }

        let parsed: RateResponse = response.json().await?;

        let rates: Vec<ServiceRate> = parsed
            .results
            .into_iter()
            .map(ServiceRate::from)
            .collect();

        if rates.is_empty() {
            return Err(ShippingError::NoServices);
        }

        Ok(rates)
    }
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    results: Vec<RateResult>,
}

#[derive(Debug, Deserialize)]
struct RateResult {
    service: String,
    cost: u64,
    #[serde(default)]
    etd: String,
}

impl From<RateResult> for ServiceRate {
    fn from(result: RateResult) -> Self {
        Self {
            service: result.service,
            cost: result.cost,
            etd: result.etd,
        }
    }
}
