//! Open Food Facts product gateway

use async_trait::async_trait;
use halal_check_domain::{Barcode, GatewayError, ProductGateway, ProductRecord};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_USER_AGENT: &str = concat!("halal-check/", env!("CARGO_PKG_VERSION"));

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct OpenFoodFactsConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Reads products from the Open Food Facts v0 product API
pub struct OpenFoodFactsGateway {
    client: Client,
    base_url: Url,
}

impl OpenFoodFactsGateway {
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_config(OpenFoodFactsConfig::default())
    }

    pub fn with_config(config: OpenFoodFactsConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GatewayError::Unreachable(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Unreachable(format!(
                "invalid base URL '{}'",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| GatewayError::Unreachable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// `{base}/api/v0/product/{barcode}.json`, barcode encoded as one segment
    fn product_url(&self, barcode: &Barcode) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v0", "product"])
                .push(&format!("{}.json", barcode.as_str()));
        }
        url
    }
}

#[derive(Deserialize)]
struct ProductEnvelope {
    #[serde(default)]
    status: Value,
    #[serde(default)]
    product: Value,
}

/// Provider product payload; fields are loosely typed upstream
#[derive(Deserialize)]
struct ProviderProduct {
    #[serde(default)]
    product_name: Value,
    #[serde(default)]
    ingredients_text: Value,
    #[serde(default)]
    labels: Value,
}

impl From<ProviderProduct> for ProductRecord {
    fn from(product: ProviderProduct) -> Self {
        Self {
            name: non_empty_string(product.product_name),
            ingredients_text: non_empty_string(product.ingredients_text),
            labels: non_empty_string(product.labels),
        }
    }
}

fn non_empty_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Validate a decoded provider body into a product record
fn parse_envelope(barcode: &Barcode, body: Value) -> Result<ProductRecord, GatewayError> {
    if !body.is_object() {
        return Err(GatewayError::Unreachable(
            "provider response is not a JSON object".to_string(),
        ));
    }

    let envelope: ProductEnvelope = serde_json::from_value(body)
        .map_err(|e| GatewayError::Unreachable(format!("malformed provider response: {}", e)))?;

    // 1 and 1.0 both count as found
    if envelope.status.as_f64() != Some(1.0) || !envelope.product.is_object() {
        return Err(GatewayError::NotFound(barcode.clone()));
    }

    serde_json::from_value::<ProviderProduct>(envelope.product)
        .map(ProductRecord::from)
        .map_err(|_| GatewayError::NotFound(barcode.clone()))
}

#[async_trait]
impl ProductGateway for OpenFoodFactsGateway {
    async fn fetch_product(&self, barcode: &Barcode) -> Result<ProductRecord, GatewayError> {
        let url = self.product_url(barcode);
        tracing::debug!(url = %url, "Fetching product");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Unreachable("request timed out".to_string())
            } else {
                GatewayError::Unreachable(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(GatewayError::Unreachable(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Unreachable("request timed out".to_string())
            } else {
                GatewayError::Unreachable(format!("malformed provider response: {}", e))
            }
        })?;

        parse_envelope(barcode, body)
    }

    fn provider(&self) -> &'static str {
        "open_food_facts"
    }
}
