//! Stub product gateway for testing and offline mode

use async_trait::async_trait;
use halal_check_domain::{Barcode, GatewayError, ProductGateway, ProductRecord};
use std::collections::HashMap;

/// In-memory gateway serving a fixed set of products
#[derive(Debug, Clone, Default)]
pub struct StubProductGateway {
    products: HashMap<String, ProductRecord>,
    unreachable: bool,
}

impl StubProductGateway {
    /// A gateway that knows no products
    pub fn empty() -> Self {
        Self::default()
    }

    /// A gateway that fails every lookup as unreachable
    pub fn unreachable() -> Self {
        Self {
            products: HashMap::new(),
            unreachable: true,
        }
    }

    /// Register a product under a barcode
    pub fn with_product(mut self, barcode: impl Into<String>, product: ProductRecord) -> Self {
        self.products.insert(barcode.into(), product);
        self
    }

    /// A gateway seeded with a few well-known sample products
    pub fn with_samples() -> Self {
        Self::empty()
            .with_product(
                "737628064502",
                ProductRecord {
                    name: Some("Thai peanut noodle kit".to_string()),
                    ingredients_text: Some(
                        "Rice noodles, peanuts, sugar, salt, garlic, chili".to_string(),
                    ),
                    labels: None,
                },
            )
            .with_product(
                "4001686301265",
                ProductRecord {
                    name: Some("Gummy bears".to_string()),
                    ingredients_text: Some(
                        "Glucose syrup, sugar, gelatine, dextrose, citric acid".to_string(),
                    ),
                    labels: None,
                },
            )
            .with_product(
                "5000112637922",
                ProductRecord {
                    name: Some("Smoked bacon crisps".to_string()),
                    ingredients_text: Some("Potatoes, sunflower oil, bacon flavouring".to_string()),
                    labels: None,
                },
            )
    }
}

#[async_trait]
impl ProductGateway for StubProductGateway {
    async fn fetch_product(&self, barcode: &Barcode) -> Result<ProductRecord, GatewayError> {
        if self.unreachable {
            return Err(GatewayError::Unreachable("stub gateway offline".to_string()));
        }

        self.products
            .get(barcode.as_str())
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(barcode.clone()))
    }

    fn provider(&self) -> &'static str {
        "stub"
    }
}
