//! Port definitions (traits) for external dependencies
//!
//! Adapters implement these traits to connect the domain to real
//! infrastructure.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Barcode, ProductRecord};

/// Error type for product lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider answered but has no product for this barcode
    #[error("Product not found for barcode {0}")]
    NotFound(Barcode),
    /// Timeout, transport failure, unexpected status or malformed payload
    #[error("Provider unreachable: {0}")]
    Unreachable(String),
}

/// Port for fetching product data from a food database
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Look up a single product by barcode
    async fn fetch_product(&self, barcode: &Barcode) -> Result<ProductRecord, GatewayError>;

    /// Short provider name, used in logs and diagnostics
    fn provider(&self) -> &'static str;
}
