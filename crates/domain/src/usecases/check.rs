//! Barcode check use case - validate, fetch, classify

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::{
    model::{Barcode, CheckReport, CheckResponse},
    ports::{GatewayError, ProductGateway},
    usecases::classify::classify,
};

/// Ways a check can fail, each mapped to a fixed client-facing message
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("Invalid or missing barcode")]
    InvalidInput,
    #[error("Product not found for barcode {0}")]
    NotFound(Barcode),
    #[error("Failed to fetch product data")]
    UpstreamUnreachable(Barcode),
}

impl CheckError {
    /// The barcode the request carried, if it got past validation
    pub fn barcode(&self) -> Option<&Barcode> {
        match self {
            Self::InvalidInput => None,
            Self::NotFound(barcode) | Self::UpstreamUnreachable(barcode) => Some(barcode),
        }
    }

    pub fn to_response(&self) -> CheckResponse {
        CheckResponse::failure(self.barcode(), self.to_string())
    }
}

/// Pull the barcode out of a raw request body
///
/// Anything other than an object with a non-empty string `barcode` is invalid.
pub fn extract_barcode(body: Option<&Value>) -> Result<Barcode, CheckError> {
    let raw = body
        .and_then(|body| body.get("barcode"))
        .and_then(Value::as_str)
        .ok_or(CheckError::InvalidInput)?;

    Barcode::parse(raw).map_err(|_| CheckError::InvalidInput)
}

/// Use case for checking a barcode against the product database
pub struct CheckUseCase<G: ProductGateway + ?Sized> {
    gateway: Arc<G>,
}

impl<G: ProductGateway + ?Sized> Clone for CheckUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G: ProductGateway + ?Sized> CheckUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Validate a raw request body, then run the check
    pub async fn handle(&self, body: Option<&Value>) -> Result<CheckReport, CheckError> {
        let barcode = extract_barcode(body)?;
        self.check(barcode).await
    }

    /// Fetch the product and classify its ingredients
    pub async fn check(&self, barcode: Barcode) -> Result<CheckReport, CheckError> {
        tracing::info!(
            barcode = %barcode,
            provider = self.gateway.provider(),
            "Checking product"
        );

        let product = match self.gateway.fetch_product(&barcode).await {
            Ok(product) => product,
            Err(GatewayError::NotFound(_)) => {
                tracing::info!(barcode = %barcode, "Product not found");
                return Err(CheckError::NotFound(barcode));
            }
            Err(GatewayError::Unreachable(detail)) => {
                tracing::warn!(barcode = %barcode, error = %detail, "Product lookup failed");
                return Err(CheckError::UpstreamUnreachable(barcode));
            }
        };

        let classification = classify(product.ingredients_text.as_deref());

        tracing::info!(
            barcode = %barcode,
            status = %classification.status,
            reason = %classification.reason,
            "Product classified"
        );

        Ok(CheckReport {
            barcode,
            product,
            classification,
        })
    }

    /// Run the check and shape the result into the response body
    pub async fn respond(&self, body: Option<&Value>) -> (Option<CheckError>, CheckResponse) {
        match self.handle(body).await {
            Ok(report) => (None, CheckResponse::success(report)),
            Err(error) => {
                let response = error.to_response();
                (Some(error), response)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HalalStatus, ProductRecord};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeGateway {
        result: Result<ProductRecord, GatewayError>,
        calls: AtomicUsize,
    }

    impl FakeGateway {
        fn returning(result: Result<ProductRecord, GatewayError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ProductGateway for FakeGateway {
        async fn fetch_product(&self, _barcode: &Barcode) -> Result<ProductRecord, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }

        fn provider(&self) -> &'static str {
            "fake"
        }
    }

    fn sample_product() -> ProductRecord {
        ProductRecord {
            name: Some("Gummy Bears".to_string()),
            ingredients_text: Some("Glucose syrup, sugar, Gelatine, citric acid".to_string()),
            labels: None,
        }
    }

    #[test]
    fn test_extract_barcode_rejects_invalid_bodies() {
        let bodies = [
            None,
            Some(json!({})),
            Some(json!({"barcode": ""})),
            Some(json!({"barcode": 737628064502u64})),
            Some(json!({"barcode": null})),
            Some(json!(["737628064502"])),
            Some(json!("737628064502")),
        ];

        for body in bodies {
            assert_eq!(
                extract_barcode(body.as_ref()),
                Err(CheckError::InvalidInput),
                "body: {:?}",
                body
            );
        }
    }

    #[test]
    fn test_extract_barcode_accepts_string() {
        let body = json!({"barcode": "737628064502"});
        assert_eq!(
            extract_barcode(Some(&body)).unwrap().as_str(),
            "737628064502"
        );
    }

    #[tokio::test]
    async fn test_whitespace_barcode_reaches_gateway() {
        let barcode = Barcode::parse("   ").unwrap();
        let gateway = FakeGateway::returning(Err(GatewayError::NotFound(barcode.clone())));
        let usecase = CheckUseCase::new(gateway.clone());

        let (error, response) = usecase.respond(Some(&json!({"barcode": "   "}))).await;

        assert_eq!(error, Some(CheckError::NotFound(barcode)));
        assert_eq!(response.barcode.as_deref(), Some("   "));
        assert_eq!(
            response.error.as_deref(),
            Some("Product not found for barcode    ")
        );
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_check_classifies_product() {
        let gateway = FakeGateway::returning(Ok(sample_product()));
        let usecase = CheckUseCase::new(gateway.clone());

        let report = usecase
            .handle(Some(&json!({"barcode": "4001686301265"})))
            .await
            .unwrap();

        assert_eq!(report.barcode.as_str(), "4001686301265");
        assert_eq!(report.classification.status, HalalStatus::Doubtful);
        assert_eq!(report.classification.reason, "Contains gelatin");
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_gateway() {
        let gateway = FakeGateway::returning(Ok(sample_product()));
        let usecase = CheckUseCase::new(gateway.clone());

        let (error, response) = usecase.respond(Some(&json!({}))).await;

        assert_eq!(error, Some(CheckError::InvalidInput));
        assert_eq!(response.error.as_deref(), Some("Invalid or missing barcode"));
        assert!(response.barcode.is_none());
        assert!(response.product.is_none());
        assert!(response.status.is_none());
        assert!(response.reason.is_none());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_descriptive_error() {
        let barcode = Barcode::parse("000000000000").unwrap();
        let gateway = FakeGateway::returning(Err(GatewayError::NotFound(barcode.clone())));
        let usecase = CheckUseCase::new(gateway);

        let (error, response) = usecase
            .respond(Some(&json!({"barcode": "000000000000"})))
            .await;

        assert_eq!(error, Some(CheckError::NotFound(barcode)));
        assert_eq!(
            response.error.as_deref(),
            Some("Product not found for barcode 000000000000")
        );
        assert_eq!(response.barcode.as_deref(), Some("000000000000"));
        assert!(response.product.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_hides_upstream_detail() {
        let gateway =
            FakeGateway::returning(Err(GatewayError::Unreachable("connection refused".into())));
        let usecase = CheckUseCase::new(gateway);

        let (error, response) = usecase.respond(Some(&json!({"barcode": "123"}))).await;

        assert!(matches!(error, Some(CheckError::UpstreamUnreachable(_))));
        assert_eq!(response.error.as_deref(), Some("Failed to fetch product data"));
        assert!(response.status.is_none());
    }

    #[tokio::test]
    async fn test_missing_product_fields_stay_null() {
        let gateway = FakeGateway::returning(Ok(ProductRecord::default()));
        let usecase = CheckUseCase::new(gateway);

        let (error, response) = usecase.respond(Some(&json!({"barcode": "123"}))).await;
        assert!(error.is_none());

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value["product"],
            json!({"product_name": null, "ingredients_text": null, "labels": null})
        );
        assert_eq!(value["status"], json!("HALAL"));
        assert_eq!(value["reason"], json!("No flagged ingredients found"));
        assert!(value.get("error").is_none());
    }
}
