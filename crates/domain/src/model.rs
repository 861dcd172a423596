//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Provenance label attached to every check response
pub const DATA_SOURCE: &str = "Open Food Facts";

/// A product barcode as submitted by the client
///
/// Opaque: no checksum or length validation. The only requirement is that it
/// is not empty. The raw text, whitespace included, is kept verbatim for the
/// upstream lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Barcode(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarcodeError {
    #[error("barcode is empty")]
    Empty,
}

impl Barcode {
    pub fn parse(raw: impl Into<String>) -> Result<Self, BarcodeError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(BarcodeError::Empty);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Barcode {
    type Error = BarcodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Barcode> for String {
    fn from(barcode: Barcode) -> Self {
        barcode.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product data as returned by the provider, narrowed to the fields we use
///
/// Missing upstream fields are `None` and serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "product_name")]
    pub name: Option<String>,
    pub ingredients_text: Option<String>,
    pub labels: Option<String>,
}

/// Halal classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HalalStatus {
    Halal,
    Doubtful,
    Haram,
}

impl HalalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Halal => "HALAL",
            Self::Doubtful => "DOUBTFUL",
            Self::Haram => "HARAM",
        }
    }
}

impl fmt::Display for HalalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status plus a one-line reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub status: HalalStatus,
    pub reason: String,
}

/// A successful lookup: the product and how it was classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub barcode: Barcode,
    pub product: ProductRecord,
    pub classification: ClassificationResult,
}

/// JSON body returned by the check endpoint, on success and on failure
///
/// `product`, `status` and `reason` are either all set or all null. `error`
/// is only serialized when the lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub barcode: Option<String>,
    pub product: Option<ProductRecord>,
    pub status: Option<HalalStatus>,
    pub reason: Option<String>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResponse {
    pub fn success(report: CheckReport) -> Self {
        Self {
            barcode: Some(report.barcode.into()),
            product: Some(report.product),
            status: Some(report.classification.status),
            reason: Some(report.classification.reason),
            source: DATA_SOURCE.to_string(),
            error: None,
        }
    }

    pub fn failure(barcode: Option<&Barcode>, error: impl Into<String>) -> Self {
        Self {
            barcode: barcode.map(|b| b.as_str().to_string()),
            product: None,
            status: None,
            reason: None,
            source: DATA_SOURCE.to_string(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_barcode_rejects_empty() {
        assert_eq!(Barcode::parse(""), Err(BarcodeError::Empty));
    }

    #[test]
    fn test_whitespace_barcode_is_not_empty() {
        assert_eq!(Barcode::parse("   ").unwrap().as_str(), "   ");
    }

    #[test]
    fn test_barcode_kept_verbatim() {
        let barcode = Barcode::parse(" 0123 ").unwrap();
        assert_eq!(barcode.as_str(), " 0123 ");
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(serde_json::to_value(HalalStatus::Doubtful).unwrap(), json!("DOUBTFUL"));
        assert!(HalalStatus::Haram > HalalStatus::Doubtful);
        assert!(HalalStatus::Doubtful > HalalStatus::Halal);
    }

    #[test]
    fn test_failure_response_has_null_fields() {
        let value = serde_json::to_value(CheckResponse::failure(None, "boom")).unwrap();
        assert_eq!(
            value,
            json!({
                "barcode": null,
                "product": null,
                "status": null,
                "reason": null,
                "source": "Open Food Facts",
                "error": "boom"
            })
        );
    }

    #[test]
    fn test_success_response_omits_error_and_keeps_null_product_fields() {
        let report = CheckReport {
            barcode: Barcode::parse("42").unwrap(),
            product: ProductRecord {
                name: Some("Crackers".to_string()),
                ingredients_text: None,
                labels: None,
            },
            classification: ClassificationResult {
                status: HalalStatus::Halal,
                reason: "No flagged ingredients found".to_string(),
            },
        };

        let value = serde_json::to_value(CheckResponse::success(report)).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(
            value["product"],
            json!({"product_name": "Crackers", "ingredients_text": null, "labels": null})
        );
        assert_eq!(value["status"], json!("HALAL"));
        assert_eq!(value["barcode"], json!("42"));
    }
}
