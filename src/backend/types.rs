//! Wire types exchanged with the comparison backend

use crate::normalize::BackendPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a comparison request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub category: String,
    #[serde(rename = "formData")]
    pub form_data: BackendPayload,
}

/// A single insurer offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub insurer: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub monthly_price: Option<f64>,
    #[serde(default)]
    pub annual_price: Option<f64>,
    #[serde(default)]
    pub coverage_level: Option<String>,
    #[serde(default)]
    pub guarantees: Vec<String>,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata returned alongside the offers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetadata {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_offers: Option<u32>,
}

/// Successful comparison response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub metadata: ComparisonMetadata,
}

impl ComparisonResponse {
    /// Cheapest offer by monthly price, offers without a price ignored
    pub fn cheapest(&self) -> Option<&Offer> {
        self.offers
            .iter()
            .filter(|o| o.monthly_price.is_some())
            .min_by(|a, b| {
                a.monthly_price
                    .partial_cmp(&b.monthly_price)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// Structured error body returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendErrorBody {
    pub code: String,
    pub message: String,
}
