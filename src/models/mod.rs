use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Maximum number of listing images carried in a result
pub const MAX_IMAGES: usize = 5;

/// Structured fields scraped from one listing page
///
/// Always fully shaped: missing fields are empty strings, `0` or an empty
/// list, never absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub title: String,
    pub price: u64,
    pub description: String,
    pub date: String,
    pub location: String,
    pub images: Vec<String>,
    pub seller_name: String,
    pub source_url: String,
}

impl ExtractionResult {
    /// Default-filled result used when the page could not be scraped
    pub fn empty(source_url: &str, today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            price: 0,
            description: String::new(),
            date: iso_date(today),
            location: String::new(),
            images: Vec::new(),
            seller_name: String::new(),
            source_url: source_url.to_string(),
        }
    }
}

/// Result plus the non-fatal warnings collected while producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub data: ExtractionResult,
    pub warnings: Vec<String>,
}

/// Completed purchase form posted for PDF rendering
///
/// Mandatory fields are optional here so that absent, `null` and blank
/// values all reach [`VoucherRequest::is_complete`] instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoucherRequest {
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    pub seller_name: Option<String>,
    pub buyer_name: Option<String>,
    pub payment_method: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub source_url: Option<String>,
    pub title: Option<String>,
}

impl VoucherRequest {
    /// True when every mandatory field carries a usable value
    pub fn is_complete(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.trim().is_empty());

        filled(&self.date)
            && filled(&self.seller_name)
            && filled(&self.buyer_name)
            && filled(&self.payment_method)
            && self.price.is_some_and(|p| p.is_finite() && p > 0.0)
    }
}

/// Price sent as a JSON number or a numeric string; anything else is absent
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(price)
}

/// Calendar date in `YYYY-MM-DD` form
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
