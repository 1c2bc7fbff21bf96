use axum::{body::Bytes, extract::Extension, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::ScrapeError;
use crate::models::{Extraction, ExtractionResult};
use crate::server::app::AppState;
use crate::server::error::ApiError;

const URL_REQUIRED: &str = "URL er påkrevd";
const UNSUPPORTED_SITE: &str = "URL må være fra Finn.no";
const UNSUPPORTED_SITE_HINT: &str = "Kun Finn.no-URLer støttes for øyeblikket";
const UNEXPECTED: &str = "En feil oppstod ved parsing av URL";

#[derive(Debug, Serialize)]
pub struct ParseUrlResponse {
    success: bool,
    data: ExtractionResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl From<Extraction> for ParseUrlResponse {
    fn from(extraction: Extraction) -> Self {
        Self {
            success: true,
            data: extraction.data,
            warnings: extraction.warnings,
        }
    }
}

/// Scrape a Finn.no listing into form fields
///
/// Extraction failures are not API failures: a page that cannot be fetched
/// still answers 200 with empty fields and a warning. Only a missing or
/// non-Finn URL (400) and a malformed body (500) are errors.
pub async fn parse_url_handler(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<ParseUrlResponse>, ApiError> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!("Malformed parse-url request body: {}", e);
        ApiError::Internal(UNEXPECTED.to_string())
    })?;

    let url = body
        .get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::bad_request(URL_REQUIRED))?;

    info!("Parsing listing URL {}", url);

    match state.extractor.extract(url).await {
        Ok(extraction) => Ok(Json(extraction.into())),
        Err(ScrapeError::InvalidUrl(url)) => {
            info!("Rejected unsupported URL {}", url);
            Err(ApiError::BadRequest {
                message: UNSUPPORTED_SITE.to_string(),
                warnings: Some(vec![UNSUPPORTED_SITE_HINT.to_string()]),
            })
        }
        Err(e) => {
            error!(error = %e, "Unexpected extraction failure");
            Err(ApiError::Internal(UNEXPECTED.to_string()))
        }
    }
}
