use axum::{
    body::Bytes,
    extract::Extension,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::models::VoucherRequest;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::voucher::render_voucher;

const REQUIRED_FIELDS_MISSING: &str = "Påkrevde felter mangler";
const MALFORMED_BODY: &str = "En feil oppstod ved generering av PDF";

/// Render a completed purchase form as a PDF voucher
pub async fn generate_pdf_handler(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: VoucherRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Malformed generate-pdf request body: {}", e);
        ApiError::Internal(MALFORMED_BODY.to_string())
    })?;

    if !request.is_complete() {
        return Err(ApiError::bad_request(REQUIRED_FIELDS_MISSING));
    }

    let voucher = render_voucher(&request, state.renderer.as_ref())
        .await
        .map_err(|e| {
            error!(error = ?e, "PDF rendering failed");
            ApiError::Internal(e.to_string())
        })?;

    let headers = [
        (CONTENT_TYPE, "application/pdf".to_string()),
        (
            CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", voucher.file_name()),
        ),
    ];

    Ok((headers, voucher.pdf).into_response())
}
