//! Application setup and router.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::scrapers::ListingExtractor;
use crate::server::routes::{generate_pdf_handler, health_handler, parse_url_handler};
use crate::voucher::PdfRenderer;

/// Shared application state; immutable, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<ListingExtractor>,
    pub renderer: Arc<dyn PdfRenderer>,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/parse-url", post(parse_url_handler))
        .route("/api/generate-pdf", post(generate_pdf_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
