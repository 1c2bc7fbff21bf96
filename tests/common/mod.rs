#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use finn_kvittering::scrapers::{ListingExtractor, ListingFetcher};
use finn_kvittering::server::{build_app, AppState};
use finn_kvittering::voucher::PdfRenderer;
use finn_kvittering::ScrapeError;
use tower::ServiceExt;

pub const PDF_BYTES: &[u8] = b"%PDF-1.4 mock";

#[derive(Clone)]
enum MockResponse {
    Page(String),
    Status(u16),
    Unreachable,
}

/// Fetcher returning a canned page, status or transport failure and counting calls
#[derive(Clone)]
pub struct MockFetcher {
    response: MockResponse,
    calls: Arc<AtomicUsize>,
}

impl MockFetcher {
    fn new(response: MockResponse) -> Self {
        Self {
            response,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_page(html: &str) -> Self {
        Self::new(MockResponse::Page(html.to_string()))
    }

    pub fn with_status(status: u16) -> Self {
        Self::new(MockResponse::Status(status))
    }

    /// Fails the way reqwest does when no request can be sent
    pub fn unreachable() -> Self {
        Self::new(MockResponse::Unreachable)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingFetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, ScrapeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.response {
            MockResponse::Page(html) => Ok(html.clone()),
            MockResponse::Status(status) => Err(ScrapeError::HttpStatus(
                reqwest::StatusCode::from_u16(*status).unwrap(),
            )),
            MockResponse::Unreachable => {
                reqwest::Client::new().get("http://").build()?;
                unreachable!("request without a host must not build")
            }
        }
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

/// Renderer recording the documents it was asked to print
#[derive(Clone, Default)]
pub struct MockRenderer {
    pub documents: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

#[async_trait]
impl PdfRenderer for MockRenderer {
    async fn render(&self, html: &str) -> anyhow::Result<Vec<u8>> {
        if self.fail {
            anyhow::bail!("Chrome crashed");
        }
        self.documents.lock().unwrap().push(html.to_string());
        Ok(PDF_BYTES.to_vec())
    }
}

pub fn app(fetcher: MockFetcher, renderer: MockRenderer) -> Router {
    let extractor =
        ListingExtractor::new(Arc::new(fetcher), "https://www.finn.no", Duration::from_secs(5)).unwrap();

    build_app(AppState {
        extractor: Arc::new(extractor),
        renderer: Arc::new(renderer),
    })
}

/// POST `body` to `uri`, returning status, content type and raw body
pub async fn post(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, bytes.to_vec())
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let (status, _, bytes) = post(app, uri, body.to_string()).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
