use crate::error::ScrapeError;
use crate::models::{Extraction, ExtractionResult};
use crate::scrapers::fields::{
    extract_date, extract_description, extract_images, extract_location, extract_price,
    extract_title,
};
use crate::scrapers::seller::resolve_seller_name;
use crate::scrapers::traits::{ListingFetcher, MarkupSink};
use crate::scrapers::types::{warnings, ExtractionStage};
use crate::scrapers::validate::validate_listing_url;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Fetches a listing and turns it into an [`Extraction`], degrading to a
/// default-filled result when the page cannot be fetched or parsed
pub struct ListingExtractor {
    fetcher: Arc<dyn ListingFetcher>,
    sink: Option<Arc<dyn MarkupSink>>,
    base_url: Url,
    fetch_timeout: Duration,
}

impl ListingExtractor {
    pub fn new(fetcher: Arc<dyn ListingFetcher>, base_url: &str, fetch_timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid marketplace base URL")?;

        Ok(Self {
            fetcher,
            sink: None,
            base_url,
            fetch_timeout,
        })
    }

    /// Hand every fetched page to `sink` before parsing
    pub fn with_sink(mut self, sink: Arc<dyn MarkupSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Extract a listing. Only a rejected URL is an error; fetch and parse
    /// failures produce a degraded result with a warning.
    pub async fn extract(&self, url: &str) -> Result<Extraction, ScrapeError> {
        validate_listing_url(url)?;

        let today = Utc::now().date_naive();

        match self.scrape(url, today).await {
            Ok(data) => {
                let warnings = missing_field_warnings(&data);
                info!(
                    stage = %ExtractionStage::Assembled,
                    warnings = warnings.len(),
                    "Extracted listing {}",
                    url
                );
                Ok(Extraction { data, warnings })
            }
            Err(e) if e.is_degradable() => {
                warn!(stage = %ExtractionStage::Degraded, error = %e, "Extraction failed for {}", url);
                Ok(Extraction {
                    data: ExtractionResult::empty(url, today),
                    warnings: vec![warnings::EXTRACTION_FAILED.to_string()],
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn scrape(&self, url: &str, today: NaiveDate) -> Result<ExtractionResult, ScrapeError> {
        debug!(stage = %ExtractionStage::Fetching, source = self.fetcher.source_name(), "Fetching {}", url);

        let markup = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(url))
            .await
            .map_err(|_| ScrapeError::Timeout(self.fetch_timeout.as_secs()))??;

        if let Some(sink) = &self.sink {
            sink.capture(url, &markup);
        }

        debug!(stage = %ExtractionStage::Parsing, bytes = markup.len());
        let document = parse_listing(&markup)?;

        debug!(stage = %ExtractionStage::Extracting);
        Ok(extract_listing(&document, url, &self.base_url, today))
    }
}

/// Parse fetched markup; a body without any markup is a parse failure
pub fn parse_listing(markup: &str) -> Result<Html, ScrapeError> {
    if markup.trim().is_empty() {
        return Err(ScrapeError::Parse("empty response body".to_string()));
    }
    if !markup.contains('<') {
        return Err(ScrapeError::Parse("response body is not HTML".to_string()));
    }

    Ok(Html::parse_document(markup))
}

/// Run every field extractor over one parsed page
pub fn extract_listing(document: &Html, source_url: &str, base: &Url, today: NaiveDate) -> ExtractionResult {
    ExtractionResult {
        title: extract_title(document),
        price: extract_price(document),
        description: extract_description(document),
        date: extract_date(document, today),
        location: extract_location(document),
        images: extract_images(document, base),
        seller_name: resolve_seller_name(document),
        source_url: source_url.to_string(),
    }
}

fn missing_field_warnings(data: &ExtractionResult) -> Vec<String> {
    [
        (data.title.is_empty(), warnings::MISSING_TITLE),
        (data.price == 0, warnings::MISSING_PRICE),
        (data.seller_name.is_empty(), warnings::MISSING_SELLER),
    ]
    .into_iter()
    .filter(|(missing, _)| *missing)
    .map(|(_, warning)| warning.to_string())
    .collect()
}
