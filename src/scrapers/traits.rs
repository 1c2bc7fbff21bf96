use crate::error::ScrapeError;
use async_trait::async_trait;

/// Retrieves raw listing markup for a URL
/// Lets the orchestrator run against a canned page in tests
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    /// Fetch the page body; non-2xx and transport failures are errors
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;

    /// Get the name of the fetcher
    fn source_name(&self) -> &'static str;
}

/// Diagnostic hook receiving every fetched page
pub trait MarkupSink: Send + Sync {
    fn capture(&self, url: &str, markup: &str);
}
