use thiserror::Error;

/// Failures along the fetch → parse path of a listing extraction
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Input rejected before any network call
    #[error("Unsupported listing URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch listing page: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Listing page returned status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Fetching listing page timed out after {0} seconds")]
    Timeout(u64),

    #[error("Could not parse listing page: {0}")]
    Parse(String),
}

impl ScrapeError {
    /// Environmental failures degrade to manual entry instead of failing the request
    pub fn is_degradable(&self) -> bool {
        !matches!(self, ScrapeError::InvalidUrl(_))
    }
}
