use crate::error::ScrapeError;
use regex::Regex;
use std::sync::LazyLock;

/// Finn.no with or without `www.`, followed by nothing, a path, a query or a fragment
static FINN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://(www\.)?finn\.no(?:[/?#]|$)").unwrap());

/// Reject anything that is not a Finn.no listing URL before touching the network
pub fn validate_listing_url(url: &str) -> Result<(), ScrapeError> {
    if FINN_URL.is_match(url) {
        Ok(())
    } else {
        Err(ScrapeError::InvalidUrl(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_finn_urls() {
        for url in [
            "https://www.finn.no/recommerce/forsale/item/123456789",
            "http://finn.no/bap/forsale/ad.html?finnkode=123",
            "HTTPS://WWW.FINN.NO",
            "https://finn.no?q=sofa",
        ] {
            assert!(validate_listing_url(url).is_ok(), "{url}");
        }
    }

    #[test]
    fn test_rejects_other_hosts() {
        for url in [
            "https://example.com/item/1",
            "https://finn.no.evil.com/item/1",
            "ftp://finn.no/item/1",
            "finn.no/item/1",
            "",
        ] {
            assert!(
                matches!(validate_listing_url(url), Err(ScrapeError::InvalidUrl(_))),
                "{url}"
            );
        }
    }
}
