use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

static FINNKODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)finnkode=(\d+)").unwrap());
static LONG_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{6,}").unwrap());
static ANY_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

const DIGITS: usize = 6;

/// Voucher number derived from the listing URL, e.g. `FK-123456`
///
/// Prefers the `finnkode` query parameter, then the first long digit run,
/// then any digits padded to six. Without a usable URL a random six-digit
/// number is used.
pub fn voucher_number(source_url: Option<&str>) -> String {
    let derived = source_url.and_then(|url| {
        if let Some(caps) = FINNKODE.captures(url) {
            return Some(caps[1].to_string());
        }
        if let Some(m) = LONG_NUMBER.find(url) {
            return Some(m.as_str()[..DIGITS].to_string());
        }
        ANY_NUMBER
            .find(url)
            .map(|m| format!("{:0>width$}", truncate(m.as_str()), width = DIGITS))
    });

    format!("FK-{}", derived.unwrap_or_else(random_number))
}

fn truncate(digits: &str) -> &str {
    &digits[..digits.len().min(DIGITS)]
}

fn random_number() -> String {
    (100_000 + Uuid::new_v4().as_u128() % 900_000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finnkode_parameter() {
        assert_eq!(
            voucher_number(Some("https://www.finn.no/bap/forsale/ad.html?finnkode=123456789")),
            "FK-123456789"
        );
    }

    #[test]
    fn test_long_number_truncated() {
        assert_eq!(
            voucher_number(Some("https://www.finn.no/recommerce/forsale/item/98765432")),
            "FK-987654"
        );
    }

    #[test]
    fn test_short_number_padded() {
        assert_eq!(voucher_number(Some("https://www.finn.no/item/42")), "FK-000042");
    }

    #[test]
    fn test_random_fallback() {
        for number in [voucher_number(None), voucher_number(Some("https://www.finn.no/"))] {
            let digits = number.strip_prefix("FK-").unwrap();
            assert_eq!(digits.len(), 6);
            let value: u32 = digits.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }
}
