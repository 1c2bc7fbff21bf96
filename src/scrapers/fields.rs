//! Per-field extractors. Each tries its selectors in priority order and
//! falls through to the next one when a strategy yields nothing.

use crate::models::{iso_date, MAX_IMAGES};
use crate::scrapers::selectors::{self as sel, element_text, first_text, is_leaf};
use chrono::NaiveDate;
use regex::Regex;
use scraper::Html;
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

/// Digit run (spaces and non-breaking spaces allowed inside) right before `kr`
static PRICE_WITH_KR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d\s\u{00A0}]*)kr").unwrap());

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d\s\u{00A0}]*").unwrap());

static HAS_KR_AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\d+\s*kr").unwrap());

pub fn extract_title(document: &Html) -> String {
    first_text(document, &[&sel::AD_TITLE, &sel::HEADING, &sel::DOCUMENT_TITLE]).unwrap_or_default()
}

/// Listing price in whole kroner, `0` when nothing parseable is found
pub fn extract_price(document: &Html) -> u64 {
    price_text(document)
        .map(|text| parse_price(&text))
        .unwrap_or(0)
}

fn price_text(document: &Html) -> Option<String> {
    first_text(
        document,
        &[&sel::PRICE_HEADING, &sel::PRICE_ATTR, &sel::PRICE_T3, &sel::PRICE_H2],
    )
    .or_else(|| {
        document
            .select(&sel::ANY)
            .filter(|el| is_leaf(*el))
            .map(element_text)
            .find(|text| HAS_KR_AMOUNT.is_match(text))
    })
}

/// Parse "4 500 kr", "120\u{a0}000 kr" or a bare "4500" into whole kroner
pub fn parse_price(text: &str) -> u64 {
    let digits = PRICE_WITH_KR
        .captures(text)
        .and_then(|caps| caps.get(1))
        .or_else(|| BARE_NUMBER.find(text))
        .map(|m| m.as_str())
        .unwrap_or_default();

    let digits: String = digits.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

pub fn extract_description(document: &Html) -> String {
    first_text(
        document,
        &[
            &sel::AD_DESCRIPTION,
            &sel::ABOUT_SECTION_TEXT,
            &sel::PRE_WRAP,
            &sel::OBJECT_DESCRIPTION,
        ],
    )
    .unwrap_or_default()
}

pub fn extract_location(document: &Html) -> String {
    first_text(document, &[&sel::LOCATION_ATTR])
        .or_else(|| document.select(&sel::META_ROW).next().map(element_text))
        .unwrap_or_default()
}

/// Publication date text, or `today` when the page shows none
pub fn extract_date(document: &Html, today: NaiveDate) -> String {
    first_text(document, &[&sel::PUBLISHED_DATE])
        .or_else(|| document.select(&sel::META_ROW).last().map(element_text))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| iso_date(today))
}

/// Absolute, deduplicated ad image URLs in document order, at most five
pub fn extract_images(document: &Html, base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();

    document
        .select(&sel::AD_IMAGE)
        .filter_map(|img| {
            let attrs = img.value();
            attrs
                .attr("src")
                .filter(|src| !src.trim().is_empty())
                .or_else(|| attrs.attr("data-src"))
                .map(str::trim)
                .filter(|src| !src.is_empty())
                .and_then(|src| absolutize(base, src))
        })
        .filter(|src| seen.insert(src.clone()))
        .take(MAX_IMAGES)
        .collect()
}

fn absolutize(base: &Url, src: &str) -> Option<String> {
    if src.starts_with("http://") || src.starts_with("https://") {
        return Some(src.to_string());
    }
    base.join(src).ok().map(String::from)
}
