//! Seller-name resolution.
//!
//! Finn has no stable seller-name selector, so the name is resolved by a
//! chain of heuristics ordered from most to least specific. The first one
//! producing a plausible name wins and later ones never run. Each heuristic
//! is a standalone function so it can be dropped or reordered in
//! [`STRATEGIES`] when the markup changes.

use crate::scrapers::selectors::{
    self as sel, ancestors, element_text, has_any_class, normalize_whitespace, own_text,
};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use tracing::debug;

const MAX_NAME_CHARS: usize = 100;

/// How far up from a marker text to look for the seller link
const CONTEXT_LEVELS: usize = 3;

const PROFILE_IMAGE_MARKERS: &[&str] = &["profilbilde", "profile"];
const NAME_TYPOGRAPHY_CLASSES: &[&str] = &["t3", "t4", "font-bold"];
const MEMBERSHIP_MARKERS: &[&str] = &["har vært på finn", "på finn siden"];
const VERIFICATION_MARKERS: &[&str] = &["verifisert", "bankid", "verified"];

static PROFILE_ALT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:profilbilde|profile\s+picture|profile\s+image)\s+(?:for|til|of)\s+([^,\n]+)")
        .unwrap()
});

/// "for" followed by two or more capitalized words
static FOR_CAPITALIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bfor\s+(\p{Lu}[\p{L}'.-]*(?:[ \t]+\p{Lu}[\p{L}'.-]*)+)").unwrap()
});

pub type Strategy = fn(&Html) -> Option<String>;

/// Heuristics in priority order
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("profile_image_alt", from_profile_image_alt),
    ("seller_name_attribute", from_seller_name_attribute),
    ("membership_context", from_membership_context),
    ("typed_profile_link", from_typed_profile_link),
    ("profile_link", from_profile_link),
    ("typography_link", from_typography_link),
    ("verification_badge", from_verification_badge),
];

/// Best-effort seller name, empty when no heuristic matches
pub fn resolve_seller_name(document: &Html) -> String {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            let found = strategy(document).and_then(|candidate| plausible(&candidate));
            if let Some(seller) = &found {
                debug!(strategy = name, seller = %seller, "Resolved seller name");
            }
            found
        })
        .unwrap_or_default()
}

/// Normalized candidate if it looks like a name: has a letter, 1-100 chars
fn plausible(candidate: &str) -> Option<String> {
    let name = normalize_whitespace(candidate);
    let len = name.chars().count();

    if (1..=MAX_NAME_CHARS).contains(&len) && name.chars().any(char::is_alphabetic) {
        Some(name)
    } else {
        None
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle))
}

fn is_profile_href(anchor: ElementRef<'_>) -> bool {
    anchor
        .value()
        .attr("href")
        .is_some_and(|href| href.contains("/profile") || href.contains("userId="))
}

fn has_profile_class(anchor: ElementRef<'_>) -> bool {
    anchor
        .value()
        .attr("class")
        .is_some_and(|class| class.to_lowercase().contains("profile"))
}

fn has_name_typography(anchor: ElementRef<'_>) -> bool {
    has_any_class(anchor, NAME_TYPOGRAPHY_CLASSES)
}

fn anchor_name(anchor: ElementRef<'_>) -> Option<String> {
    plausible(&element_text(anchor))
}

fn anchors(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.select(&sel::ANCHOR)
}

/// Rendered elements whose own text mentions one of `markers`
fn marked_elements<'a>(
    document: &'a Html,
    markers: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    document
        .select(&sel::ANY)
        .filter(|el| !matches!(el.value().name(), "script" | "style" | "noscript"))
        .filter(move |el| contains_any(&own_text(*el), markers))
}

/// Name from text such as "Profilbilde for Kristin Granlund"
fn name_from_alt(alt: &str) -> Option<String> {
    let raw = PROFILE_ALT
        .captures(alt)
        .or_else(|| FOR_CAPITALIZED.captures(alt))
        .and_then(|caps| caps.get(1))?
        .as_str();

    raw.split([',', '\n']).next().and_then(plausible)
}

fn from_profile_image_alt(document: &Html) -> Option<String> {
    document.select(&sel::IMAGE).find_map(|img| {
        let alt = img.value().attr("alt").unwrap_or_default();
        let src = img.value().attr("src").unwrap_or_default();

        if contains_any(alt, PROFILE_IMAGE_MARKERS) || contains_any(src, PROFILE_IMAGE_MARKERS) {
            name_from_alt(alt)
        } else {
            None
        }
    })
}

fn from_seller_name_attribute(document: &Html) -> Option<String> {
    [&sel::SELLER_NAME_ATTR, &sel::PROFILE_NAME]
        .into_iter()
        .find_map(|selector| document.select(selector).find_map(|el| plausible(&element_text(el))))
}

fn from_membership_context(document: &Html) -> Option<String> {
    marked_elements(document, MEMBERSHIP_MARKERS).find_map(|marker| {
        ancestors(marker, CONTEXT_LEVELS).find_map(|container| {
            container
                .select(&sel::ANCHOR)
                .filter(|a| has_profile_class(*a) || is_profile_href(*a))
                .find_map(anchor_name)
        })
    })
}

fn from_typed_profile_link(document: &Html) -> Option<String> {
    anchors(document)
        .filter(|a| has_name_typography(*a) && is_profile_href(*a))
        .find_map(anchor_name)
}

fn from_profile_link(document: &Html) -> Option<String> {
    anchors(document)
        .filter(|a| is_profile_href(*a))
        .find_map(anchor_name)
}

fn from_typography_link(document: &Html) -> Option<String> {
    let styled: Vec<ElementRef<'_>> = anchors(document).filter(|a| has_name_typography(*a)).collect();

    let linked = || styled.iter().filter(|a| is_profile_href(**a)).find_map(|a| anchor_name(*a));
    let full_name = || {
        styled
            .iter()
            .filter_map(|a| anchor_name(*a))
            .find(|name| name.contains(' '))
    };
    let any = || styled.iter().find_map(|a| anchor_name(*a));

    linked().or_else(full_name).or_else(any)
}

fn from_verification_badge(document: &Html) -> Option<String> {
    marked_elements(document, VERIFICATION_MARKERS).find_map(|badge| {
        ancestors(badge, CONTEXT_LEVELS)
            .find_map(|container| container.select(&sel::ANCHOR).find_map(anchor_name))
    })
}
