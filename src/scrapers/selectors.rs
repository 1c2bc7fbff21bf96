//! CSS selectors and text helpers for Finn.no listing pages.
//!
//! Finn changes its markup without notice. When a field stops being found,
//! capture a page with `DEBUG_DUMP_DIR`, update the selectors here and add a
//! fixture to the extractor tests.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

// Every selector is a literal, so parsing cannot fail at runtime
macro_rules! selectors {
    ($($(#[$meta:meta])* $name:ident = $css:literal;)*) => {
        $(
            $(#[$meta])*
            pub static $name: LazyLock<Selector> =
                LazyLock::new(|| Selector::parse($css).unwrap());
        )*
    };
}

selectors! {
    AD_TITLE = r#"h1[data-testid="ad-title"]"#;
    HEADING = "h1";
    DOCUMENT_TITLE = "title";

    PRICE_HEADING = r#"h2[data-testid="price"]"#;
    PRICE_ATTR = r#"[data-testid="price"]"#;
    PRICE_T3 = ".u-t3";
    PRICE_H2 = ".h2";

    AD_DESCRIPTION = r#"[data-testid="ad-description"]"#;
    ABOUT_SECTION_TEXT = ".about-section-default .whitespace-pre-wrap";
    PRE_WRAP = ".whitespace-pre-wrap";
    OBJECT_DESCRIPTION = ".object-description";

    LOCATION_ATTR = r#"[data-testid="location"]"#;
    PUBLISHED_DATE = r#"[data-testid="published-date"]"#;
    /// Metadata rows; first one usually holds the address, last one the date
    META_ROW = ".u-mt16";

    AD_IMAGE = r#"img[data-testid="ad-image"]"#;

    SELLER_NAME_ATTR = r#"[data-testid="seller-name"]"#;
    PROFILE_NAME = ".profile-name";
    IMAGE = "img";
    ANCHOR = "a";
    ANY = "*";
}

/// Trimmed text content of an element
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collapse whitespace runs into single spaces and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First non-empty text found by trying `selectors` in order
pub fn first_text(document: &Html, selectors: &[&LazyLock<Selector>]) -> Option<String> {
    selectors.iter().find_map(|sel| {
        document
            .select(sel)
            .map(element_text)
            .find(|text| !text.is_empty())
    })
}

/// Element without element children
pub fn is_leaf(element: ElementRef<'_>) -> bool {
    !element.children().any(|child| child.value().is_element())
}

/// Text held directly by an element, ignoring its descendants' text
pub fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| t.to_string()))
        .collect()
}

/// Whitespace-separated tokens of the `class` attribute
pub fn has_any_class(element: ElementRef<'_>, classes: &[&str]) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|attr| attr.split_whitespace().any(|c| classes.contains(&c)))
}

/// Up to `levels` enclosing elements below `<body>`, nearest first
pub fn ancestors(element: ElementRef<'_>, levels: usize) -> impl Iterator<Item = ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|el| !matches!(el.value().name(), "body" | "html"))
        .take(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Ola \n\t Nordmann  "), "Ola Nordmann");
        assert_eq!(normalize_whitespace("Kari\u{00A0} Hansen"), "Kari Hansen");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_first_text_skips_empty_matches() {
        let doc = Html::parse_document("<h1> </h1><h1>Sofa</h1><title>Finn</title>");

        assert_eq!(first_text(&doc, &[&AD_TITLE, &HEADING]), Some("Sofa".to_string()));
        assert_eq!(first_text(&doc, &[&AD_TITLE]), None);
    }

    #[test]
    fn test_own_text_and_leaf() {
        let doc = Html::parse_fragment(r#"<div id="x">Har vært på FINN <span>siden 2015</span></div>"#);
        let sel = Selector::parse("#x").unwrap();
        let div = doc.select(&sel).next().unwrap();

        assert_eq!(own_text(div).trim(), "Har vært på FINN");
        assert!(!is_leaf(div));
    }

    #[test]
    fn test_has_any_class_matches_tokens() {
        let doc = Html::parse_fragment(r#"<a class="link t4 bold">x</a>"#);
        let a = doc.select(&ANCHOR).next().unwrap();

        assert!(has_any_class(a, &["t4"]));
        assert!(!has_any_class(a, &["t"]));
    }

    #[test]
    fn test_ancestors_stop_below_body() {
        let doc = Html::parse_document(
            r#"<html><body><section><div><span id="x">Verifisert</span></div></section></body></html>"#,
        );
        let sel = Selector::parse("#x").unwrap();
        let span = doc.select(&sel).next().unwrap();

        let names: Vec<&str> = ancestors(span, 5).map(|el| el.value().name()).collect();
        assert_eq!(names, ["div", "section"]);
        assert_eq!(ancestors(span, 1).count(), 1);
    }
}
