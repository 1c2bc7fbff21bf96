use std::fmt;

/// Progress of one extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStage {
    Fetching,
    Parsing,
    Extracting,
    /// All fields extracted from the page
    Assembled,
    /// Page unavailable; default-filled result plus a warning
    Degraded,
}

impl fmt::Display for ExtractionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionStage::Fetching => "fetching",
            ExtractionStage::Parsing => "parsing",
            ExtractionStage::Extracting => "extracting",
            ExtractionStage::Assembled => "assembled",
            ExtractionStage::Degraded => "degraded",
        };
        f.write_str(name)
    }
}

/// User-facing warnings, in Norwegian like the rest of the UI
pub mod warnings {
    pub const EXTRACTION_FAILED: &str = "Kunne ikke hente data automatisk fra annonsen. Dette kan skyldes at annonsen krever innlogging eller at scraping er blokkert. Du kan fylle ut feltene manuelt.";
    pub const MISSING_TITLE: &str = "Fant ikke tittel i annonsen. Fyll inn manuelt ved behov.";
    pub const MISSING_PRICE: &str = "Fant ikke pris i annonsen. Fyll inn prisen manuelt.";
    pub const MISSING_SELLER: &str = "Fant ikke selgerens navn i annonsen. Fyll inn selger manuelt.";
}
