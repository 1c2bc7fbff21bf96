use crate::scrapers::traits::MarkupSink;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, warn};

/// Writes each fetched page into a debug directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_name(url: &str) -> String {
        let slug: String = url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .take(80)
            .collect();

        format!("{}_{}.html", Utc::now().format("%Y%m%dT%H%M%S%.3f"), slug)
    }
}

impl MarkupSink for DirectorySink {
    fn capture(&self, url: &str, markup: &str) {
        let path = self.dir.join(Self::file_name(url));

        // Diagnostics must never affect the extraction itself
        let written = std::fs::create_dir_all(&self.dir).and_then(|_| std::fs::write(&path, markup));

        match written {
            Ok(()) => info!("Saved page HTML to {} ({} bytes)", path.display(), markup.len()),
            Err(e) => warn!("Could not save page HTML to {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_filesystem_safe() {
        let name = DirectorySink::file_name("https://www.finn.no/item/123?x=1&y=2");

        assert!(name.ends_with("_www_finn_no_item_123_x_1_y_2.html"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_capture_writes_markup() {
        let dir = std::env::temp_dir().join(format!("finn-kvittering-{}", uuid::Uuid::new_v4()));
        let sink = DirectorySink::new(&dir);

        sink.capture("https://www.finn.no/item/1", "<html></html>");

        let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(files.len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
