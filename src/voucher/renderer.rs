use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A4 in CSS pixels at 96 DPI
const A4_VIEWPORT: (u32, u32) = (794, 1123);
const A4_WIDTH_INCHES: f64 = 8.27;
const A4_HEIGHT_INCHES: f64 = 11.69;

/// Give layout a moment after load before printing
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Turns a complete HTML document into PDF bytes
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>>;
}

/// Renders through a fresh headless Chrome per document
pub struct ChromePdfRenderer {
    chrome_path: Option<PathBuf>,
    timeout: Duration,
}

impl ChromePdfRenderer {
    pub fn new(chrome_path: Option<PathBuf>, timeout: Duration) -> Self {
        Self { chrome_path, timeout }
    }

    fn render_blocking(chrome_path: Option<PathBuf>, html: &str) -> Result<Vec<u8>> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .path(chrome_path)
            .window_size(Some(A4_VIEWPORT))
            .args(vec![
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-accelerated-2d-canvas"),
                OsStr::new("--no-first-run"),
            ])
            .build()
            .context("Failed to build launch options")?;

        // Chrome exits when `browser` is dropped at the end of this function
        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open Chrome tab")?;

        let printed = print_document(&tab, html);

        if let Err(e) = tab.close(true) {
            warn!("Failed to close Chrome tab: {}", e);
        }

        printed
    }
}

fn print_document(tab: &Tab, html: &str) -> Result<Vec<u8>> {
    let data_url = format!("data:text/html;charset=utf-8;base64,{}", STANDARD.encode(html));

    tab.navigate_to(&data_url)
        .context("Failed to load voucher document")?;
    tab.wait_until_navigated()
        .context("Voucher document did not finish loading")?;

    thread::sleep(SETTLE_DELAY);

    let pdf = tab
        .print_to_pdf(Some(PrintToPdfOptions {
            print_background: Some(true),
            paper_width: Some(A4_WIDTH_INCHES),
            paper_height: Some(A4_HEIGHT_INCHES),
            margin_top: Some(0.0),
            margin_bottom: Some(0.0),
            margin_left: Some(0.0),
            margin_right: Some(0.0),
            prefer_css_page_size: Some(false),
            ..Default::default()
        }))
        .context("Failed to print voucher to PDF")?;

    debug!("Rendered {} bytes of PDF", pdf.len());
    Ok(pdf)
}

#[async_trait]
impl PdfRenderer for ChromePdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>> {
        let chrome_path = self.chrome_path.clone();
        let html = html.to_string();

        let job = tokio::task::spawn_blocking(move || Self::render_blocking(chrome_path, &html));

        tokio::time::timeout(self.timeout, job)
            .await
            .with_context(|| format!("PDF rendering timed out after {} seconds", self.timeout.as_secs()))?
            .context("PDF rendering task panicked")?
    }
}
