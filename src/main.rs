use std::sync::Arc;

use anyhow::{Context, Result};
use finn_kvittering::scrapers::{DirectorySink, HttpFetcher, ListingExtractor};
use finn_kvittering::server::{build_app, AppState};
use finn_kvittering::voucher::ChromePdfRenderer;
use finn_kvittering::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,finn_kvittering=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🧾 Finn Kvittering - listing scraper and voucher generator");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded");

    let fetcher = HttpFetcher::new(config.fetch_timeout)?;
    let mut extractor = ListingExtractor::new(
        Arc::new(fetcher),
        &config.marketplace_base_url,
        config.fetch_timeout,
    )?;

    if let Some(dir) = &config.debug_dump_dir {
        info!("💾 Saving fetched listing pages to {}", dir.display());
        extractor = extractor.with_sink(Arc::new(DirectorySink::new(dir)));
    }

    let renderer = ChromePdfRenderer::new(config.chrome_path.clone(), config.render_timeout);

    let app = build_app(AppState {
        extractor: Arc::new(extractor),
        renderer: Arc::new(renderer),
    });

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);
    info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
