use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Origin used to resolve root-relative image paths
pub const DEFAULT_MARKETPLACE_BASE_URL: &str = "https://www.finn.no";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub fetch_timeout: Duration,
    pub render_timeout: Duration,
    pub marketplace_base_url: String,
    pub chrome_path: Option<PathBuf>,
    pub debug_dump_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            fetch_timeout: Duration::from_secs(15),
            render_timeout: Duration::from_secs(30),
            marketplace_base_url: DEFAULT_MARKETPLACE_BASE_URL.to_string(),
            chrome_path: None,
            debug_dump_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .context("PORT must be a valid number")?,
            fetch_timeout: seconds_var("FETCH_TIMEOUT_SECS", defaults.fetch_timeout)?,
            render_timeout: seconds_var("RENDER_TIMEOUT_SECS", defaults.render_timeout)?,
            marketplace_base_url: env::var("MARKETPLACE_BASE_URL")
                .unwrap_or(defaults.marketplace_base_url),
            chrome_path: env::var("CHROME_PATH").ok().map(PathBuf::from),
            debug_dump_dir: env::var("DEBUG_DUMP_DIR").ok().map(PathBuf::from),
        })
    }
}

fn seconds_var(name: &str, default: Duration) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", name))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(default),
    }
}
