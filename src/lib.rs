pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;
pub mod server;
pub mod voucher;

pub use config::Config;
pub use error::ScrapeError;
