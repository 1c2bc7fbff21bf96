pub mod generate_pdf;
pub mod health;
pub mod parse_url;

pub use generate_pdf::generate_pdf_handler;
pub use health::health_handler;
pub use parse_url::parse_url_handler;
