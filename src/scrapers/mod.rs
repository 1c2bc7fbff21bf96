pub mod debug;
pub mod fetcher;
pub mod fields;
pub mod orchestrator;
pub mod selectors;
pub mod seller;
pub mod traits;
pub mod types;
pub mod validate;

pub use debug::DirectorySink;
pub use fetcher::HttpFetcher;
pub use orchestrator::ListingExtractor;
pub use traits::{ListingFetcher, MarkupSink};
