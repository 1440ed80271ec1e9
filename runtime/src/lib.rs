//! title-scout: fetch a fixed list of pages concurrently and pull one title
//! out of each, returning results in input order.
//!
//! - [`extraction`] holds the first-match tree search and the title extractor.
//! - [`acquisition`] holds the fetch seam and its reqwest implementation.
//! - [`pool`] holds the per-identifier workers and the ordered fan-in.

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod pool;

pub use acquisition::http_client::{FetchedPage, Fetcher, HttpClient};
pub use config::ScrapeConfig;
pub use extraction::title::{ScrapeResult, TitleOutcome, TitleTarget};
pub use pool::orchestrator::{scrape_all, scrape_ordered};
