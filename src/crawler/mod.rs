//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind a global polite gate
//! - HTML parsing, text extraction and link discovery
//! - The frontier of visited and pending targets
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, Coordinator, PageOutcome};
pub use fetcher::{build_http_client, build_polite_gate, FetchError, FetchedPage, Fetcher};
pub use frontier::Frontier;
pub use parser::{parse_page, ParsedPage};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::ScribeError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the page store (creating the output directory)
/// 2. Build the HTTP client and polite gate
/// 3. Seed the frontier with the base URL
/// 4. Fetch, extract and save pages until the frontier is exhausted
/// 5. Return the run's statistics
pub async fn crawl(config: Config) -> Result<CrawlReport, ScribeError> {
    run_crawl(config).await
}
