//! Crawl statistics
//!
//! This module collects the per-run counters reported when a crawl finishes.

use chrono::{DateTime, Utc};

/// Summary of a finished (or finishing) crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The site root the crawl started from
    pub base_url: String,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages fetched, extracted and written
    pub pages_saved: u64,

    /// Pages whose fetch failed (transport or HTTP status)
    pub pages_failed: u64,

    /// Pages fetched but not written to the page store
    pub store_failures: u64,

    /// In-scope links newly added to the frontier
    pub links_discovered: u64,

    /// Every URL dispatched to the fetcher, sorted
    pub visited: Vec<String>,
}

impl CrawlReport {
    /// Starts a report for a crawl beginning now
    pub fn start(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            started_at: Utc::now(),
            finished_at: None,
            pages_saved: 0,
            pages_failed: 0,
            store_failures: 0,
            links_discovered: 0,
            visited: Vec::new(),
        }
    }

    /// Total pages whose outcome is known
    pub fn pages_attempted(&self) -> u64 {
        self.pages_saved + self.pages_failed + self.store_failures
    }

    /// Percentage of attempted pages that were saved
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_attempted();
        if attempted == 0 {
            0.0
        } else {
            (self.pages_saved as f64 / attempted as f64) * 100.0
        }
    }

    /// Wall-clock duration, once the report is finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    pub fn was_visited(&self, url: &str) -> bool {
        self.visited.binary_search_by(|v| v.as_str().cmp(url)).is_ok()
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Statistics ===\n");

    println!("Site: {}", report.base_url);
    println!("Started: {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = report.duration_seconds() {
        println!("Duration: {} seconds", duration);
    }
    println!();

    println!("Pages:");
    println!("  Visited: {}", report.visited.len());
    println!("  Saved: {}", report.pages_saved);
    println!("  Fetch failures: {}", report.pages_failed);
    println!("  Store failures: {}", report.store_failures);
    println!("  Links queued: {}", report.links_discovered);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} pages saved)",
        report.success_rate(),
        report.pages_saved,
        report.pages_attempted()
    );
}
