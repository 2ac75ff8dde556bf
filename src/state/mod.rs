//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: lifecycle of a single crawl run (idle, running, done)

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
