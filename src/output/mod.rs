//! Output module for crawl reporting
//!
//! The page text itself is written by the storage module; this module only
//! covers the end-of-run statistics shown to the operator.

pub mod stats;

pub use stats::{print_report, CrawlReport};
