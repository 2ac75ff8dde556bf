//! Configuration module for Site-Scribe
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! The file is optional: `Config::default()` describes a complete crawl.
//!
//! # Example
//!
//! ```no_run
//! use site_scribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scribe.toml")).unwrap();
//! println!("Writing pages to: {}", config.output.directory);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, read_config, read_config_with_hash,
};
pub use validation::validate;
