//! Storage module for persisting extracted pages
//!
//! This module handles:
//! - Deriving a stable filename from each page URL
//! - Writing one text artifact per page into the output directory
//!
//! The output directory is the only interface the downstream indexer reads.

mod directory;
mod filename;
mod traits;

pub use directory::DirectoryStorage;
pub use filename::{default_filename, derive_filename};
pub use traits::{Storage, StorageError, StorageResult};

use crate::config::OutputConfig;

/// Opens the page store described by the output configuration
pub fn open_storage(config: &OutputConfig) -> StorageResult<DirectoryStorage> {
    DirectoryStorage::new(&config.directory, config.site_tag.clone())
}
