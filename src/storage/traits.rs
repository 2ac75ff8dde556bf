//! Storage traits and error types
//!
//! This module defines the trait interface for page stores and
//! associated error types.

use crate::content::PageDocument;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),

    #[error("Store task did not complete: {0}")]
    Task(tokio::task::JoinError),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for page store implementations
///
/// A store keeps exactly one artifact per derived filename. Saving the same
/// name twice replaces the earlier content.
pub trait Storage: Send {
    /// Persists a page document and returns the path it was written to
    fn save(&mut self, document: &PageDocument) -> StorageResult<PathBuf>;

    /// Directory receiving the artifacts
    fn output_dir(&self) -> &Path;
}
