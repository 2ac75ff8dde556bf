use crate::content::PageDocument;
use crate::storage::filename::derive_filename;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Writes one UTF-8 text file per page into a directory
#[derive(Debug)]
pub struct DirectoryStorage {
    dir: PathBuf,
    site_tag: String,
}

impl DirectoryStorage {
    /// Opens a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>, site_tag: impl Into<String>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        Ok(Self {
            dir,
            site_tag: site_tag.into(),
        })
    }

    /// Path a page URL would be written to
    pub fn path_for(&self, url: &Url) -> PathBuf {
        self.dir.join(derive_filename(url, &self.site_tag))
    }
}

impl Storage for DirectoryStorage {
    fn save(&mut self, document: &PageDocument) -> StorageResult<PathBuf> {
        let url = Url::parse(&document.source_url)
            .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", document.source_url, e)))?;
        let path = self.path_for(&url);

        fs::write(&path, document.text.as_bytes()).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(
            "Wrote {} bytes for {} to {}",
            document.text.len(),
            document.source_url,
            path.display()
        );

        Ok(path)
    }

    fn output_dir(&self) -> &Path {
        &self.dir
    }
}
