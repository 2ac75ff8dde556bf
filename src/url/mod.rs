//! URL handling module for Site-Scribe
//!
//! This module provides URL normalization, authority extraction and the
//! in-scope classification that bounds a crawl to a single site.

mod domain;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::extract_authority;
pub use normalize::{normalize_url, resolve_href, CrawlTarget};

/// Binary asset extensions excluded when no configuration is supplied
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "gif"];

/// Decides whether discovered URLs belong to the crawl
///
/// A URL is in scope when its network authority equals the base URL's and
/// neither its path nor its query ends with an excluded extension. The check
/// is pure: no I/O, no state.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    base_authority: Option<String>,
    /// Lowercased suffixes, each including the leading dot
    excluded_suffixes: Vec<String>,
}

impl UrlClassifier {
    /// Builds a classifier for the site rooted at `base`
    ///
    /// Extensions may be given with or without a leading dot and in any case.
    pub fn new<S: AsRef<str>>(base: &Url, excluded_extensions: &[S]) -> Self {
        let excluded_suffixes = excluded_extensions
            .iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext))
            .collect();

        Self {
            base_authority: extract_authority(base),
            excluded_suffixes,
        }
    }

    /// Builds a classifier with the default extension denylist
    pub fn with_defaults(base: &Url) -> Self {
        Self::new(base, DEFAULT_EXCLUDED_EXTENSIONS)
    }

    /// Returns true if `url` should be crawled
    pub fn is_in_scope(&self, url: &Url) -> bool {
        let Some(base_authority) = self.base_authority.as_deref() else {
            return false;
        };

        if extract_authority(url).as_deref() != Some(base_authority) {
            return false;
        }

        !self.is_excluded_asset(url)
    }

    /// Returns true if the path or query ends with an excluded extension
    pub fn is_excluded_asset(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        let query = url.query().map(str::to_lowercase);

        self.excluded_suffixes.iter().any(|suffix| {
            path.ends_with(suffix.as_str())
                || query
                    .as_deref()
                    .is_some_and(|q| q.ends_with(suffix.as_str()))
        })
    }
}

/// Checks a single URL against `base` using the default extension denylist
///
/// # Examples
///
/// ```
/// use site_scribe::url::is_in_scope;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/").unwrap();
/// assert!(is_in_scope(&Url::parse("https://example.com/a").unwrap(), &base));
/// assert!(!is_in_scope(&Url::parse("https://other.com/b").unwrap(), &base));
/// assert!(!is_in_scope(&Url::parse("https://example.com/docs/report.pdf").unwrap(), &base));
/// ```
pub fn is_in_scope(url: &Url, base: &Url) -> bool {
    UrlClassifier::with_defaults(base).is_in_scope(url)
}
