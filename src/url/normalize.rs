use crate::UrlError;
use std::fmt;
use url::Url;

/// A normalized absolute URL awaiting or having undergone a fetch
///
/// Identity is the normalized string: fragment removed, query kept. Two links
/// that differ only in their `#fragment` are the same target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrawlTarget(Url);

impl CrawlTarget {
    /// Parses and normalizes an absolute URL string
    pub fn parse(url_str: &str) -> Result<Self, UrlError> {
        normalize_url(url_str).map(Self::from_normalized)
    }

    fn from_normalized(url: Url) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<Url> for CrawlTarget {
    fn from(mut url: Url) -> Self {
        url.set_fragment(None);
        Self::from_normalized(url)
    }
}

/// Normalizes a URL string into a crawlable form
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything but http and https
/// 3. Reject URLs without a host
/// 4. Remove fragment (everything after #)
///
/// The query string is preserved and nothing else is rewritten beyond what
/// the `url` parser itself canonicalizes.
///
/// # Examples
///
/// ```
/// use site_scribe::url::normalize_url;
///
/// let url = normalize_url("https://example.com/page?x=1#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page?x=1");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}

/// Resolves an href found on `page` into a normalized absolute URL
///
/// Returns None for empty hrefs and anything that does not resolve to an
/// http(s) URL (`mailto:`, `javascript:`, `tel:` and friends).
pub fn resolve_href(page: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let joined = page.join(href).ok()?;
    normalize_url(joined.as_str()).ok()
}
