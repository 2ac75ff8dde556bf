use url::Url;

/// Extracts the network authority (`userinfo@host:port`) of a URL
///
/// The host comes back exactly as the `url` parser stores it, which means it
/// is already lowercased and a port equal to the scheme default is dropped.
/// No further normalization is applied, so `http://` and `https://` URLs
/// with the same host and default ports compare equal.
///
/// Returns None if the URL has no host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_scribe::url::extract_authority;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut authority = String::new();

    if !url.username().is_empty() || url.password().is_some() {
        authority.push_str(url.username());
        if let Some(password) = url.password() {
            authority.push(':');
            authority.push_str(password);
        }
        authority.push('@');
    }

    authority.push_str(host);

    if let Some(port) = url.port() {
        authority.push(':');
        authority.push_str(&port.to_string());
    }

    Some(authority)
}
