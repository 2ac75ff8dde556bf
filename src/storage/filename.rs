use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static NON_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-]").expect("filename pattern is valid"));
static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("underscore pattern is valid"));

/// Derives the output filename for a page URL
///
/// `/` (or an empty path) maps to `<tag>.txt`; any other path maps to
/// `<tag>_<path>.txt` where every character that is neither a word character
/// nor `-` becomes `_`, runs of `_` collapse to one and leading or trailing
/// `_` are dropped. The query string and fragment never take part, so
/// `/about/us?x=1` and `/about/us` share a file. Distinct URLs may collide;
/// the later write wins.
///
/// # Examples
///
/// ```
/// use site_scribe::storage::derive_filename;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/about/us?x=1").unwrap();
/// assert_eq!(derive_filename(&url, "penn"), "penn_about_us.txt");
///
/// let root = Url::parse("https://example.com/").unwrap();
/// assert_eq!(derive_filename(&root, "penn"), "penn.txt");
/// ```
pub fn derive_filename(url: &Url, site_tag: &str) -> String {
    let path = url.path().trim_matches('/');

    if path.is_empty() {
        return default_filename(site_tag);
    }

    let replaced = NON_NAME_CHARS.replace_all(path, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    let name = collapsed.trim_matches('_');

    if name.is_empty() {
        default_filename(site_tag)
    } else {
        format!("{}_{}.txt", site_tag, name)
    }
}

/// Filename used for the site root
pub fn default_filename(site_tag: &str) -> String {
    format!("{}.txt", site_tag)
}
