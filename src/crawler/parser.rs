//! HTML parser for extracting page text and links
//!
//! A page body is parsed once; the same document yields both the text that
//! gets persisted and the outbound links that feed the frontier.

use crate::content::{extract_document_text, parse_html};
use crate::url::resolve_href;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Normalized plain text of the page
    pub text: String,

    /// All followable links found on the page (absolute, fragment-free)
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts text and links
///
/// # Link Extraction Rules
///
/// Every `<a href="...">` is considered, including those inside navigation,
/// header and footer blocks that the text extractor drops. Each href is
/// resolved against `page_url` and its fragment removed. Hrefs that do not
/// resolve to http(s) (`mailto:`, `javascript:`, `tel:`) are skipped.
///
/// # Example
///
/// ```
/// use site_scribe::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><body><nav><a href="/about">About</a></nav><p>Welcome</p></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_page(html, &page_url);
/// assert_eq!(parsed.text, "Welcome");
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/about");
/// ```
pub fn parse_page(html: &str, page_url: &Url) -> ParsedPage {
    let document = parse_html(html);

    ParsedPage {
        text: extract_document_text(&document),
        links: extract_links(&document, page_url),
    }
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, page_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_href(page_url, href) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}
