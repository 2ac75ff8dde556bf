//! Content extraction
//!
//! Turns a fetched HTML body into the plain text that is written to the page
//! store. Parsing is best-effort: malformed markup never produces an error,
//! the parser simply recovers the way browsers do.

mod text;

pub use text::normalize_text;

use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::node::Node;
use scraper::Html;

/// Elements whose whole subtree is dropped before text is collected
pub const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "nav", "header", "footer"];

/// Extracted text of one fetched page, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    /// URL the page was fetched from
    pub source_url: String,

    /// Normalized plain text
    pub text: String,
}

impl PageDocument {
    pub fn new(source_url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            text: text.into(),
        }
    }
}

/// Extracts normalized plain text from raw HTML
///
/// # Example
///
/// ```
/// use site_scribe::content::extract_text;
///
/// let text = extract_text("<script>alert(1)</script><p>Hello  World</p>");
/// assert_eq!(text, "Hello\nWorld");
/// ```
pub fn extract_text(raw_html: &str) -> String {
    extract_document_text(&parse_html(raw_html))
}

/// Parses a full HTML document with scripting disabled
///
/// With scripting on, html5ever keeps `<noscript>` contents as one raw text
/// node, which would leak tracking-pixel markup into the page text. Off, they
/// parse as ordinary elements and only `script` and `style` stay raw.
pub fn parse_html(raw_html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(Html::new_document(), opts).one(raw_html)
}

/// Extracts normalized plain text from an already parsed document
pub fn extract_document_text(document: &Html) -> String {
    normalize_text(&collect_text(document))
}

/// Concatenates every text node in document order, skipping non-content
/// subtrees. Comments, doctypes and processing instructions are not text.
fn collect_text(document: &Html) -> String {
    let mut raw = String::new();
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(element) if NON_CONTENT_ELEMENTS.contains(&element.name()) => continue,
            _ => {}
        }
        // Reversed so the leftmost child is popped first
        stack.extend(node.children().rev());
    }

    raw
}
