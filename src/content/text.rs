//! Plain-text normalization applied after markup has been stripped

/// Flattens raw document text into one phrase per line
///
/// Each line is trimmed, then split on double spaces (page authors and
/// templating engines use them as visual separators). Every resulting phrase
/// is trimmed again and empty phrases are dropped. The output never has
/// leading, trailing or blank lines.
pub fn normalize_text(raw: &str) -> String {
    let mut phrases: Vec<&str> = Vec::new();

    for line in raw.split(is_line_boundary) {
        for phrase in line.trim().split("  ") {
            let phrase = phrase.trim();
            if !phrase.is_empty() {
                phrases.push(phrase);
            }
        }
    }

    phrases.join("\n")
}

/// Universal newline characters, matching what text tools treat as line ends
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}
