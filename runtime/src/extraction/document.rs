//! Turn fetched bytes into a parsed HTML document.

use scraper::Html;

/// Parse a response body into a document tree.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD and markup errors are
/// recovered by the HTML parser, so any body yields a document.
pub fn parse_document(body: &[u8]) -> Html {
    let text = String::from_utf8_lossy(body);
    Html::parse_document(&text)
}
