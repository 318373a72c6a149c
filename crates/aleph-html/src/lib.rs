//! Aleph HTML - page snapshot loading
//!
//! Parses an HTML string into an `aleph-dom` document. Uses html5ever's
//! built-in RcDom and converts to our DOM format; this is simpler and more
//! reliable than implementing TreeSink directly.

mod parser;

pub use parser::HtmlParser;

use aleph_dom::Document;

/// Parse an HTML snapshot for a page URL
pub fn parse(html: &str, url: &str) -> Document {
    HtmlParser::new().parse_with_url(html, url)
}
