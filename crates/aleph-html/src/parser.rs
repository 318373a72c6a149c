//! HTML5 Parser implementation
//!
//! Uses html5ever's built-in RcDom and converts to our DOM format.

use aleph_dom::{Document, DomTree, InlineStyle, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML string into a document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a page URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .expect("reading from an in-memory buffer should not fail");

        let mut document = Document::new(url);
        let root = document.tree().root();
        convert_node(&dom.document, document.tree_mut(), root);

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        RcNodeData::Document => {
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, parent);
            }
        }
        RcNodeData::Doctype { name, .. } => {
            let id = tree.create_doctype(name);
            let _ = tree.append_child(parent, id);
        }
        RcNodeData::Text { contents } => {
            let id = tree.create_text(&contents.borrow());
            let _ = tree.append_child(parent, id);
        }
        RcNodeData::Comment { contents } => {
            let id = tree.create_comment(contents);
            let _ = tree.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let id = tree.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                let attr_name: &str = &attr.name.local;
                let value: &str = &attr.value;
                if attr_name == "style" {
                    // Inline styles go to the style store, not the attribute map
                    let style = InlineStyle::parse(value);
                    for (prop, prop_value) in style.iter() {
                        tree.set_style(id, prop, prop_value);
                    }
                } else {
                    tree.set_attr(id, attr_name, value);
                }
            }
            let _ = tree.append_child(parent, id);
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id);
            }
        }
        RcNodeData::ProcessingInstruction { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aleph_dom::SelectorList;

    #[test]
    fn test_parse_basic_structure() {
        let doc = HtmlParser::new().parse("<html><body><p>hi</p></body></html>");
        let body = doc.body().expect("body");
        assert_eq!(doc.tree().text_content(body), "hi");
    }

    #[test]
    fn test_parse_attributes_and_classes() {
        let doc = HtmlParser::new().parse(
            r#"<body><div data-block-id="b1" class="notion-bulleted_list-block">x</div></body>"#,
        );
        let tree = doc.tree();
        let list = SelectorList::parse("div[data-block-id]").unwrap();
        let div = tree.query_selector(tree.root(), &list).expect("div");
        assert_eq!(tree.attr(div, "data-block-id"), Some("b1"));
        assert!(tree.has_class(div, "notion-bulleted_list-block"));
    }

    #[test]
    fn test_parse_inline_style() {
        let doc = HtmlParser::new()
            .parse(r#"<body><div style="display: flex; gap: 2px">x</div></body>"#);
        let tree = doc.tree();
        let list = SelectorList::parse("div").unwrap();
        let div = tree.query_selector(tree.root(), &list).expect("div");
        assert_eq!(tree.style_value(div, "display"), Some("flex"));
        assert_eq!(tree.style_value(div, "gap"), Some("2px"));
        assert_eq!(tree.attr(div, "style"), None);
    }

    #[test]
    fn test_parse_hebrew_text() {
        let doc = HtmlParser::new().parse("<body><p>שלום עולם</p></body>");
        let tree = doc.tree();
        let list = SelectorList::parse("p").unwrap();
        let p = tree.query_selector(tree.root(), &list).expect("p");
        assert_eq!(tree.text_content(p), "שלום עולם");
    }
}
