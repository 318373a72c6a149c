//! DOM Node
//!
//! Compact node representation: sibling/child links are `NodeId`s with a
//! `NONE` sentinel instead of pointers, so the whole tree lives in one arena.

use crate::NodeId;
use crate::style::InlineStyle;

/// DOM node with intrusive tree links
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a document root node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Create an element node
    pub fn element(name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(name)))
    }

    /// Create a text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(TextData {
            content: content.to_string(),
        }))
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    /// Create a doctype node
    pub fn doctype(name: &str) -> Self {
        Self::with_data(NodeData::Doctype {
            name: name.to_string(),
        })
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lowercase
    pub name: String,
    /// Attributes in document order
    pub attrs: Vec<Attribute>,
    /// Cached class list (kept in sync with the `class` attribute)
    pub classes: Vec<String>,
    /// Inline style store
    pub style: InlineStyle,
}

impl ElementData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: Vec::new(),
            style: InlineStyle::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, refreshing the class cache when needed
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attrs.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
        if name == "class" {
            self.classes = value.split_whitespace().map(str::to_string).collect();
        }
    }

    /// Remove an attribute; returns true when it existed
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|a| a.name != name);
        let removed = self.attrs.len() != before;
        if removed && name == "class" {
            self.classes.clear();
        }
        removed
    }

    /// Check for a class token
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

/// Attribute (name/value pair)
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_attrs() {
        let mut elem = ElementData::new("DIV");
        assert_eq!(elem.name, "div");

        elem.set_attr("data-block-id", "abc");
        assert_eq!(elem.get_attr("data-block-id"), Some("abc"));

        elem.set_attr("data-block-id", "def");
        assert_eq!(elem.get_attr("data-block-id"), Some("def"));
        assert_eq!(elem.attrs.len(), 1);

        assert!(elem.remove_attr("data-block-id"));
        assert!(!elem.remove_attr("data-block-id"));
    }

    #[test]
    fn test_class_cache() {
        let mut elem = ElementData::new("div");
        elem.set_attr("class", "notion-bulleted_list-block selected");
        assert!(elem.has_class("notion-bulleted_list-block"));
        assert!(elem.has_class("selected"));
        assert!(!elem.has_class("notion"));

        elem.remove_attr("class");
        assert!(!elem.has_class("selected"));
    }
}
