//! Document - tree plus page identity

use crate::tree::DomTree;
use crate::{NodeId, SelectorList};

/// A page's DOM tree together with the URL it was loaded for
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    url: String,
}

impl Document {
    /// Create an empty document for a URL
    pub fn new(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
        }
    }

    /// Wrap an already-built tree
    pub fn from_tree(tree: DomTree, url: &str) -> Self {
        Self {
            tree,
            url: url.to_string(),
        }
    }

    /// Page URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hostname component of the page URL, if it parses
    pub fn hostname(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        parsed.host_str().map(str::to_string)
    }

    /// First `<body>` element, if present
    pub fn body(&self) -> Option<NodeId> {
        let list = SelectorList::parse("body").ok()?;
        self.tree.query_selector(self.tree.root(), &list)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
