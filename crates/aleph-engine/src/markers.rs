//! Visit markers
//!
//! Side-table recording which nodes reconciliation has already touched.
//! `checked` is the coarse per-candidate marker; `processed` is the
//! finer-grained marker for sub-elements (paragraphs, list items) styled
//! inside a candidate. Keeping these out of the node's attribute namespace
//! means the host page never sees them and reset cannot miss them.

use std::collections::HashSet;

use aleph_dom::{DomTree, NodeId};

/// Per-node visit markers for one session
#[derive(Debug, Default)]
pub struct MarkerTable {
    checked: HashSet<NodeId>,
    processed: HashSet<NodeId>,
}

impl MarkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_checked(&mut self, id: NodeId) {
        self.checked.insert(id);
    }

    pub fn is_checked(&self, id: NodeId) -> bool {
        self.checked.contains(&id)
    }

    pub fn mark_processed(&mut self, id: NodeId) {
        self.processed.insert(id);
    }

    pub fn is_processed(&self, id: NodeId) -> bool {
        self.processed.contains(&id)
    }

    /// All checked nodes, document-stable order
    pub fn checked_nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<_> = self.checked.iter().copied().collect();
        nodes.sort();
        nodes
    }

    /// All processed nodes, document-stable order
    pub fn processed_nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<_> = self.processed.iter().copied().collect();
        nodes.sort();
        nodes
    }

    /// Drop both markers for a single node
    pub fn forget(&mut self, id: NodeId) {
        self.checked.remove(&id);
        self.processed.remove(&id);
    }

    /// Drop markers for a removed node and everything beneath it
    pub fn prune_subtree(&mut self, tree: &DomTree, root: NodeId) {
        self.forget(root);
        for id in tree.descendants(root) {
            self.forget(id);
        }
    }

    /// Drop everything (disable-reset)
    pub fn clear(&mut self) {
        self.checked.clear();
        self.processed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty() && self.processed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_independent() {
        let mut markers = MarkerTable::new();
        markers.mark_checked(NodeId::ROOT);
        assert!(markers.is_checked(NodeId::ROOT));
        assert!(!markers.is_processed(NodeId::ROOT));
    }

    #[test]
    fn test_prune_subtree() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, p).unwrap();

        let mut markers = MarkerTable::new();
        markers.mark_checked(div);
        markers.mark_processed(p);

        // Detach keeps subtree links intact, so pruning still sees `p`
        tree.detach(div).unwrap();
        markers.prune_subtree(&tree, div);
        assert!(markers.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut markers = MarkerTable::new();
        markers.mark_checked(NodeId::ROOT);
        markers.mark_processed(NodeId::ROOT);
        markers.clear();
        assert!(markers.is_empty());
    }
}
