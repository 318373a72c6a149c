//! Listener registry
//!
//! Tracks which input-capable elements have a live content-change binding,
//! and for dual-display widgets, which partner node mirrors them. An entry is
//! owned by the adapter that created it and must be removed whenever that
//! element's styling is reset - a binding left behind on an element the page
//! later discards is a leak.

use std::collections::HashMap;

use aleph_dom::{DomTree, NodeId};

/// Adapter family an input binding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFamily {
    /// Plain text inputs and textareas re-classified as they change
    ContinuousText,
    /// Hidden input paired with a separately rendered visible node
    DualDisplay,
    /// Rich-text chat composers (contenteditable editors)
    RichChat,
}

/// One registered content-change binding
#[derive(Debug, Clone, Copy)]
pub struct InputBinding {
    pub family: InputFamily,
    /// The paired node for dual-display widgets
    pub partner: Option<NodeId>,
}

/// Registry of live input bindings for one session
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    bindings: HashMap<NodeId, InputBinding>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, id: NodeId, binding: InputBinding) {
        self.bindings.insert(id, binding);
    }

    pub fn unbind(&mut self, id: NodeId) -> Option<InputBinding> {
        self.bindings.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&InputBinding> {
        self.bindings.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.bindings.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bound nodes, document-stable order
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<_> = self.bindings.keys().copied().collect();
        nodes.sort();
        nodes
    }

    /// Drop bindings for a removed node and everything beneath it
    pub fn prune_subtree(&mut self, tree: &DomTree, root: NodeId) {
        if self.bindings.remove(&root).is_some() {
            tracing::debug!("pruned input binding for removed node {:?}", root);
        }
        for id in tree.descendants(root) {
            if self.bindings.remove(&id).is_some() {
                tracing::debug!("pruned input binding for removed node {:?}", id);
            }
        }
    }

    /// Drop everything (disable-reset)
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
