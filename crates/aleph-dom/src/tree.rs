//! DOM Tree (arena-based allocation)
//!
//! All mutation goes through tree methods so that registered observers see
//! every change as a record. Style and attribute writes compare against the
//! stored value first: writing what is already there mutates nothing and
//! emits nothing, which is what keeps observe-restyle feedback loops from
//! forming.

use crate::node::{Node, NodeData};
use crate::observer::{
    MutationObserver, MutationRecord, MutationType, ObserverId, ObserverOptions,
};
use crate::selector::{CompoundSelector, SelectorList};
use crate::style::InlineStyle;
use crate::{DomError, DomResult, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    observers: Vec<Option<MutationObserver>>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            observers: Vec::new(),
        }
    }

    /// Root node ID
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes allocated (including detached ones)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.alloc(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.alloc(Node::comment(content))
    }

    /// Create a doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.alloc(Node::doctype(name))
    }

    // ---- structure ----------------------------------------------------

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if parent == child || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        if self
            .get(child)
            .is_some_and(|node| node.parent.is_valid())
        {
            self.detach(child)?;
        }

        let old_last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = old_last;
            node.next_sibling = NodeId::NONE;
        }
        if old_last.is_valid() {
            self.nodes[old_last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        self.notify(MutationRecord::child_list(parent, vec![child], Vec::new()));
        Ok(())
    }

    /// Detach a node from its parent; no-op when already detached
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let Some(node) = self.get(id) else {
            return Err(DomError::NotFound);
        };
        let parent = node.parent;
        if !parent.is_valid() {
            return Ok(());
        }
        let prev = node.prev_sibling;
        let next = node.next_sibling;

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        {
            let node = &mut self.nodes[id.index()];
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }

        self.notify(MutationRecord::child_list(parent, Vec::new(), vec![id]));
        Ok(())
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)
            .map(|node| node.parent)
            .filter(|p| p.is_valid())
    }

    /// First child that is an element
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .find(|&child| self.get(child).is_some_and(Node::is_element))
    }

    /// Iterate direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self
            .get(id)
            .map(|node| node.first_child)
            .filter(|c| c.is_valid());
        Children { tree: self, next }
    }

    /// All descendants of `root` in document order (excluding `root`)
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.push_descendants(root, &mut out);
        out
    }

    fn push_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(id) {
            out.push(child);
            self.push_descendants(child, out);
        }
    }

    /// True when `node` is in the subtree rooted at `ancestor` (strictly below it)
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.get(node).map(|n| n.parent).unwrap_or(NodeId::NONE);
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.get(current).map(|n| n.parent).unwrap_or(NodeId::NONE);
        }
        false
    }

    // ---- content ------------------------------------------------------

    /// Replace a text node's content
    pub fn set_text(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return Err(DomError::NotFound);
        };
        let NodeData::Text(text) = &mut node.data else {
            return Err(DomError::NotText);
        };
        if text.content == content {
            return Ok(());
        }
        let old = std::mem::replace(&mut text.content, content.to_string());
        self.notify(MutationRecord::character_data(id, Some(old)));
        Ok(())
    }

    /// Concatenated descendant text in document order.
    ///
    /// `<input>` elements contribute their `value` attribute, since that is
    /// where live form widgets keep their content.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        match &node.data {
            NodeData::Text(t) => out.push_str(&t.content),
            NodeData::Element(e) if e.name == "input" => {
                if let Some(value) = e.get_attr("value") {
                    out.push_str(value);
                }
            }
            _ => {}
        }
        for child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    // ---- element accessors --------------------------------------------

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.name.as_str())
    }

    /// Attribute value
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Set an attribute; returns true when the value changed
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(elem) = self
            .nodes
            .get_mut(id.index())
            .and_then(Node::as_element_mut)
        else {
            return false;
        };
        let old = elem.get_attr(name).map(str::to_string);
        if old.as_deref() == Some(value) {
            return false;
        }
        elem.set_attr(name, value);
        self.notify(MutationRecord::attribute(id, name, old));
        true
    }

    /// Remove an attribute; returns true when it was present
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        let Some(elem) = self
            .nodes
            .get_mut(id.index())
            .and_then(Node::as_element_mut)
        else {
            return false;
        };
        let old = elem.get_attr(name).map(str::to_string);
        if !elem.remove_attr(name) {
            return false;
        }
        self.notify(MutationRecord::attribute(id, name, old));
        true
    }

    /// Check for a class token
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id)
            .and_then(Node::as_element)
            .is_some_and(|e| e.has_class(class))
    }

    /// Inline style of an element
    pub fn style(&self, id: NodeId) -> Option<&InlineStyle> {
        self.get(id)?.as_element().map(|e| &e.style)
    }

    /// Inline style property value
    pub fn style_value(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.style(id)?.get(prop)
    }

    /// Set an inline style property; returns true when the value changed
    pub fn set_style(&mut self, id: NodeId, prop: &str, value: &str) -> bool {
        let Some(elem) = self
            .nodes
            .get_mut(id.index())
            .and_then(Node::as_element_mut)
        else {
            return false;
        };
        let old = elem.style.css_text();
        if !elem.style.set(prop, value) {
            return false;
        }
        self.notify(MutationRecord::attribute(id, "style", Some(old)));
        true
    }

    /// Remove an inline style property; returns true when it was present
    pub fn remove_style(&mut self, id: NodeId, prop: &str) -> bool {
        let Some(elem) = self
            .nodes
            .get_mut(id.index())
            .and_then(Node::as_element_mut)
        else {
            return false;
        };
        let old = elem.style.css_text();
        if !elem.style.remove(prop) {
            return false;
        }
        self.notify(MutationRecord::attribute(id, "style", Some(old)));
        true
    }

    // ---- queries ------------------------------------------------------

    /// Check an element against one compound selector
    pub fn matches(&self, id: NodeId, selector: &CompoundSelector) -> bool {
        self.get(id)
            .and_then(Node::as_element)
            .is_some_and(|e| selector.matches(e))
    }

    /// All descendant elements of `root` matching the list, document order
    pub fn query_selector_all(&self, root: NodeId, list: &SelectorList) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| {
                self.get(id)
                    .and_then(Node::as_element)
                    .is_some_and(|e| list.matches(e))
            })
            .collect()
    }

    /// First descendant element matching the list
    pub fn query_selector(&self, root: NodeId, list: &SelectorList) -> Option<NodeId> {
        self.query_selector_all(root, list).into_iter().next()
    }

    // ---- observers ----------------------------------------------------

    /// Register an observer on `root`
    pub fn observe(&mut self, root: NodeId, options: ObserverOptions) -> ObserverId {
        let observer = MutationObserver::new(root, options);
        for (i, slot) in self.observers.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(observer);
                return ObserverId(i as u32);
            }
        }
        self.observers.push(Some(observer));
        let id = ObserverId((self.observers.len() - 1) as u32);
        tracing::trace!("observer {:?} registered on {:?}", id, root);
        id
    }

    /// Disconnect and drop an observer
    pub fn disconnect(&mut self, id: ObserverId) {
        if let Some(slot) = self.observers.get_mut(id.0 as usize) {
            if slot.take().is_some() {
                tracing::trace!("observer {:?} disconnected", id);
            }
        }
    }

    /// Drain an observer's buffered records
    pub fn take_records(&mut self, id: ObserverId) -> Vec<MutationRecord> {
        self.observers
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .map(MutationObserver::take_records)
            .unwrap_or_default()
    }

    fn notify(&mut self, record: MutationRecord) {
        if self.observers.is_empty() {
            return;
        }
        let mut deliveries = Vec::new();
        for (i, slot) in self.observers.iter().enumerate() {
            if let Some(obs) = slot {
                if obs.accepts(record.mutation_type)
                    && self.in_scope(obs.root, obs.options.subtree, record.target)
                {
                    deliveries.push(i);
                }
            }
        }
        for i in deliveries {
            if let Some(Some(obs)) = self.observers.get_mut(i) {
                obs.records.push(record.clone());
            }
        }
    }

    fn in_scope(&self, root: NodeId, subtree: bool, target: NodeId) -> bool {
        target == root || (subtree && self.contains(root, target))
    }
}

/// Iterator over a node's direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self
            .tree
            .get(current)
            .map(|node| node.next_sibling)
            .filter(|n| n.is_valid());
        Some(current)
    }
}
