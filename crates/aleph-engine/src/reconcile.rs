//! Style reconciliation primitives
//!
//! The shared vocabulary every adapter styles with. All writes go through the
//! tree's write-if-changed style store, so re-applying the same verdict is a
//! no-op in effect: the DOM state is identical and no mutation record is
//! emitted. Clearing restores the inherited default (property absence), never
//! a hardcoded direction.

use aleph_dom::{DomTree, NodeId};
use aleph_text::Direction;

/// Write the direction + alignment pair for a verdict.
///
/// A `Neutral` verdict clears instead: no letters means no opinion, and the
/// element falls back to whatever it inherits.
pub fn set_direction(tree: &mut DomTree, id: NodeId, direction: Direction) {
    match direction {
        Direction::Rtl => {
            tree.set_style(id, "direction", "rtl");
            tree.set_style(id, "text-align", "right");
        }
        Direction::Ltr => {
            tree.set_style(id, "direction", "ltr");
            tree.set_style(id, "text-align", "left");
        }
        Direction::Neutral => clear_direction(tree, id),
    }
}

/// Remove the direction + alignment pair
pub fn clear_direction(tree: &mut DomTree, id: NodeId) {
    tree.remove_style(id, "direction");
    tree.remove_style(id, "text-align");
}

/// Set the `dir` attribute so native caret behavior follows the styling
pub fn set_dir_attr(tree: &mut DomTree, id: NodeId, direction: Direction) {
    match direction.attr_value() {
        Some(value) => {
            tree.set_attr(id, "dir", value);
        }
        None => clear_dir_attr(tree, id),
    }
}

/// Remove the `dir` attribute
pub fn clear_dir_attr(tree: &mut DomTree, id: NodeId) {
    tree.remove_attr(id, "dir");
}

/// Swap a list container's inline padding so markers sit on the right
pub fn set_list_indent(tree: &mut DomTree, id: NodeId) {
    tree.set_style(id, "padding-right", "1.5em");
    tree.set_style(id, "padding-left", "0");
}

/// Restore a list container's default padding
pub fn clear_list_indent(tree: &mut DomTree, id: NodeId) {
    tree.remove_style(id, "padding-right");
    tree.remove_style(id, "padding-left");
}

/// Reverse a flex row so the marker box renders on the right
pub fn set_row_reverse(tree: &mut DomTree, id: NodeId) {
    tree.set_style(id, "flex-direction", "row-reverse");
}

/// Restore a flex row's default order
pub fn clear_row_reverse(tree: &mut DomTree, id: NodeId) {
    tree.remove_style(id, "flex-direction");
}

/// Swap a marker box's margins for reversed rows
pub fn set_marker_margins(tree: &mut DomTree, id: NodeId) {
    tree.set_style(id, "margin-right", "0px");
    tree.set_style(id, "margin-left", "2px");
}

/// Restore a marker box's default margins
pub fn clear_marker_margins(tree: &mut DomTree, id: NodeId) {
    tree.remove_style(id, "margin-right");
    tree.remove_style(id, "margin-left");
}

/// Every element currently styled right-to-left, document order
pub fn rtl_nodes(tree: &DomTree) -> Vec<NodeId> {
    tree.descendants(tree.root())
        .into_iter()
        .filter(|&id| tree.style_value(id, "direction") == Some("rtl"))
        .collect()
}
