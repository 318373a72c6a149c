//! Notion adapter
//!
//! Notion renders every block as `div[data-block-id]` with the editable
//! surface nested inside. Blocks are treated as stable: once visited they are
//! never revisited, so a block whose text is edited later keeps its original
//! direction until it is re-created. List blocks are flex rows with the
//! marker box on the left; flipping them means reversing the row and swapping
//! the marker margins.

use aleph_dom::NodeId;
use aleph_text::{Direction, detect};

use super::{AdapterCtx, selector};
use crate::reconcile;

const BLOCKS: &str = "div[data-block-id]";
const EDITABLE: &str = "[contenteditable=\"true\"]";
const LIST_MARKER_BOX: &str = ".notion-list-item-box-left";

const BULLETED_LIST_CLASS: &str = "notion-bulleted_list-block";
const NUMBERED_LIST_CLASS: &str = "notion-numbered_list-block";

pub(crate) fn apply(ctx: &mut AdapterCtx<'_>) {
    let blocks = ctx.tree.query_selector_all(ctx.tree.root(), &selector(BLOCKS));
    for block in blocks {
        if ctx.markers.is_checked(block) {
            continue;
        }
        align_block(ctx, block);
        ctx.markers.mark_checked(block);
    }
}

fn align_block(ctx: &mut AdapterCtx<'_>, block: NodeId) {
    let text = ctx.tree.text_content(block);
    let text = text.trim();
    if text.is_empty() || detect(text) != Direction::Rtl {
        return;
    }

    if let Some(editable) = ctx.tree.query_selector(block, &selector(EDITABLE)) {
        reconcile::set_direction(ctx.tree, editable, Direction::Rtl);
    }

    if ctx.tree.has_class(block, BULLETED_LIST_CLASS)
        || ctx.tree.has_class(block, NUMBERED_LIST_CLASS)
    {
        let Some(row) = ctx.tree.first_element_child(block) else {
            return;
        };
        if ctx.tree.style_value(row, "display") != Some("flex") {
            return;
        }
        reconcile::set_row_reverse(ctx.tree, row);
        if let Some(marker) = ctx.tree.query_selector(row, &selector(LIST_MARKER_BOX)) {
            reconcile::set_marker_margins(ctx.tree, marker);
        }
    }
}

pub(crate) fn reset(ctx: &mut AdapterCtx<'_>) {
    for block in ctx.markers.checked_nodes() {
        if let Some(editable) = ctx.tree.query_selector(block, &selector(EDITABLE)) {
            reconcile::clear_direction(ctx.tree, editable);
        }
        if let Some(row) = ctx.tree.first_element_child(block) {
            reconcile::clear_row_reverse(ctx.tree, row);
            if let Some(marker) = ctx.tree.query_selector(row, &selector(LIST_MARKER_BOX)) {
                reconcile::clear_marker_margins(ctx.tree, marker);
            }
        }
    }
    ctx.markers.clear();
}
