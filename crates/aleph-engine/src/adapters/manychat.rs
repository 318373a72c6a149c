//! ManyChat adapter
//!
//! Flow-builder message fields are dual-display widgets: a hidden input holds
//! the live value while a separately rendered node displays it, and the
//! display can lag the input by one tick. Both nodes mirror one verdict,
//! derived from whichever currently holds non-empty text - the visible node
//! wins when populated.

use aleph_dom::NodeId;

use aleph_text::detect;

use super::{AdapterCtx, clear_live, selector};
use crate::reconcile;
use crate::registry::{InputBinding, InputFamily};

const COMPOSERS: &str = ".mc-composer";
const INPUT: &str = "input.mc-composer__input";
const DISPLAY: &str = "div.mc-composer__display";

pub(crate) fn apply(ctx: &mut AdapterCtx<'_>) {
    let composers = ctx
        .tree
        .query_selector_all(ctx.tree.root(), &selector(COMPOSERS));
    for composer in composers {
        if ctx.markers.is_checked(composer) {
            continue;
        }
        let Some(input) = ctx.tree.query_selector(composer, &selector(INPUT)) else {
            continue;
        };
        let Some(display) = ctx.tree.query_selector(composer, &selector(DISPLAY)) else {
            continue;
        };
        ctx.registry.bind(
            input,
            InputBinding {
                family: InputFamily::DualDisplay,
                partner: Some(display),
            },
        );
        ctx.registry.bind(
            display,
            InputBinding {
                family: InputFamily::DualDisplay,
                partner: Some(input),
            },
        );
        mirror_pair(ctx, input, display);
        ctx.markers.mark_checked(composer);
    }
}

/// Style both halves of a widget from whichever currently holds text
fn mirror_pair(ctx: &mut AdapterCtx<'_>, input: NodeId, display: NodeId) {
    let display_text = ctx.tree.text_content(display);
    let display_text = display_text.trim();
    let input_text = ctx.tree.text_content(input);
    let input_text = input_text.trim();

    let text = if !display_text.is_empty() {
        display_text
    } else {
        input_text
    };
    if text.is_empty() {
        clear_live(ctx.tree, input);
        clear_live(ctx.tree, display);
        return;
    }
    let verdict = detect(text);
    for id in [input, display] {
        reconcile::set_direction(ctx.tree, id, verdict);
        reconcile::set_dir_attr(ctx.tree, id, verdict);
    }
}

pub(crate) fn on_input(ctx: &mut AdapterCtx<'_>, node: NodeId) {
    let Some(binding) = ctx.registry.get(node).copied() else {
        return;
    };
    let Some(partner) = binding.partner else {
        return;
    };
    // Resolve which half is the hidden input
    let (input, display) = if ctx.tree.tag_name(node) == Some("input") {
        (node, partner)
    } else {
        (partner, node)
    };
    mirror_pair(ctx, input, display);
}

pub(crate) fn reset(ctx: &mut AdapterCtx<'_>) {
    for node in ctx.registry.nodes() {
        clear_live(ctx.tree, node);
        ctx.registry.unbind(node);
    }
    ctx.markers.clear();
}
