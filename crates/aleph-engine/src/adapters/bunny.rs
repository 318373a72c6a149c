//! Bunny adapter
//!
//! Dashboard form fields: plain inputs and textareas whose content is typed
//! continuously. Each field is bound once and re-classified on every content
//! change; there is nothing block-shaped to align on this site.

use aleph_dom::NodeId;

use super::{AdapterCtx, clear_live, live_align, selector};
use crate::registry::{InputBinding, InputFamily};

const FIELDS: &str = "input.form-control, textarea.form-control";

pub(crate) fn apply(ctx: &mut AdapterCtx<'_>) {
    for field in ctx
        .tree
        .query_selector_all(ctx.tree.root(), &selector(FIELDS))
    {
        if !ctx.registry.contains(field) {
            ctx.registry.bind(
                field,
                InputBinding {
                    family: InputFamily::ContinuousText,
                    partner: None,
                },
            );
            live_align(ctx.tree, field);
        }
    }
}

pub(crate) fn on_input(ctx: &mut AdapterCtx<'_>, node: NodeId) {
    live_align(ctx.tree, node);
}

pub(crate) fn reset(ctx: &mut AdapterCtx<'_>) {
    for node in ctx.registry.nodes() {
        clear_live(ctx.tree, node);
        ctx.registry.unbind(node);
    }
    ctx.markers.clear();
}
