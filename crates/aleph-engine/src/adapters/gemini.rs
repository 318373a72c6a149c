//! Gemini adapter
//!
//! Responses stream like Claude's, but the composer is a Quill editor that
//! mounts empty and fills in asynchronously; the watch hint asks for
//! character-data observation and a delayed follow-up pass whenever a
//! `ql-editor` root appears in a mutation batch.

use aleph_dom::NodeId;

use super::{AdapterCtx, align_streaming_block, clear_live, live_align, selector};
use crate::registry::{InputBinding, InputFamily};

const CONTAINERS: &str = "message-content, .model-response-text, .markdown";
const CONTAINER_CHILDREN: &str = "p, div, ul, ol, li";
const EDITOR: &str = ".ql-editor";

/// Editor root classes for the watcher's async-mount hint
pub(crate) const EDITOR_CLASSES: &[&str] = &["ql-editor"];

pub(crate) fn apply(ctx: &mut AdapterCtx<'_>) {
    let containers = ctx
        .tree
        .query_selector_all(ctx.tree.root(), &selector(CONTAINERS));
    let children = selector(CONTAINER_CHILDREN);
    for container in containers {
        align_streaming_block(ctx, container, &children);
        ctx.markers.mark_checked(container);
    }

    for editor in ctx
        .tree
        .query_selector_all(ctx.tree.root(), &selector(EDITOR))
    {
        if !ctx.registry.contains(editor) {
            tracing::debug!("binding gemini editor {:?}", editor);
            ctx.registry.bind(
                editor,
                InputBinding {
                    family: InputFamily::RichChat,
                    partner: None,
                },
            );
            live_align(ctx.tree, editor);
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
    super::reset_streaming_blocks(ctx);
}
