//! Site adapters
//!
//! One variant per supported host application, selected by exact hostname
//! match. Each adapter owns the selectors, DOM shape quirks and re-check
//! strategy for its site; `Unknown` is the explicit no-op variant for every
//! other hostname. Selectors are a versioned contract with markup the sites
//! control - a redesign silently breaks an adapter, and the only defense is
//! "find nothing, do nothing".

mod bunny;
mod claude;
mod gemini;
mod manychat;
mod notion;

use aleph_dom::{DomTree, NodeId, SelectorList};
use aleph_text::{Direction, detect};

use crate::markers::MarkerTable;
use crate::reconcile;
use crate::registry::ListenerRegistry;

/// Supported host applications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Notion,
    Claude,
    Gemini,
    Bunny,
    ManyChat,
    /// Any other hostname: every operation is a no-op
    Unknown,
}

/// Adapter-specific observation hints for the mutation watcher
#[derive(Debug, Clone, Copy, Default)]
pub struct WatchHint {
    /// Also observe text-content mutations, not just subtree structure
    pub character_data: bool,
    /// Schedule an extra delayed pass when an editor root mounts
    pub delayed_passes: bool,
    /// Class identities of editor roots that mount empty and fill in later
    pub editor_classes: &'static [&'static str],
}

/// Mutable engine state an adapter works against during one pass
pub(crate) struct AdapterCtx<'a> {
    pub tree: &'a mut DomTree,
    pub markers: &'a mut MarkerTable,
    pub registry: &'a mut ListenerRegistry,
}

impl Site {
    /// Select the adapter for a hostname; unknown hosts get the no-op variant
    pub fn for_host(host: &str) -> Self {
        match host {
            "www.notion.so" => Self::Notion,
            "claude.ai" => Self::Claude,
            "gemini.google.com" => Self::Gemini,
            "dash.bunny.net" => Self::Bunny,
            "app.manychat.com" => Self::ManyChat,
            _ => Self::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Notion => "notion",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Bunny => "bunny",
            Self::ManyChat => "manychat",
            Self::Unknown => "unknown",
        }
    }

    /// How the watcher should observe for this adapter
    pub fn watch_hint(self) -> WatchHint {
        match self {
            Self::Claude => WatchHint {
                character_data: true,
                ..Default::default()
            },
            Self::Gemini => WatchHint {
                character_data: true,
                delayed_passes: true,
                editor_classes: gemini::EDITOR_CLASSES,
            },
            _ => WatchHint::default(),
        }
    }

    pub(crate) fn apply(self, ctx: &mut AdapterCtx<'_>) {
        match self {
            Self::Notion => notion::apply(ctx),
            Self::Claude => claude::apply(ctx),
            Self::Gemini => gemini::apply(ctx),
            Self::Bunny => bunny::apply(ctx),
            Self::ManyChat => manychat::apply(ctx),
            Self::Unknown => {}
        }
    }

    pub(crate) fn reset(self, ctx: &mut AdapterCtx<'_>) {
        match self {
            Self::Notion => notion::reset(ctx),
            Self::Claude => claude::reset(ctx),
            Self::Gemini => gemini::reset(ctx),
            Self::Bunny => bunny::reset(ctx),
            Self::ManyChat => manychat::reset(ctx),
            Self::Unknown => {}
        }
    }

    /// Content-change event on a registered element
    pub(crate) fn on_input(self, ctx: &mut AdapterCtx<'_>, node: NodeId) {
        match self {
            Self::Notion => {}
            Self::Claude => claude::on_input(ctx, node),
            Self::Gemini => gemini::on_input(ctx, node),
            Self::Bunny => bunny::on_input(ctx, node),
            Self::ManyChat => manychat::on_input(ctx, node),
            Self::Unknown => {}
        }
    }
}

/// Parse a static selector, degrading to match-nothing on error
pub(crate) fn selector(s: &str) -> SelectorList {
    SelectorList::parse(s).unwrap_or_else(|err| {
        tracing::warn!("invalid selector `{}`: {}", s, err);
        SelectorList::empty()
    })
}

/// Live re-classification for an editable element.
///
/// Runs on every content change: direction and the `dir` attribute follow the
/// current text, and emptying the element restores the unstyled default so
/// placeholder text renders normally - never a forced LTR.
pub(crate) fn live_align(tree: &mut DomTree, id: NodeId) {
    let content = tree.text_content(id);
    let content = content.trim();
    if content.is_empty() {
        reconcile::clear_direction(tree, id);
        reconcile::clear_dir_attr(tree, id);
        return;
    }
    let verdict = detect(content);
    reconcile::set_direction(tree, id, verdict);
    reconcile::set_dir_attr(tree, id, verdict);
}

/// Clear everything `live_align` may have written
pub(crate) fn clear_live(tree: &mut DomTree, id: NodeId) {
    reconcile::clear_direction(tree, id);
    reconcile::clear_dir_attr(tree, id);
}

/// Block-level alignment shared by the streaming chat adapters: style the
/// candidate when it opens in Hebrew, then recurse into meaningful
/// descendants with a per-node verdict, swapping list padding where needed.
/// Siblings are independent: a Latin paragraph inside a Hebrew block keeps
/// its default direction.
pub(crate) fn align_streaming_block(
    ctx: &mut AdapterCtx<'_>,
    block: NodeId,
    descendants: &SelectorList,
) {
    let text = ctx.tree.text_content(block);
    let text = text.trim();
    if text.is_empty() || detect(text) != Direction::Rtl {
        return;
    }
    reconcile::set_direction(ctx.tree, block, Direction::Rtl);

    for child in ctx.tree.query_selector_all(block, descendants) {
        let child_text = ctx.tree.text_content(child);
        let child_text = child_text.trim();
        if child_text.is_empty() || detect(child_text) != Direction::Rtl {
            continue;
        }
        reconcile::set_direction(ctx.tree, child, Direction::Rtl);
        if matches!(ctx.tree.tag_name(child), Some("ul") | Some("ol")) {
            reconcile::set_list_indent(ctx.tree, child);
        }
        ctx.markers.mark_processed(child);
    }
}

/// Undo `align_streaming_block` for one session's markers
pub(crate) fn reset_streaming_blocks(ctx: &mut AdapterCtx<'_>) {
    for block in ctx.markers.checked_nodes() {
        reconcile::clear_direction(ctx.tree, block);
    }
    for child in ctx.markers.processed_nodes() {
        reconcile::clear_direction(ctx.tree, child);
        reconcile::clear_list_indent(ctx.tree, child);
    }
    ctx.markers.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_dispatch() {
        assert_eq!(Site::for_host("www.notion.so"), Site::Notion);
        assert_eq!(Site::for_host("claude.ai"), Site::Claude);
        assert_eq!(Site::for_host("gemini.google.com"), Site::Gemini);
        assert_eq!(Site::for_host("dash.bunny.net"), Site::Bunny);
        assert_eq!(Site::for_host("app.manychat.com"), Site::ManyChat);
        assert_eq!(Site::for_host("example.com"), Site::Unknown);
        // Exact match only - no subdomain fuzziness
        assert_eq!(Site::for_host("notion.so"), Site::Unknown);
        assert_eq!(Site::for_host("www.claude.ai"), Site::Unknown);
    }

    #[test]
    fn test_watch_hints() {
        assert!(Site::Gemini.watch_hint().delayed_passes);
        assert!(Site::Gemini.watch_hint().character_data);
        assert!(Site::Claude.watch_hint().character_data);
        assert!(!Site::Notion.watch_hint().character_data);
        assert!(Site::Unknown.watch_hint().editor_classes.is_empty());
    }

    #[test]
    fn test_bad_selector_degrades() {
        let list = selector("div >> p");
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div).unwrap();
        assert!(tree.query_selector_all(tree.root(), &list).is_empty());
    }
}
