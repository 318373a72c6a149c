//! Claude adapter
//!
//! Chat transcripts stream token by token, so message blocks are never
//! assumed finished: every pass re-derives the verdict for every candidate
//! instead of short-circuiting on the visit marker. A block that opened with
//! Latin boilerplate and grows a Hebrew body gets picked up by a later pass;
//! the repeated-work cost is what the throttle window is for. The composer is
//! a ProseMirror contenteditable and is re-classified on every keystroke.

use aleph_dom::NodeId;

use super::{AdapterCtx, align_streaming_block, clear_live, live_align, selector};
use crate::registry::{InputBinding, InputFamily};

const MESSAGES: &str = "[data-testid*=\"message\"], [class*=\"message\"], .font-user-message, .font-claude-message, div[class*=\"whitespace-pre-wrap\"]";
const MESSAGE_CHILDREN: &str = "p, div, ul, ol, li";
const COMPOSER: &str = "div.ProseMirror[contenteditable=\"true\"]";

pub(crate) fn apply(ctx: &mut AdapterCtx<'_>) {
    let blocks = ctx
        .tree
        .query_selector_all(ctx.tree.root(), &selector(MESSAGES));
    let children = selector(MESSAGE_CHILDREN);
    for block in blocks {
        align_streaming_block(ctx, block, &children);
        ctx.markers.mark_checked(block);
    }

    if let Some(composer) = ctx.tree.query_selector(ctx.tree.root(), &selector(COMPOSER)) {
        if !ctx.registry.contains(composer) {
            tracing::debug!("binding claude composer {:?}", composer);
            ctx.registry.bind(
                composer,
                InputBinding {
                    family: InputFamily::RichChat,
                    partner: None,
                },
            );
            live_align(ctx.tree, composer);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::MarkerTable;
    use crate::registry::ListenerRegistry;
    use aleph_dom::DomTree;

    fn message(tree: &mut DomTree, testid: &str, text: &str) -> NodeId {
        let block = tree.create_element("div");
        tree.set_attr(block, "data-testid", testid);
        let t = tree.create_text(text);
        let root = tree.root();
        tree.append_child(root, block).unwrap();
        tree.append_child(block, t).unwrap();
        block
    }

    fn run_apply(tree: &mut DomTree, markers: &mut MarkerTable, registry: &mut ListenerRegistry) {
        let mut ctx = AdapterCtx {
            tree,
            markers,
            registry,
        };
        apply(&mut ctx);
    }

    #[test]
    fn test_hebrew_message_styled() {
        let mut tree = DomTree::new();
        let block = message(&mut tree, "user-message-1", "שלום, מה שלומך?");
        let mut markers = MarkerTable::new();
        let mut registry = ListenerRegistry::new();

        run_apply(&mut tree, &mut markers, &mut registry);
        assert_eq!(tree.style_value(block, "direction"), Some("rtl"));
    }

    #[test]
    fn test_streaming_block_revisited() {
        let mut tree = DomTree::new();
        let block = message(&mut tree, "assistant-message-1", "");
        let mut markers = MarkerTable::new();
        let mut registry = ListenerRegistry::new();

        run_apply(&mut tree, &mut markers, &mut registry);
        assert_eq!(tree.style_value(block, "direction"), None);

        // Tokens stream in after the first visit; the next pass must not
        // short-circuit on the marker
        let t = tree.children(block).next().unwrap();
        tree.set_text(t, "שלום עולם").unwrap();
        run_apply(&mut tree, &mut markers, &mut registry);
        assert_eq!(tree.style_value(block, "direction"), Some("rtl"));
    }

    #[test]
    fn test_mixed_paragraphs_independent() {
        let mut tree = DomTree::new();
        let block = message(&mut tree, "assistant-message-1", "שלום");
        let hebrew = tree.create_element("p");
        let hebrew_text = tree.create_text("פסקה בעברית");
        let latin = tree.create_element("p");
        let latin_text = tree.create_text("an English paragraph");
        tree.append_child(block, hebrew).unwrap();
        tree.append_child(hebrew, hebrew_text).unwrap();
        tree.append_child(block, latin).unwrap();
        tree.append_child(latin, latin_text).unwrap();

        let mut markers = MarkerTable::new();
        let mut registry = ListenerRegistry::new();
        run_apply(&mut tree, &mut markers, &mut registry);

        assert_eq!(tree.style_value(hebrew, "direction"), Some("rtl"));
        assert_eq!(tree.style_value(latin, "direction"), None);
        assert!(markers.is_processed(hebrew));
        assert!(!markers.is_processed(latin));
    }

    #[test]
    fn test_hebrew_list_padding_swapped() {
        let mut tree = DomTree::new();
        let block = message(&mut tree, "assistant-message-1", "רשימה");
        let ul = tree.create_element("ul");
        let li = tree.create_element("li");
        let li_text = tree.create_text("פריט");
        tree.append_child(block, ul).unwrap();
        tree.append_child(ul, li).unwrap();
        tree.append_child(li, li_text).unwrap();

        let mut markers = MarkerTable::new();
        let mut registry = ListenerRegistry::new();
        run_apply(&mut tree, &mut markers, &mut registry);

        assert_eq!(tree.style_value(ul, "padding-right"), Some("1.5em"));
        assert_eq!(tree.style_value(ul, "padding-left"), Some("0"));
        assert_eq!(tree.style_value(li, "direction"), Some("rtl"));
    }

    #[test]
    fn test_composer_live_typing() {
        let mut tree = DomTree::new();
        let composer = tree.create_element("div");
        tree.set_attr(composer, "class", "ProseMirror");
        tree.set_attr(composer, "contenteditable", "true");
        let text = tree.create_text("");
        let root = tree.root();
        tree.append_child(root, composer).unwrap();
        tree.append_child(composer, text).unwrap();

        let mut markers = MarkerTable::new();
        let mut registry = ListenerRegistry::new();
        run_apply(&mut tree, &mut markers, &mut registry);

        // Empty composer stays unstyled so the placeholder renders normally
        assert!(registry.contains(composer));
        assert_eq!(tree.style_value(composer, "direction"), None);
        assert_eq!(tree.attr(composer, "dir"), None);

        tree.set_text(text, "שלום").unwrap();
        let mut ctx = AdapterCtx {
            tree: &mut tree,
            markers: &mut markers,
            registry: &mut registry,
        };
        on_input(&mut ctx, composer);
        assert_eq!(tree.style_value(composer, "direction"), Some("rtl"));
        assert_eq!(tree.attr(composer, "dir"), Some("rtl"));

        // Deleting everything restores the default, not forced LTR
        tree.set_text(text, "").unwrap();
        let mut ctx = AdapterCtx {
            tree: &mut tree,
            markers: &mut markers,
            registry: &mut registry,
        };
        on_input(&mut ctx, composer);
        assert_eq!(tree.style_value(composer, "direction"), None);
        assert_eq!(tree.attr(composer, "dir"), None);
    }

    #[test]
    fn test_reset_round_trip() {
        let mut tree = DomTree::new();
        let block = message(&mut tree, "user-message-1", "שלום");
        let mut markers = MarkerTable::new();
        let mut registry = ListenerRegistry::new();

        run_apply(&mut tree, &mut markers, &mut registry);
        assert_eq!(tree.style_value(block, "direction"), Some("rtl"));

        let mut ctx = AdapterCtx {
            tree: &mut tree,
            markers: &mut markers,
            registry: &mut registry,
        };
        reset(&mut ctx);
        assert!(tree.style(block).is_some_and(|s| s.is_empty()));
        assert!(markers.is_empty());
        assert!(registry.is_empty());
    }
}
