//! End-to-end session scenarios over parsed page snapshots

use aleph_dom::{NodeId, SelectorList};
use aleph_engine::{
    MemoryStore, PrefStore, Session, THROTTLE_WINDOW_MS, ToggleEvent, ToggleMessage, WatchState,
    reconcile,
};

fn session_for(html: &str, url: &str) -> Session<MemoryStore> {
    let document = aleph_html::parse(html, url);
    Session::new(document, MemoryStore::new())
}

fn styled_count(session: &Session<MemoryStore>) -> usize {
    reconcile::rtl_nodes(session.document().tree()).len()
}

fn query(session: &Session<MemoryStore>, selector: &str) -> NodeId {
    let tree = session.document().tree();
    let list = SelectorList::parse(selector).unwrap();
    tree.query_selector(tree.root(), &list).expect(selector)
}

const NOTION_PAGE: &str = r#"
<html><body>
  <div data-block-id="a1">
    <div contenteditable="true">שלום עולם</div>
  </div>
  <div data-block-id="a2">
    <div contenteditable="true">plain English text</div>
  </div>
  <div data-block-id="a3" class="notion-bulleted_list-block">
    <div style="display: flex">
      <div class="notion-list-item-box-left">•</div>
      <div contenteditable="true">פריט ברשימה</div>
    </div>
  </div>
</body></html>
"#;

#[test]
fn notion_page_aligns_hebrew_blocks() {
    let mut session = session_for(NOTION_PAGE, "https://www.notion.so/My-Page");
    session.bootstrap(0);

    let tree = session.document().tree();
    let flipped = reconcile::rtl_nodes(tree);
    // The two Hebrew editables; the Latin block stays untouched
    assert_eq!(flipped.len(), 2);

    let row = {
        let list = SelectorList::parse("div[data-block-id].notion-bulleted_list-block").unwrap();
        let block = tree.query_selector(tree.root(), &list).unwrap();
        tree.first_element_child(block).unwrap()
    };
    assert_eq!(tree.style_value(row, "flex-direction"), Some("row-reverse"));
}

#[test]
fn unknown_host_is_a_no_op() {
    let mut session = session_for(NOTION_PAGE, "https://example.com/");
    session.bootstrap(0);
    assert_eq!(styled_count(&session), 0);
    assert_eq!(session.listener_count(), 0);
}

#[test]
fn apply_is_idempotent_across_passes() {
    let mut session = session_for(NOTION_PAGE, "https://www.notion.so/My-Page");
    session.bootstrap(0);
    let first = styled_count(&session);

    session.align_pass(1_000);
    session.align_pass(2_000);
    assert_eq!(styled_count(&session), first);
}

#[test]
fn toggle_off_strips_everything_and_back_on_reproduces_it() {
    let mut session = session_for(NOTION_PAGE, "https://www.notion.so/My-Page");
    session.bootstrap(0);
    let styled = styled_count(&session);
    assert!(styled > 0);

    let off = ToggleMessage {
        action: "toggleExtension".to_string(),
        enabled: false,
    };
    session.handle_message(&off, 100);
    assert_eq!(styled_count(&session), 0);
    assert_eq!(session.listener_count(), 0);
    assert_eq!(session.watch_state(), WatchState::Stopped);
    assert_eq!(session.take_events(), vec![ToggleEvent::StateChanged(false)]);

    // Every touched style is back to its pre-apply value (absence)
    let editable = query(&session, "[contenteditable=\"true\"]");
    assert!(
        session
            .document()
            .tree()
            .style(editable)
            .is_some_and(|s| s.is_empty())
    );

    let on = ToggleMessage {
        action: "toggleExtension".to_string(),
        enabled: true,
    };
    session.handle_message(&on, 200);
    assert_eq!(styled_count(&session), styled);
    assert_eq!(session.watch_state(), WatchState::Running);
}

#[test]
fn disabled_flag_persists_and_blocks_bootstrap() {
    let mut store = MemoryStore::new();
    store.set_bool(aleph_engine::ENABLED_KEY, false);
    let document = aleph_html::parse(NOTION_PAGE, "https://www.notion.so/My-Page");
    let mut session = Session::new(document, store);

    session.bootstrap(0);
    assert_eq!(styled_count(&session), 0);
    assert_eq!(session.watch_state(), WatchState::Stopped);

    // Pumps while disabled do nothing
    session.pump(5_000);
    assert_eq!(styled_count(&session), 0);
}

const CLAUDE_PAGE: &str = r#"
<html><body>
  <div data-testid="user-message-1">שאלה בעברית</div>
  <main id="transcript"></main>
  <div class="ProseMirror" contenteditable="true"></div>
</body></html>
"#;

#[test]
fn claude_mutations_drive_throttled_passes() {
    let mut session = session_for(CLAUDE_PAGE, "https://claude.ai/chat/1");
    session.bootstrap(0);
    assert_eq!(styled_count(&session), 1);

    // A new message streams in 50ms after the initial pass
    let transcript = query(&session, "main#transcript");
    let tree = session.document_mut().tree_mut();
    let block = tree.create_element("div");
    tree.set_attr(block, "data-testid", "assistant-message-2");
    let text = tree.create_text("תשובה בעברית");
    tree.append_child(block, text).unwrap();
    tree.append_child(transcript, block).unwrap();

    // Inside the throttle window: the pass is deferred to the window edge
    session.pump(50);
    assert_eq!(
        session.document().tree().style_value(block, "direction"),
        None
    );

    session.pump(THROTTLE_WINDOW_MS);
    assert_eq!(
        session.document().tree().style_value(block, "direction"),
        Some("rtl")
    );
}

#[test]
fn claude_streaming_block_picks_up_late_hebrew() {
    let mut session = session_for(CLAUDE_PAGE, "https://claude.ai/chat/1");
    session.bootstrap(0);

    let transcript = query(&session, "main#transcript");
    let tree = session.document_mut().tree_mut();
    let block = tree.create_element("div");
    tree.set_attr(block, "data-testid", "assistant-message-2");
    let text = tree.create_text("");
    tree.append_child(block, text).unwrap();
    tree.append_child(transcript, block).unwrap();
    session.pump(1_000);
    assert_eq!(
        session.document().tree().style_value(block, "direction"),
        None
    );

    // Tokens arrive; character-data mutations re-trigger reconciliation and
    // the streaming policy re-derives the verdict despite the earlier visit
    session
        .document_mut()
        .tree_mut()
        .set_text(text, "שלום! הנה התשובה")
        .unwrap();
    session.pump(2_000);
    assert_eq!(
        session.document().tree().style_value(block, "direction"),
        Some("rtl")
    );
}

#[test]
fn claude_composer_live_input_round_trip() {
    let mut session = session_for(CLAUDE_PAGE, "https://claude.ai/chat/1");
    session.bootstrap(0);
    assert_eq!(session.listener_count(), 1);

    let composer = query(&session, "div.ProseMirror");
    {
        let tree = session.document_mut().tree_mut();
        let text = tree.create_text("שלום");
        tree.append_child(composer, text).unwrap();
    }
    session.notify_input(composer);
    let tree = session.document().tree();
    assert_eq!(tree.style_value(composer, "direction"), Some("rtl"));
    assert_eq!(tree.attr(composer, "dir"), Some("rtl"));

    // Full deletion restores the unstyled default
    let text = session.document().tree().children(composer).next().unwrap();
    session
        .document_mut()
        .tree_mut()
        .set_text(text, "")
        .unwrap();
    session.notify_input(composer);
    let tree = session.document().tree();
    assert_eq!(tree.style_value(composer, "direction"), None);
    assert_eq!(tree.attr(composer, "dir"), None);
}

#[test]
fn fallback_passes_catch_unobserved_changes_then_stop() {
    let mut session = session_for(CLAUDE_PAGE, "https://claude.ai/chat/1");
    session.bootstrap(0);

    // A class flip turns an existing element into a candidate. Attribute
    // mutations are not observed, so only a scheduled pass can catch it.
    let target = query(&session, "main#transcript");
    {
        let tree = session.document_mut().tree_mut();
        let text = tree.create_text("טקסט בעברית");
        tree.append_child(target, text).unwrap();
    }
    session.pump(500);
    session
        .document_mut()
        .tree_mut()
        .set_attr(target, "class", "font-claude-message");

    session.pump(900);
    assert_eq!(
        session.document().tree().style_value(target, "direction"),
        None
    );

    // The +1s fallback pass picks it up
    session.pump(1_000);
    assert_eq!(
        session.document().tree().style_value(target, "direction"),
        Some("rtl")
    );

    // Exhaust the remaining fallback schedule: +2s, then every 3s for 5 more
    for t in [2_000, 5_000, 8_000, 11_000, 14_000, 17_000] {
        session.pump(t);
    }

    // A later unobserved change is no longer caught by timers
    let orphan = {
        let tree = session.document_mut().tree_mut();
        let div = tree.create_element("div");
        let text = tree.create_text("עוד עברית");
        tree.append_child(div, text).unwrap();
        let body_list = SelectorList::parse("body").unwrap();
        let body = tree.query_selector(tree.root(), &body_list).unwrap();
        tree.append_child(body, div).unwrap();
        div
    };
    session.pump(20_050);
    session
        .document_mut()
        .tree_mut()
        .set_attr(orphan, "class", "font-user-message");
    session.pump(30_000);
    assert_eq!(
        session.document().tree().style_value(orphan, "direction"),
        None
    );
}

#[test]
fn disable_cancels_scheduled_passes() {
    let mut session = session_for(CLAUDE_PAGE, "https://claude.ai/chat/1");
    session.bootstrap(0);

    // Arm a trailing pass, then disable before it fires
    let transcript = query(&session, "main#transcript");
    {
        let tree = session.document_mut().tree_mut();
        let block = tree.create_element("div");
        tree.set_attr(block, "data-testid", "assistant-message-9");
        let text = tree.create_text("עברית");
        tree.append_child(block, text).unwrap();
        tree.append_child(transcript, block).unwrap();
    }
    session.pump(50);
    session.set_enabled(false, 60);

    session.pump(10_000);
    assert_eq!(styled_count(&session), 0);
}

const GEMINI_PAGE: &str = r#"
<html><body>
  <message-content>תשובת המודל</message-content>
  <div id="mount-point"></div>
</body></html>
"#;

#[test]
fn gemini_editor_mount_gets_follow_up_pass() {
    let mut session = session_for(GEMINI_PAGE, "https://gemini.google.com/app");
    session.bootstrap(0);
    assert_eq!(session.listener_count(), 0);

    // The Quill editor mounts empty inside a wrapper, past the initial pass
    let mount = query(&session, "div#mount-point");
    let editor = {
        let tree = session.document_mut().tree_mut();
        let wrapper = tree.create_element("div");
        let editor = tree.create_element("div");
        tree.set_attr(editor, "class", "ql-editor");
        tree.set_attr(editor, "contenteditable", "true");
        tree.append_child(wrapper, editor).unwrap();
        tree.append_child(mount, wrapper).unwrap();
        editor
    };

    // Mutation batch is inside the throttle window, so the immediate pass is
    // deferred - but the editor-mount hint schedules a +100ms follow-up that
    // fires first and binds the editor
    session.pump(50);
    assert_eq!(session.listener_count(), 0);
    session.pump(150);
    assert_eq!(session.listener_count(), 1);

    // Content streams into the editor right after mount
    {
        let tree = session.document_mut().tree_mut();
        let text = tree.create_text("שאלה");
        tree.append_child(editor, text).unwrap();
    }
    session.notify_input(editor);
    let tree = session.document().tree();
    assert_eq!(tree.style_value(editor, "direction"), Some("rtl"));
    assert_eq!(tree.attr(editor, "dir"), Some("rtl"));
}

const MANYCHAT_PAGE: &str = r#"
<html><body>
  <div class="mc-composer">
    <input class="mc-composer__input" type="hidden" value="hello">
    <div class="mc-composer__display"></div>
  </div>
</body></html>
"#;

#[test]
fn manychat_dual_display_mirrors_and_flips() {
    let mut session = session_for(MANYCHAT_PAGE, "https://app.manychat.com/flows");
    session.bootstrap(0);
    assert_eq!(session.listener_count(), 2);

    let input = query(&session, "input.mc-composer__input");
    let display = query(&session, "div.mc-composer__display");
    let tree = session.document().tree();
    // Hidden input holds "hello" while the display is empty: both LTR
    assert_eq!(tree.style_value(input, "direction"), Some("ltr"));
    assert_eq!(tree.style_value(display, "direction"), Some("ltr"));

    // The display fills with Hebrew; the verdict flips on both nodes
    {
        let tree = session.document_mut().tree_mut();
        let text = tree.create_text("שלום");
        tree.append_child(display, text).unwrap();
    }
    session.notify_input(display);
    let tree = session.document().tree();
    assert_eq!(tree.style_value(input, "direction"), Some("rtl"));
    assert_eq!(tree.style_value(display, "direction"), Some("rtl"));
}

#[test]
fn removed_nodes_are_pruned_from_registry() {
    let mut session = session_for(MANYCHAT_PAGE, "https://app.manychat.com/flows");
    session.bootstrap(0);
    assert_eq!(session.listener_count(), 2);

    // The host page replaces the whole widget during its own re-render
    let composer = query(&session, "div.mc-composer");
    session.document_mut().tree_mut().detach(composer).unwrap();
    session.pump(1_000);
    assert_eq!(session.listener_count(), 0);
}

const BUNNY_PAGE: &str = r#"
<html><body>
  <form>
    <input class="form-control" type="text" value="">
    <textarea class="form-control"></textarea>
  </form>
</body></html>
"#;

#[test]
fn bunny_fields_classify_live() {
    let mut session = session_for(BUNNY_PAGE, "https://dash.bunny.net/videos");
    session.bootstrap(0);
    assert_eq!(session.listener_count(), 2);
    assert_eq!(styled_count(&session), 0);

    let input = query(&session, "input.form-control");
    session
        .document_mut()
        .tree_mut()
        .set_attr(input, "value", "שם הסרטון");
    session.notify_input(input);
    let tree = session.document().tree();
    assert_eq!(tree.style_value(input, "direction"), Some("rtl"));
    assert_eq!(tree.attr(input, "dir"), Some("rtl"));
}

#[test]
fn unregistered_input_events_are_ignored() {
    let mut session = session_for(BUNNY_PAGE, "https://dash.bunny.net/videos");
    session.bootstrap(0);

    let tree = session.document_mut().tree_mut();
    let stray = tree.create_element("input");
    tree.set_attr(stray, "value", "שלום");
    let root = tree.root();
    tree.append_child(root, stray).unwrap();

    session.notify_input(stray);
    assert_eq!(
        session.document().tree().style_value(stray, "direction"),
        None
    );
}
