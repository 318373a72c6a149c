//! Session - the per-page engine context
//!
//! One session owns everything mutable for one page: the document, the
//! selected adapter, the toggle controller, the watcher, the marker
//! side-table, the listener registry and the timer queue. The embedder
//! mutates the DOM through `document_mut`, reports input events with
//! `notify_input`, and calls `pump` with a monotonic millisecond clock;
//! ordering between overlapping timers and mutation batches is deliberately
//! unspecified, which is why every pass is idempotent.

use aleph_dom::{Document, MutationRecord, MutationType, NodeId};

use crate::adapters::{AdapterCtx, Site};
use crate::markers::MarkerTable;
use crate::registry::ListenerRegistry;
use crate::store::PrefStore;
use crate::timers::{PassKind, TimerQueue};
use crate::toggle::{TOGGLE_ACTION, ToggleController, ToggleEvent, ToggleMessage, Transition};
use crate::watcher::{WatchState, Watcher};

const FALLBACK_FIRST_MS: u64 = 1_000;
const FALLBACK_SECOND_MS: u64 = 2_000;
const FALLBACK_INTERVAL_MS: u64 = 3_000;
const FALLBACK_REPEATS: u8 = 5;

/// Per-page engine instance
pub struct Session<S: PrefStore> {
    document: Document,
    site: Site,
    toggle: ToggleController<S>,
    watcher: Watcher,
    markers: MarkerTable,
    registry: ListenerRegistry,
    timers: TimerQueue,
    events: Vec<ToggleEvent>,
}

impl<S: PrefStore> Session<S> {
    /// Create a session for a loaded document, selecting the adapter by
    /// exact hostname match
    pub fn new(document: Document, store: S) -> Self {
        let site = document
            .hostname()
            .as_deref()
            .map(Site::for_host)
            .unwrap_or(Site::Unknown);
        tracing::info!("session for {} uses {} adapter", document.url(), site.name());
        Self {
            document,
            site,
            toggle: ToggleController::new(store),
            watcher: Watcher::new(),
            markers: MarkerTable::new(),
            registry: ListenerRegistry::new(),
            timers: TimerQueue::new(),
            events: Vec::new(),
        }
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn enabled(&self) -> bool {
        self.toggle.enabled()
    }

    pub fn watch_state(&self) -> WatchState {
        self.watcher.state()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The embedder mutates the page through this; the session's observer
    /// sees every change on the next pump
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Number of live input bindings
    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }

    /// Start up: read the persisted flag, and when enabled begin observing,
    /// run the initial pass, and arm the load-time fallback passes
    pub fn bootstrap(&mut self, now: u64) {
        if !self.toggle.enabled() {
            tracing::debug!("disabled at startup; not observing");
            return;
        }
        self.activate(now);
    }

    fn activate(&mut self, now: u64) {
        let hint = self.site.watch_hint();
        self.watcher.start(self.document.tree_mut(), &hint);
        self.align_pass(now);
        // Safety net for pages whose first render is not reliably observable:
        // a few wasted passes are cheaper than a page that never aligns.
        self.timers
            .schedule(now + FALLBACK_FIRST_MS, PassKind::Fallback { remaining: 1 });
        self.timers
            .schedule(now + FALLBACK_SECOND_MS, PassKind::Fallback { remaining: 1 });
        self.timers.schedule(
            now + FALLBACK_SECOND_MS + FALLBACK_INTERVAL_MS,
            PassKind::Fallback {
                remaining: FALLBACK_REPEATS,
            },
        );
    }

    /// Drain mutation records and due timers, running passes as decided.
    /// `now` is a monotonic millisecond clock supplied by the embedder.
    pub fn pump(&mut self, now: u64) {
        let records = match self.watcher.observer() {
            Some(id) => self.document.tree_mut().take_records(id),
            None => Vec::new(),
        };
        if !records.is_empty() {
            self.prune_removed(&records);
            let hint = self.site.watch_hint();
            if self
                .watcher
                .on_mutations(self.document.tree(), &records, &hint, &mut self.timers, now)
            {
                self.align_pass(now);
            }
        }

        for pass in self.timers.get_ready(now) {
            // A timer armed before a disable must not do any work after it
            if !self.toggle.enabled() {
                continue;
            }
            match pass.kind {
                PassKind::Throttled => {
                    self.watcher.trailing_fired();
                    self.align_pass(now);
                }
                PassKind::EditorMount => self.align_pass(now),
                PassKind::Fallback { remaining } => {
                    self.align_pass(now);
                    if remaining > 1 {
                        self.timers.schedule(
                            now + FALLBACK_INTERVAL_MS,
                            PassKind::Fallback {
                                remaining: remaining - 1,
                            },
                        );
                    }
                }
            }
        }
    }

    /// One reconciliation pass through the active adapter; no-op when
    /// disabled
    pub fn align_pass(&mut self, now: u64) {
        if !self.toggle.enabled() {
            tracing::trace!("disabled; skipping pass");
            return;
        }
        self.watcher.note_pass(now);
        let site = self.site;
        let mut ctx = AdapterCtx {
            tree: self.document.tree_mut(),
            markers: &mut self.markers,
            registry: &mut self.registry,
        };
        site.apply(&mut ctx);
    }

    /// Content-change event on an element; only registered elements react
    pub fn notify_input(&mut self, node: NodeId) {
        if !self.toggle.enabled() || !self.registry.contains(node) {
            return;
        }
        let site = self.site;
        let mut ctx = AdapterCtx {
            tree: self.document.tree_mut(),
            markers: &mut self.markers,
            registry: &mut self.registry,
        };
        site.on_input(&mut ctx, node);
    }

    /// Apply a message from the toggle UI
    pub fn handle_message(&mut self, message: &ToggleMessage, now: u64) {
        if message.action == TOGGLE_ACTION {
            self.set_enabled(message.enabled, now);
        } else {
            tracing::debug!("ignoring message with action `{}`", message.action);
        }
    }

    /// Flip the enabled flag. Disabling synchronously stops the observer,
    /// cancels scheduled passes and strips everything the adapter applied;
    /// enabling starts observing and reprocesses the page from scratch.
    pub fn set_enabled(&mut self, enabled: bool, now: u64) {
        match self.toggle.set_enabled(enabled) {
            Transition::Unchanged => {}
            Transition::Enabled => {
                self.events.push(ToggleEvent::StateChanged(true));
                self.activate(now);
            }
            Transition::Disabled => {
                self.events.push(ToggleEvent::StateChanged(false));
                self.watcher.stop(self.document.tree_mut());
                self.timers.clear();
                let site = self.site;
                let mut ctx = AdapterCtx {
                    tree: self.document.tree_mut(),
                    markers: &mut self.markers,
                    registry: &mut self.registry,
                };
                site.reset(&mut ctx);
            }
        }
    }

    /// Drain state-change notifications for the external UI surface
    pub fn take_events(&mut self) -> Vec<ToggleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Markers and bindings for nodes the host page discarded must not
    /// dangle; removal records drive eviction.
    fn prune_removed(&mut self, records: &[MutationRecord]) {
        for record in records {
            if record.mutation_type != MutationType::ChildList {
                continue;
            }
            for &removed in &record.removed_nodes {
                self.markers.prune_subtree(self.document.tree(), removed);
                self.registry.prune_subtree(self.document.tree(), removed);
            }
        }
    }
}
