//! Mutation watcher
//!
//! Two-state machine driving reconciliation from mutation batches. Starting
//! registers a fresh observer on the document root; stopping disconnects and
//! drops the handle - there is no paused state to resume from. Batches are
//! throttled to at most one pass per window, with a single trailing pass
//! coalesced at the window edge so the last mutations of a burst are not
//! lost. Adapters whose editors mount empty get one extra pass shortly after
//! an editor root appears.

use aleph_dom::{DomTree, MutationRecord, MutationType, ObserverId, ObserverOptions};

use crate::adapters::WatchHint;
use crate::timers::{PassKind, TimerQueue};

/// Minimum spacing between mutation-driven reconciliation passes
pub const THROTTLE_WINDOW_MS: u64 = 200;

/// Delay for the extra pass after an async-mounting editor appears
pub const EDITOR_MOUNT_DELAY_MS: u64 = 100;

/// Watcher lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchState {
    #[default]
    Stopped,
    Running,
}

/// Observes the document and decides when reconciliation runs
#[derive(Debug, Default)]
pub struct Watcher {
    state: WatchState,
    observer: Option<ObserverId>,
    last_pass: Option<u64>,
    trailing_scheduled: bool,
}

impl Watcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == WatchState::Running
    }

    /// Current observer handle, while running
    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    /// Start observing. Any previous observer is disconnected first; the
    /// caller performs the immediate initial pass.
    pub fn start(&mut self, tree: &mut DomTree, hint: &WatchHint) {
        self.stop(tree);
        let options = ObserverOptions {
            child_list: true,
            subtree: true,
            character_data: hint.character_data,
            attributes: false,
        };
        self.observer = Some(tree.observe(tree.root(), options));
        self.state = WatchState::Running;
        tracing::debug!(
            "watcher running (character_data: {})",
            hint.character_data
        );
    }

    /// Disconnect and drop the observer handle
    pub fn stop(&mut self, tree: &mut DomTree) {
        if let Some(id) = self.observer.take() {
            tree.disconnect(id);
        }
        self.state = WatchState::Stopped;
        self.last_pass = None;
        self.trailing_scheduled = false;
    }

    /// Digest a drained mutation batch. Returns true when a pass should run
    /// immediately; otherwise a trailing pass is already waiting at the
    /// window edge.
    pub fn on_mutations(
        &mut self,
        tree: &DomTree,
        records: &[MutationRecord],
        hint: &WatchHint,
        timers: &mut TimerQueue,
        now: u64,
    ) -> bool {
        if self.state != WatchState::Running || records.is_empty() {
            return false;
        }

        if hint.delayed_passes && batch_mounts_editor(tree, records, hint) {
            tracing::debug!("editor root mounted; scheduling follow-up pass");
            timers.schedule(now + EDITOR_MOUNT_DELAY_MS, PassKind::EditorMount);
        }

        match self.last_pass {
            Some(last) if now < last + THROTTLE_WINDOW_MS => {
                if !self.trailing_scheduled {
                    timers.schedule(last + THROTTLE_WINDOW_MS, PassKind::Throttled);
                    self.trailing_scheduled = true;
                }
                false
            }
            _ => true,
        }
    }

    /// Record that a pass ran at `now`
    pub fn note_pass(&mut self, now: u64) {
        self.last_pass = Some(now);
    }

    /// The scheduled trailing pass has fired
    pub fn trailing_fired(&mut self) {
        self.trailing_scheduled = false;
    }
}

/// Does this batch insert a node that is (or contains) an editor root?
fn batch_mounts_editor(tree: &DomTree, records: &[MutationRecord], hint: &WatchHint) -> bool {
    records
        .iter()
        .filter(|r| r.mutation_type == MutationType::ChildList)
        .flat_map(|r| r.added_nodes.iter().copied())
        .any(|added| {
            hint.editor_classes
                .iter()
                .any(|class| tree.has_class(added, class))
                || tree
                    .descendants(added)
                    .into_iter()
                    .any(|id| hint.editor_classes.iter().any(|class| tree.has_class(id, class)))
        })
}
