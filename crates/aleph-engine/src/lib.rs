//! Aleph Engine - RTL alignment for hosted web apps
//!
//! Detects Hebrew-initial text blocks in a live DOM and flips their visual
//! reading direction, per-site. The engine is built to run against a foreign,
//! constantly-mutating tree: passes are idempotent, repeated work is bounded
//! by a throttle window, and everything the engine touches is tracked so a
//! disable toggle can strip it back out.
//!
//! The embedder owns the event loop. It mutates the document through
//! [`Session::document_mut`], delivers input events with
//! [`Session::notify_input`], and calls [`Session::pump`] with a monotonic
//! millisecond clock; the session drains mutation records and due timers and
//! runs reconciliation passes as needed.

pub mod adapters;
mod markers;
pub mod reconcile;
mod registry;
mod session;
mod store;
mod timers;
mod toggle;
mod watcher;

pub use adapters::{Site, WatchHint};
pub use markers::MarkerTable;
pub use registry::{InputBinding, InputFamily, ListenerRegistry};
pub use session::Session;
pub use store::{ENABLED_KEY, JsonStore, MENU_HIDDEN_KEY, MemoryStore, PrefStore};
pub use timers::{PassKind, ScheduledPass, TimerQueue};
pub use toggle::{TOGGLE_ACTION, ToggleController, ToggleEvent, ToggleMessage, Transition};
pub use watcher::{EDITOR_MOUNT_DELAY_MS, THROTTLE_WINDOW_MS, WatchState, Watcher};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
