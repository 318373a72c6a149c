//! Toggle controller
//!
//! Process-wide enabled flag with persistence, plus the wire message the
//! toggle UI delivers. The controller only flips state and persists it; the
//! session reacts to the returned transition (watcher start/stop, reset).

use serde::{Deserialize, Serialize};

use crate::store::{ENABLED_KEY, MENU_HIDDEN_KEY, PrefStore};

/// Action string of the toggle message
pub const TOGGLE_ACTION: &str = "toggleExtension";

/// Inbound message from the toggle UI, one per user click
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleMessage {
    pub action: String,
    pub enabled: bool,
}

/// What a `set_enabled` call actually changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enabled,
    Disabled,
    Unchanged,
}

/// Notification for the external UI surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    StateChanged(bool),
}

/// Persisted enabled/hidden flags with a single writer
#[derive(Debug)]
pub struct ToggleController<S: PrefStore> {
    store: S,
    enabled: bool,
    menu_hidden: bool,
}

impl<S: PrefStore> ToggleController<S> {
    /// Read persisted flags; enabled defaults to true, hidden to false
    pub fn new(store: S) -> Self {
        let enabled = store.get_bool(ENABLED_KEY).unwrap_or(true);
        let menu_hidden = store.get_bool(MENU_HIDDEN_KEY).unwrap_or(false);
        Self {
            store,
            enabled,
            menu_hidden,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn menu_hidden(&self) -> bool {
        self.menu_hidden
    }

    /// Flip the enabled flag, persisting on change
    pub fn set_enabled(&mut self, enabled: bool) -> Transition {
        if enabled == self.enabled {
            return Transition::Unchanged;
        }
        self.enabled = enabled;
        self.store.set_bool(ENABLED_KEY, enabled);
        if enabled {
            Transition::Enabled
        } else {
            Transition::Disabled
        }
    }

    /// Persist the hidden-menu flag (UI-owned, no engine behavior)
    pub fn set_menu_hidden(&mut self, hidden: bool) {
        if hidden != self.menu_hidden {
            self.menu_hidden = hidden;
            self.store.set_bool(MENU_HIDDEN_KEY, hidden);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_defaults() {
        let controller = ToggleController::new(MemoryStore::new());
        assert!(controller.enabled());
        assert!(!controller.menu_hidden());
    }

    #[test]
    fn test_set_enabled_persists() {
        let mut controller = ToggleController::new(MemoryStore::new());
        assert_eq!(controller.set_enabled(false), Transition::Disabled);
        assert_eq!(controller.store().get_bool(ENABLED_KEY), Some(false));
        assert_eq!(controller.set_enabled(false), Transition::Unchanged);
        assert_eq!(controller.set_enabled(true), Transition::Enabled);
    }

    #[test]
    fn test_persisted_flag_survives_restart() {
        let mut store = MemoryStore::new();
        store.set_bool(ENABLED_KEY, false);
        let controller = ToggleController::new(store);
        assert!(!controller.enabled());
    }

    #[test]
    fn test_message_wire_shape() {
        let msg: ToggleMessage =
            serde_json::from_str(r#"{"action": "toggleExtension", "enabled": false}"#).unwrap();
        assert_eq!(msg.action, TOGGLE_ACTION);
        assert!(!msg.enabled);
    }
}
