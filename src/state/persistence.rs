use serde_json::Value;
use tracing::{debug, warn};

use crate::scope::identity::to_int;
use crate::scope::key::ScopeKey;
use crate::state::store::KeyValueStore;
use crate::state::tabs::{Tab, UiSubState};

/// Keeps the UI sub-state of the current scope in sync with session storage.
pub struct ScopeStatePersistence {
    store: Box<dyn KeyValueStore>,
    key: Option<ScopeKey>,
    state: UiSubState,
}

impl ScopeStatePersistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: None,
            state: UiSubState::default(),
        }
    }

    pub fn key(&self) -> Option<&ScopeKey> {
        self.key.as_ref()
    }

    pub fn state(&self) -> &UiSubState {
        &self.state
    }

    /// Restores the sub-state stored for `key` (full replace) and writes it
    /// back. Returns `false` when the key did not change.
    pub fn switch_scope(&mut self, key: ScopeKey) -> bool {
        if self.key.as_ref() == Some(&key) {
            return false;
        }
        self.state = self.restore(&key);
        debug!(key = %key, tab = %self.state.active_tab, "restored scope state");
        self.key = Some(key);
        self.persist();
        true
    }

    /// Applies `change` and persists when any field actually moved.
    pub fn update(&mut self, change: impl FnOnce(&mut UiSubState)) -> bool {
        let before = self.state;
        change(&mut self.state);
        if self.state == before {
            return false;
        }
        self.persist();
        true
    }

    fn restore(&self, key: &ScopeKey) -> UiSubState {
        let raw = match self.store.get(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return UiSubState::default(),
            Err(err) => {
                warn!(key = %key, error = %err, "session storage read failed; using defaults");
                return UiSubState::default();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => UiSubState {
                active_tab: map
                    .get("activeTab")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse::<Tab>().ok())
                    .unwrap_or_default(),
                selected_step_id: map.get("selectedStepId").and_then(to_int),
                selected_question_id: map.get("selectedQuestionId").and_then(to_int),
            },
            Ok(_) | Err(_) => {
                debug!(key = %key, "discarding unreadable scope state");
                UiSubState::default()
            }
        }
    }

    fn persist(&mut self) {
        let Some(key) = &self.key else {
            return;
        };
        let payload = match serde_json::to_string(&self.state) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "could not encode scope state");
                return;
            }
        };
        if let Err(err) = self.store.set(key.as_str(), &payload) {
            warn!(key = %key, error = %err, "session storage write failed");
        }
    }

    /// Raw access for state that lives next to the per-scope entries.
    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/state/persistence.rs"]
mod tests;
