use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scope::identity::EntityId;
use crate::scope::{IdTriple, Level, ResolvedScope, ScopeSelection};

/// Order in which identities are evaluated within one transition. Later
/// entries win a simultaneous change, so the job ad (most specific) is last.
const EVALUATION_ORDER: [Level; 3] = [Level::Department, Level::Occupation, Level::JobAd];

/// Fallback order when the active identity is cleared.
const CASCADE_ORDER: [Level; 3] = [Level::JobAd, Level::Occupation, Level::Department];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverState {
    pub prev: IdTriple,
    pub last_changed: Option<Level>,
    pub forced: Option<Level>,
}

impl ResolverState {
    pub fn level(&self) -> Level {
        self.forced.or(self.last_changed).unwrap_or(Level::Organization)
    }
}

/// Pure transition: previous state plus the new identity triple.
pub fn reduce(state: &ResolverState, next: IdTriple) -> ResolverState {
    let mut out = *state;

    for level in EVALUATION_ORDER {
        let before = state.prev.get(level);
        let after = next.get(level);
        if before == after {
            continue;
        }
        match after {
            Some(_) => {
                out.forced = None;
                out.last_changed = Some(level);
            }
            None if out.last_changed == Some(level) => {
                out.last_changed = cascade_from(level, &next);
            }
            None => {}
        }
    }

    out.prev = next;
    out
}

fn cascade_from(vacated: Level, ids: &IdTriple) -> Option<Level> {
    CASCADE_ORDER
        .into_iter()
        .filter(|level| *level != vacated)
        .find(|level| ids.get(*level).is_some())
}

/// Stateful wrapper the controller drives on every selection change.
#[derive(Debug, Clone, Default)]
pub struct ScopeResolver {
    state: ResolverState,
}

impl ScopeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: ResolverState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    /// Feeds the host's current selections and returns the effective level.
    pub fn observe(&mut self, selection: &ScopeSelection) -> Level {
        let next = reduce(&self.state, selection.ids());
        if next != self.state {
            debug!(
                from = %self.state.level(),
                to = %next.level(),
                "scope transition"
            );
        }
        self.state = next;
        self.level()
    }

    pub fn level(&self) -> Level {
        let level = self.state.level();
        // A restored state may name a level whose identity is gone.
        if level != Level::Organization && self.state.prev.get(level).is_none() {
            return cascade_from(level, &self.state.prev).unwrap_or(Level::Organization);
        }
        level
    }

    pub fn resolve(&self, selection: &ScopeSelection, org_id: EntityId) -> ResolvedScope {
        ResolvedScope::build(self.level(), selection, org_id)
    }

    /// Shows the organization without clearing any selection.
    pub fn goto_organization(&mut self) {
        self.state.forced = Some(Level::Organization);
    }

    /// Drops a forced organization view, returning to the selected child scope.
    pub fn clear_force(&mut self) {
        self.state.forced = None;
    }

    pub fn is_forced(&self) -> bool {
        self.state.forced.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/scope/resolver.rs"]
mod tests;
