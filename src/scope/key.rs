use std::fmt;

use serde::Serialize;

use crate::scope::identity::EntityId;
use crate::scope::{Level, ResolvedScope};

const ORG_PREFIX: &str = "analytics:org";
const SCOPE_PREFIX: &str = "analytics:scope";
const RESOLVER_PREFIX: &str = "analytics:resolver";

/// Stable storage key for one concrete scope instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScopeKey(String);

impl ScopeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn organization(org_id: EntityId) -> Self {
        Self(format!("{ORG_PREFIX}:{org_id}"))
    }

    /// Only the id of the key's own level participates, so changing an
    /// unrelated selection never moves the key.
    pub fn derive(level: Level, level_id: Option<EntityId>, org_id: EntityId) -> Self {
        match (level, level_id) {
            (Level::Organization, _) | (_, None) => Self::organization(org_id),
            (level, Some(id)) => Self(format!("{SCOPE_PREFIX}:{}:{id}", level.as_str())),
        }
    }

    pub fn for_scope(scope: &ResolvedScope) -> Self {
        Self::derive(scope.level, scope.level_id(), scope.org_id)
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the resolver state of one organization is kept between runs.
pub fn resolver_key(org_id: EntityId) -> String {
    format!("{RESOLVER_PREFIX}:{org_id}")
}
