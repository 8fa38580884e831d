pub mod identity;
pub mod key;
pub mod resolver;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use identity::{
    DEPARTMENT_ID_FIELDS, EntityId, JOB_AD_ID_FIELDS, OCCUPATION_ID_FIELDS,
    PARENT_DEPARTMENT_FIELDS, PARENT_OCCUPATION_FIELDS, get_opt_id,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Organization,
    Department,
    Occupation,
    JobAd,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Organization => "organization",
            Level::Department => "department",
            Level::Occupation => "occupation",
            Level::JobAd => "jobAd",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-owned selections. Each entry is `None` or an object carrying an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSelection {
    #[serde(default)]
    pub department_data: Option<Value>,
    #[serde(default)]
    pub occupation_data: Option<Value>,
    #[serde(default)]
    pub job_ad_data: Option<Value>,
}

impl ScopeSelection {
    /// Builds a selection from plain ids, wrapping each as `{"id": n}`.
    pub fn from_ids(
        department: Option<EntityId>,
        occupation: Option<EntityId>,
        job_ad: Option<EntityId>,
    ) -> Self {
        Self {
            department_data: department.map(|id| json!({ "id": id })),
            occupation_data: occupation.map(|id| json!({ "id": id })),
            job_ad_data: job_ad.map(|id| json!({ "id": id })),
        }
    }

    pub fn ids(&self) -> IdTriple {
        IdTriple {
            department: get_opt_id(self.department_data.as_ref(), DEPARTMENT_ID_FIELDS),
            occupation: get_opt_id(self.occupation_data.as_ref(), OCCUPATION_ID_FIELDS),
            job_ad: get_opt_id(self.job_ad_data.as_ref(), JOB_AD_ID_FIELDS),
        }
    }

    fn data_for(&self, level: Level) -> Option<&Value> {
        match level {
            Level::Organization => None,
            Level::Department => self.department_data.as_ref(),
            Level::Occupation => self.occupation_data.as_ref(),
            Level::JobAd => self.job_ad_data.as_ref(),
        }
    }
}

/// The normalized identity of each selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdTriple {
    pub department: Option<EntityId>,
    pub occupation: Option<EntityId>,
    pub job_ad: Option<EntityId>,
}

impl IdTriple {
    pub fn get(&self, level: Level) -> Option<EntityId> {
        match level {
            Level::Organization => None,
            Level::Department => self.department,
            Level::Occupation => self.occupation,
            Level::JobAd => self.job_ad,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedScope {
    pub level: Level,
    pub org_id: EntityId,
    pub department_id: Option<EntityId>,
    pub occupation_id: Option<EntityId>,
    /// Present only when `level` is `JobAd`.
    pub job_ad_id: Option<EntityId>,
    pub scope_data: Value,
}

impl ResolvedScope {
    /// Derives the scope for an already-resolved `level`.
    pub fn build(level: Level, selection: &ScopeSelection, org_id: EntityId) -> Self {
        let ids = selection.ids();
        let job_ad = selection.job_ad_data.as_ref();
        let occupation = selection.occupation_data.as_ref();

        let department_id = ids
            .department
            .or_else(|| get_opt_id(occupation, PARENT_DEPARTMENT_FIELDS))
            .or_else(|| get_opt_id(job_ad, PARENT_DEPARTMENT_FIELDS));
        let occupation_id = ids
            .occupation
            .or_else(|| get_opt_id(job_ad, PARENT_OCCUPATION_FIELDS));

        let scope_data = match selection.data_for(level) {
            Some(data) => data.clone(),
            None => json!({ "orgId": org_id }),
        };

        Self {
            level,
            org_id,
            department_id,
            occupation_id,
            job_ad_id: if level == Level::JobAd { ids.job_ad } else { None },
            scope_data,
        }
    }

    /// Id of the entity the level points at (org id at organization level).
    pub fn level_id(&self) -> Option<EntityId> {
        match self.level {
            Level::Organization => Some(self.org_id),
            Level::Department => self.department_id,
            Level::Occupation => self.occupation_id,
            Level::JobAd => self.job_ad_id,
        }
    }

    pub fn display_name(&self) -> String {
        let named = ["name", "title", "jobTitle", "job_title"]
            .iter()
            .find_map(|field| self.scope_data.get(*field).and_then(Value::as_str));
        match (named, self.level_id()) {
            (Some(name), _) => name.to_string(),
            (None, Some(id)) => format!("{} #{}", self.level, id),
            (None, None) => self.level.to_string(),
        }
    }
}
