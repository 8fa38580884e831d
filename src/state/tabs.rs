use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scope::Level;
use crate::scope::identity::EntityId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    Candidates,
    Steps,
    Questions,
    Skills,
}

pub const ALL_TABS: [Tab; 5] = [
    Tab::Overview,
    Tab::Candidates,
    Tab::Steps,
    Tab::Questions,
    Tab::Skills,
];

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Candidates => "candidates",
            Tab::Steps => "steps",
            Tab::Questions => "questions",
            Tab::Skills => "skills",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Candidates => "Candidates",
            Tab::Steps => "Steps",
            Tab::Questions => "Questions",
            Tab::Skills => "Skills",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Tab::Overview),
            "candidates" => Ok(Tab::Candidates),
            "steps" => Ok(Tab::Steps),
            "questions" => Ok(Tab::Questions),
            "skills" => Ok(Tab::Skills),
            other => Err(format!(
                "unknown tab '{other}' (use overview|candidates|steps|questions|skills)"
            )),
        }
    }
}

/// Per-scope view state that survives scope switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSubState {
    pub active_tab: Tab,
    pub selected_step_id: Option<EntityId>,
    pub selected_question_id: Option<EntityId>,
}

impl UiSubState {
    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Any step selection invalidates the previously chosen question.
    pub fn select_step(&mut self, step_id: Option<EntityId>) {
        self.selected_step_id = step_id;
        self.selected_question_id = None;
    }

    pub fn select_question(&mut self, question_id: Option<EntityId>) {
        self.selected_question_id = question_id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "camelCase")]
pub enum TabAvailability {
    Available,
    Disabled(&'static str),
}

impl TabAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, TabAvailability::Available)
    }
}

pub fn gate(tab: Tab, level: Level, ui: &UiSubState) -> TabAvailability {
    let job_ad = level == Level::JobAd;
    match tab {
        Tab::Overview => TabAvailability::Available,
        Tab::Candidates | Tab::Steps if !job_ad => {
            TabAvailability::Disabled("Select a job ad to see this view.")
        }
        Tab::Candidates | Tab::Steps => TabAvailability::Available,
        Tab::Questions if !job_ad => TabAvailability::Disabled("Select a job ad first."),
        Tab::Questions if ui.selected_step_id.is_none() => {
            TabAvailability::Disabled("Select a step to see its questions.")
        }
        Tab::Questions => TabAvailability::Available,
        Tab::Skills if !job_ad => TabAvailability::Disabled("Select a job ad first."),
        Tab::Skills if ui.selected_question_id.is_none() => {
            TabAvailability::Disabled("Select a question to see its skills.")
        }
        Tab::Skills => TabAvailability::Available,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/state/tabs.rs"]
mod tests;
