use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::scope::identity::EntityId;
use crate::scope::key::{ScopeKey, resolver_key};
use crate::scope::resolver::{ResolverState, ScopeResolver};
use crate::scope::{Level, ResolvedScope, ScopeSelection};
use crate::state::tabs::{ALL_TABS, gate};
use crate::state::{KeyValueStore, ScopeStatePersistence, Tab, TabAvailability, UiSubState};
use crate::stats::candidates::{
    CandidateList, CandidateSummary, normalize_candidate_summary, normalize_candidates,
};
use crate::stats::endpoints::Endpoint;
use crate::stats::entities::{
    EntityList, EntityStats, normalize_entity_list, normalize_entity_stats,
};
use crate::stats::loader::{LoadState, StatsLoader};
use crate::stats::overview::{OverviewStats, normalize_overview};
use crate::stats::transport::StatsTransport;

/// The engine behind the dashboard: host selections in, per-tab data out.
///
/// Owns the resolver, the per-scope UI state and one loader per panel. Every
/// operation that can move the scope goes through `sync_scope`, which swaps
/// the persisted UI state and discards data fetched for the previous scope.
pub struct Analytics {
    org_id: EntityId,
    transport: Arc<dyn StatsTransport>,
    resolver: ScopeResolver,
    persistence: ScopeStatePersistence,
    selection: ScopeSelection,
    scope: ResolvedScope,
    selected_candidate: Option<EntityId>,
    selected_skill: Option<EntityId>,
    panels: Panels,
}

struct Panels {
    overview: StatsLoader<OverviewStats>,
    candidates: StatsLoader<CandidateList>,
    candidate_summary: StatsLoader<CandidateSummary>,
    candidate_stats: StatsLoader<EntityStats>,
    steps: StatsLoader<EntityList>,
    step_detail: StatsLoader<EntityStats>,
    questions: StatsLoader<EntityList>,
    question_detail: StatsLoader<EntityStats>,
    skills: StatsLoader<EntityList>,
    skill_detail: StatsLoader<EntityStats>,
}

impl Panels {
    fn new() -> Self {
        Self {
            overview: StatsLoader::new("overview", normalize_overview),
            candidates: StatsLoader::new("candidates", normalize_candidates),
            candidate_summary: StatsLoader::new("candidate-summary", normalize_candidate_summary),
            candidate_stats: StatsLoader::new("candidate-stats", normalize_entity_stats),
            steps: StatsLoader::new("steps", normalize_entity_list),
            step_detail: StatsLoader::new("step", normalize_entity_stats),
            questions: StatsLoader::new("questions", normalize_entity_list),
            question_detail: StatsLoader::new("question", normalize_entity_stats),
            skills: StatsLoader::new("skills", normalize_entity_list),
            skill_detail: StatsLoader::new("skill", normalize_entity_stats),
        }
    }

    fn clear_all(&mut self) {
        self.overview.clear();
        self.candidates.clear();
        self.candidate_summary.clear();
        self.candidate_stats.clear();
        self.clear_from_steps();
    }

    fn clear_from_steps(&mut self) {
        self.steps.clear();
        self.step_detail.clear();
        self.clear_from_questions();
    }

    fn clear_from_questions(&mut self) {
        self.questions.clear();
        self.question_detail.clear();
        self.clear_from_skills();
    }

    fn clear_from_skills(&mut self) {
        self.skills.clear();
        self.skill_detail.clear();
    }

    /// Failed panels of `tab` become retryable when the user navigates to it.
    fn reset_failed(&mut self, tab: Tab) {
        let reset = match tab {
            Tab::Overview => self.overview.reset_failed(),
            Tab::Candidates => {
                self.candidates.reset_failed()
                    | self.candidate_summary.reset_failed()
                    | self.candidate_stats.reset_failed()
            }
            Tab::Steps => self.steps.reset_failed() | self.step_detail.reset_failed(),
            Tab::Questions => self.questions.reset_failed() | self.question_detail.reset_failed(),
            Tab::Skills => self.skills.reset_failed() | self.skill_detail.reset_failed(),
        };
        if reset {
            debug!(tab = %tab, "failed panels reset for retry");
        }
    }

    fn wait(&mut self, timeout: Duration) -> bool {
        // Workers run concurrently, so one shared budget is enough.
        let deadline = std::time::Instant::now() + timeout;
        let left = || deadline.saturating_duration_since(std::time::Instant::now());
        let mut settled = true;
        settled &= self.overview.wait(left());
        settled &= self.candidates.wait(left());
        settled &= self.candidate_summary.wait(left());
        settled &= self.candidate_stats.wait(left());
        settled &= self.steps.wait(left());
        settled &= self.step_detail.wait(left());
        settled &= self.questions.wait(left());
        settled &= self.question_detail.wait(left());
        settled &= self.skills.wait(left());
        settled &= self.skill_detail.wait(left());
        settled
    }
}

impl Analytics {
    /// Mounts the engine with the host's initial selections. A resolver state
    /// saved for this organization (if any) is picked up from `store`.
    pub fn new(
        org_id: EntityId,
        transport: Arc<dyn StatsTransport>,
        store: Box<dyn KeyValueStore>,
        selection: ScopeSelection,
    ) -> Self {
        let resolver = ScopeResolver::from_state(load_resolver_state(store.as_ref(), org_id));
        let persistence = ScopeStatePersistence::new(store);
        let scope = resolver.resolve(&selection, org_id);
        let mut analytics = Self {
            org_id,
            transport,
            resolver,
            persistence,
            selection: ScopeSelection::default(),
            scope,
            selected_candidate: None,
            selected_skill: None,
            panels: Panels::new(),
        };
        analytics.set_selection(selection);
        analytics
    }

    pub fn level(&self) -> Level {
        self.scope.level
    }

    pub fn scope(&self) -> &ResolvedScope {
        &self.scope
    }

    pub fn scope_key(&self) -> Option<&ScopeKey> {
        self.persistence.key()
    }

    pub fn ui_state(&self) -> &UiSubState {
        self.persistence.state()
    }

    pub fn resolver_state(&self) -> &ResolverState {
        self.resolver.state()
    }

    /// Host selections changed (or were re-sent unchanged).
    pub fn set_selection(&mut self, selection: ScopeSelection) {
        self.resolver.observe(&selection);
        self.selection = selection;
        self.sync_scope();
    }

    pub fn goto_organization(&mut self) {
        self.resolver.goto_organization();
        self.sync_scope();
    }

    pub fn clear_force(&mut self) {
        self.resolver.clear_force();
        self.sync_scope();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.persistence.update(|ui| ui.set_tab(tab)) {
            self.panels.reset_failed(tab);
        }
    }

    pub fn select_step(&mut self, step_id: Option<EntityId>) {
        if self.persistence.update(|ui| ui.select_step(step_id)) {
            self.selected_skill = None;
            self.panels.step_detail.clear();
            self.panels.clear_from_questions();
        }
    }

    pub fn select_question(&mut self, question_id: Option<EntityId>) {
        if self.persistence.update(|ui| ui.select_question(question_id)) {
            self.selected_skill = None;
            self.panels.question_detail.clear();
            self.panels.clear_from_skills();
        }
    }

    pub fn select_candidate(&mut self, candidate_id: Option<EntityId>) {
        if self.selected_candidate != candidate_id {
            self.selected_candidate = candidate_id;
            self.panels.candidate_stats.clear();
        }
    }

    pub fn select_skill(&mut self, skill_id: Option<EntityId>) {
        if self.selected_skill != skill_id {
            self.selected_skill = skill_id;
            self.panels.skill_detail.clear();
        }
    }

    pub fn availability(&self, tab: Tab) -> TabAvailability {
        gate(tab, self.scope.level, self.persistence.state())
    }

    /// Issues the requests the active tab needs. Returns how many started;
    /// requests already in flight or committed are not repeated.
    pub fn refresh(&mut self) -> usize {
        let ui = *self.persistence.state();
        if !self.availability(ui.active_tab).is_available() {
            return 0;
        }
        let transport = Arc::clone(&self.transport);
        let p = &mut self.panels;
        let mut started = 0usize;
        let mut start = |requested: bool| started += usize::from(requested);

        match ui.active_tab {
            Tab::Overview => match Endpoint::overview(&self.scope) {
                Some(endpoint) => start(p.overview.request(&transport, endpoint)),
                None => p
                    .overview
                    .fail("occupation has no known department; cannot load statistics"),
            },
            Tab::Candidates => {
                let Some(job_ad_id) = self.scope.job_ad_id else {
                    return 0;
                };
                start(p.candidates.request(&transport, Endpoint::JobAdCandidates { job_ad_id }));
                start(
                    p.candidate_summary
                        .request(&transport, Endpoint::JobAdCandidateSummary { job_ad_id }),
                );
                if let Some(candidate_id) = self.selected_candidate {
                    start(
                        p.candidate_stats
                            .request(&transport, Endpoint::CandidateStats { candidate_id }),
                    );
                }
            }
            Tab::Steps => {
                let Some(job_ad_id) = self.scope.job_ad_id else {
                    return 0;
                };
                start(p.steps.request(&transport, Endpoint::JobAdSteps { job_ad_id }));
                if let Some(step_id) = ui.selected_step_id {
                    start(p.step_detail.request(&transport, Endpoint::Step { job_ad_id, step_id }));
                }
            }
            Tab::Questions => {
                let (Some(job_ad_id), Some(step_id)) = (self.scope.job_ad_id, ui.selected_step_id)
                else {
                    return 0;
                };
                start(
                    p.questions
                        .request(&transport, Endpoint::StepQuestions { job_ad_id, step_id }),
                );
                if let Some(question_id) = ui.selected_question_id {
                    start(p.question_detail.request(
                        &transport,
                        Endpoint::Question {
                            job_ad_id,
                            question_id,
                        },
                    ));
                }
            }
            Tab::Skills => {
                let Some(question_id) = ui.selected_question_id else {
                    return 0;
                };
                start(p.skills.request(&transport, Endpoint::QuestionSkills { question_id }));
                if let Some(skill_id) = self.selected_skill {
                    start(p.skill_detail.request(&transport, Endpoint::Skill { skill_id }));
                }
            }
        }
        debug!(tab = %ui.active_tab, started, "refresh");
        started
    }

    /// Blocks until every outstanding request settles or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let settled = self.panels.wait(timeout);
        if !settled {
            warn!(timeout_ms = timeout.as_millis() as u64, "statistics still loading after timeout");
        }
        settled
    }

    pub fn view(&self) -> DashboardView<'_> {
        let p = &self.panels;
        DashboardView {
            scope: &self.scope,
            scope_key: self.persistence.key().map(ScopeKey::as_str),
            ui: self.persistence.state(),
            forced_organization: self.resolver.is_forced(),
            tabs: ALL_TABS
                .iter()
                .map(|tab| TabStatus {
                    tab: *tab,
                    availability: self.availability(*tab),
                })
                .collect(),
            selected_candidate: self.selected_candidate,
            selected_skill: self.selected_skill,
            overview: p.overview.state(),
            candidates: p.candidates.state(),
            candidate_summary: p.candidate_summary.state(),
            candidate_stats: p.candidate_stats.state(),
            steps: p.steps.state(),
            step_detail: p.step_detail.state(),
            questions: p.questions.state(),
            question_detail: p.question_detail.state(),
            skills: p.skills.state(),
            skill_detail: p.skill_detail.state(),
        }
    }

    fn sync_scope(&mut self) {
        self.scope = self.resolver.resolve(&self.selection, self.org_id);
        let key = ScopeKey::for_scope(&self.scope);
        if self.persistence.switch_scope(key) {
            info!(
                level = %self.scope.level,
                key = self.persistence.key().map(ScopeKey::as_str).unwrap_or_default(),
                "scope changed"
            );
            self.selected_candidate = None;
            self.selected_skill = None;
            self.panels.clear_all();
        }
        self.save_resolver_state();
    }

    fn save_resolver_state(&mut self) {
        let payload = match serde_json::to_string(self.resolver.state()) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "could not encode resolver state");
                return;
            }
        };
        let key = resolver_key(self.org_id);
        if let Err(err) = self.persistence.store_mut().set(&key, &payload) {
            warn!(key = %key, error = %err, "session storage write failed");
        }
    }
}

fn load_resolver_state(store: &dyn KeyValueStore, org_id: EntityId) -> ResolverState {
    let key = resolver_key(org_id);
    match store.get(&key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            debug!(key = %key, error = %err, "discarding unreadable resolver state");
            ResolverState::default()
        }),
        Ok(None) => ResolverState::default(),
        Err(err) => {
            warn!(key = %key, error = %err, "session storage read failed; starting fresh");
            ResolverState::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStatus {
    pub tab: Tab,
    pub availability: TabAvailability,
}

/// Everything a renderer needs, borrowed from the engine.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    pub scope: &'a ResolvedScope,
    pub scope_key: Option<&'a str>,
    pub ui: &'a UiSubState,
    pub forced_organization: bool,
    pub tabs: Vec<TabStatus>,
    pub selected_candidate: Option<EntityId>,
    pub selected_skill: Option<EntityId>,
    pub overview: &'a LoadState<OverviewStats>,
    pub candidates: &'a LoadState<CandidateList>,
    pub candidate_summary: &'a LoadState<CandidateSummary>,
    pub candidate_stats: &'a LoadState<EntityStats>,
    pub steps: &'a LoadState<EntityList>,
    pub step_detail: &'a LoadState<EntityStats>,
    pub questions: &'a LoadState<EntityList>,
    pub question_detail: &'a LoadState<EntityStats>,
    pub skills: &'a LoadState<EntityList>,
    pub skill_detail: &'a LoadState<EntityStats>,
}

#[cfg(test)]
#[path = "../tests/src_inline/analytics.rs"]
mod tests;
