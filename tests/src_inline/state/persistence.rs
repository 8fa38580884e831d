use crate::error::StoreError;
use crate::scope::Level;
use crate::state::store::MemoryStore;

use super::*;

fn persistence() -> ScopeStatePersistence {
    ScopeStatePersistence::new(Box::new(MemoryStore::new()))
}

fn job_ad_key(id: i64) -> ScopeKey {
    ScopeKey::derive(Level::JobAd, Some(id), 1)
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(std::io::Error::other("quota exceeded").into())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(std::io::Error::other("quota exceeded").into())
    }
}

#[test]
fn test_unseen_scope_gets_defaults() {
    let mut p = persistence();
    assert!(p.switch_scope(job_ad_key(7)));
    assert_eq!(*p.state(), UiSubState::default());
    assert_eq!(p.key().map(ScopeKey::as_str), Some("analytics:scope:jobAd:7"));
}

#[test]
fn test_state_round_trips_per_scope() {
    let mut p = persistence();
    p.switch_scope(job_ad_key(7));
    p.update(|ui| ui.set_tab(Tab::Questions));
    p.update(|ui| ui.select_step(Some(3)));

    p.switch_scope(job_ad_key(8));
    assert_eq!(p.state().active_tab, Tab::Overview);
    assert_eq!(p.state().selected_step_id, None);

    p.switch_scope(job_ad_key(7));
    assert_eq!(p.state().active_tab, Tab::Questions);
    assert_eq!(p.state().selected_step_id, Some(3));
}

#[test]
fn test_switch_to_same_key_is_noop() {
    let mut p = persistence();
    p.switch_scope(job_ad_key(7));
    p.update(|ui| ui.set_tab(Tab::Steps));
    assert!(!p.switch_scope(job_ad_key(7)));
    assert_eq!(p.state().active_tab, Tab::Steps);
}

#[test]
fn test_restore_replaces_whole_state() {
    let mut store = MemoryStore::new();
    store
        .set("analytics:scope:jobAd:8", "{\"activeTab\":\"steps\"}")
        .unwrap();
    let mut p = ScopeStatePersistence::new(Box::new(store));

    p.switch_scope(job_ad_key(7));
    p.update(|ui| ui.select_step(Some(3)));
    p.update(|ui| ui.select_question(Some(5)));

    p.switch_scope(job_ad_key(8));
    assert_eq!(
        *p.state(),
        UiSubState {
            active_tab: Tab::Steps,
            selected_step_id: None,
            selected_question_id: None,
        }
    );
}

#[test]
fn test_corrupt_payload_gives_defaults() {
    let mut store = MemoryStore::new();
    store.set("analytics:scope:jobAd:7", "{broken").unwrap();
    store.set("analytics:scope:jobAd:8", "[1,2]").unwrap();
    let mut p = ScopeStatePersistence::new(Box::new(store));

    p.switch_scope(job_ad_key(7));
    assert_eq!(*p.state(), UiSubState::default());
    p.switch_scope(job_ad_key(8));
    assert_eq!(*p.state(), UiSubState::default());
}

#[test]
fn test_lenient_field_coercion() {
    let mut store = MemoryStore::new();
    store
        .set(
            "analytics:scope:jobAd:7",
            "{\"activeTab\":\"bogus\",\"selectedStepId\":\"12\",\"selectedQuestionId\":\"x\"}",
        )
        .unwrap();
    let mut p = ScopeStatePersistence::new(Box::new(store));
    p.switch_scope(job_ad_key(7));
    assert_eq!(p.state().active_tab, Tab::Overview);
    assert_eq!(p.state().selected_step_id, Some(12));
    assert_eq!(p.state().selected_question_id, None);
}

#[test]
fn test_update_without_change_skips_write() {
    let mut p = persistence();
    p.switch_scope(job_ad_key(7));
    assert!(!p.update(|ui| ui.set_tab(Tab::Overview)));
    assert!(p.update(|ui| ui.set_tab(Tab::Candidates)));
    assert_eq!(
        p.store_mut().get("analytics:scope:jobAd:7").unwrap().as_deref(),
        Some("{\"activeTab\":\"candidates\",\"selectedStepId\":null,\"selectedQuestionId\":null}")
    );
}

#[test]
fn test_failing_store_is_swallowed() {
    let mut p = ScopeStatePersistence::new(Box::new(FailingStore));
    assert!(p.switch_scope(job_ad_key(7)));
    assert_eq!(*p.state(), UiSubState::default());
    assert!(p.update(|ui| ui.set_tab(Tab::Steps)));
    assert_eq!(p.state().active_tab, Tab::Steps);
}
