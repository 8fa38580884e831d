use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};

use super::*;
use crate::analytics::Analytics;
use crate::error::FetchError;
use crate::scope::ScopeSelection;
use crate::state::MemoryStore;
use crate::stats::transport::StatsTransport;

fn fixture(path: &str) -> Result<Value, FetchError> {
    match path {
        "statistics/organization/1" => Ok(json!({
            "departmentCount": 3,
            "approvalRate": 50,
            "rejectionRate": 20,
            "hireRate": 10,
            "scoreDistribution": [{ "range": "0-50", "count": 1 }, { "range": "50+", "count": 2 }],
            "departments": [{ "id": 4, "name": "Sales", "avgScore": 48 }]
        })),
        "statistics/jobad/101/steps" => Ok(json!([
            { "id": 1, "title": "Screen", "avgScore": 70 },
            { "id": 2, "title": "Coding", "avgScore": 40 }
        ])),
        other => Err(FetchError::Status {
            status: 500,
            path: other.to_string(),
        }),
    }
}

fn engine(selection: ScopeSelection) -> Analytics {
    let transport: Arc<dyn StatsTransport> = Arc::new(fixture);
    Analytics::new(1, transport, Box::new(MemoryStore::new()), selection)
}

fn loaded(mut analytics: Analytics) -> String {
    analytics.refresh();
    analytics.wait(Duration::from_secs(5));
    render_dashboard_text(&analytics.view())
}

#[test]
fn test_organization_overview_text() {
    let out = loaded(engine(ScopeSelection::default()));
    assert!(out.contains("Scope: organization #1 (organization)"));
    assert!(out.contains("Scope key: analytics:org:1"));
    assert!(out.contains(
        "Tabs: *Overview Candidates (disabled) Steps (disabled) Questions (disabled) Skills (disabled)"
    ));
    assert!(out.contains("Departments      3"));
    assert!(out.contains("Interviews       —"));
    assert!(out.contains("approved 50.0% | hired 10.0% | rejected 20.0% | pending 20.0%"));
    assert!(out.contains("50-100 |"));
    assert!(out.contains("Hardest departments (lowest average first):"));
    assert!(out.contains("Sales"));
}

#[test]
fn test_failed_panel_text() {
    let out = loaded(engine(ScopeSelection::from_ids(Some(4), None, None)));
    assert!(out.contains("Scope: department #4 (department)"));
    assert!(out.contains("Error: HTTP 500 for statistics/department/4"));
}

#[test]
fn test_disabled_active_tab_shows_reason() {
    let mut analytics = engine(ScopeSelection::from_ids(None, None, Some(101)));
    analytics.set_tab(Tab::Questions);
    let out = loaded(analytics);
    assert!(out.contains("*Questions (disabled)"));
    assert!(out.contains("Select a step to see its questions."));
    assert!(!out.contains("No data."));
}

#[test]
fn test_steps_tab_text() {
    let mut analytics = engine(ScopeSelection::from_ids(None, None, Some(101)));
    analytics.set_tab(Tab::Steps);
    let out = loaded(analytics);
    assert!(out.contains("Steps\n-----\n"));
    assert!(out.contains("Screen"));
    assert!(out.contains("Hardest steps (lowest average first):"));
    let hardest = out.split("Hardest steps").nth(1).unwrap();
    assert!(hardest.find("Coding").unwrap() < hardest.find("Screen").unwrap());
}

#[test]
fn test_idle_panel_text() {
    let mut analytics = engine(ScopeSelection::from_ids(None, None, Some(101)));
    analytics.set_tab(Tab::Candidates);
    let out = render_dashboard_text(&analytics.view());
    assert!(out.contains("Candidate summary\n-----------------\nNo data."));
}

#[test]
fn test_forced_organization_note() {
    let mut analytics = engine(ScopeSelection::from_ids(Some(4), None, None));
    analytics.goto_organization();
    let out = render_dashboard_text(&analytics.view());
    assert!(out.contains("Showing organization view; selections are kept."));
}

#[test]
fn test_selected_step_titled_from_list() {
    let mut analytics = engine(ScopeSelection::from_ids(None, None, Some(101)));
    analytics.set_tab(Tab::Steps);
    analytics.select_step(Some(2));
    let out = loaded(analytics);
    assert!(out.contains("Step: Coding\n------------\n"));
    assert!(out.contains("Error: HTTP 500 for statistics/jobad/101/step/2"));
}
