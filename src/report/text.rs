use crate::analytics::DashboardView;
use crate::report::widgets::{
    BAR_WIDTH, render_difficulty_list, render_histogram, render_kpi, render_segmented_bar,
};
use crate::report::{RANKING_LIMIT, ranking_title};
use crate::state::{Tab, TabAvailability};
use crate::stats::candidates::{CandidateList, CandidateSummary};
use crate::stats::entities::{EntityList, EntityStats};
use crate::stats::loader::LoadState;
use crate::stats::lookup::{format_count, format_number};
use crate::stats::overview::OverviewStats;
use crate::stats::{Kpi, RankedKind};

pub fn render_dashboard_text(view: &DashboardView<'_>) -> String {
    let mut out = String::new();

    out.push_str("Interview Analytics\n");
    out.push_str("===================\n\n");

    out.push_str(&format!(
        "Scope: {} ({})\n",
        view.scope.display_name(),
        view.scope.level
    ));
    if let Some(key) = view.scope_key {
        out.push_str(&format!("Scope key: {key}\n"));
    }
    if view.forced_organization {
        out.push_str("Showing organization view; selections are kept.\n");
    }

    out.push_str("Tabs:");
    for status in &view.tabs {
        let marker = if status.tab == view.ui.active_tab { "*" } else { "" };
        let state = match status.availability {
            TabAvailability::Available => "",
            TabAvailability::Disabled(_) => " (disabled)",
        };
        out.push_str(&format!(" {marker}{}{state}", status.tab.label()));
    }
    out.push('\n');
    out.push_str(&format!(
        "Selected step: {} | question: {}\n\n",
        format_id(view.ui.selected_step_id),
        format_id(view.ui.selected_question_id)
    ));

    let active = view.ui.active_tab;
    let availability = view
        .tabs
        .iter()
        .find(|s| s.tab == active)
        .map(|s| s.availability.clone())
        .unwrap_or(TabAvailability::Available);
    if let TabAvailability::Disabled(reason) = availability {
        out.push_str(&format!("{}\n{reason}\n", active.label()));
        return out;
    }

    match active {
        Tab::Overview => push_state(&mut out, "Overview", view.overview, push_overview),
        Tab::Candidates => {
            push_state(&mut out, "Candidate summary", view.candidate_summary, push_summary);
            push_state(&mut out, "Candidates", view.candidates, push_candidates);
            if view.selected_candidate.is_some() {
                push_state(&mut out, "Candidate", view.candidate_stats, push_entity);
            }
        }
        Tab::Steps => {
            push_state(&mut out, "Steps", view.steps, push_entity_list);
            if let Some(step_id) = view.ui.selected_step_id {
                let title = detail_title("Step", view.steps, step_id);
                push_state(&mut out, &title, view.step_detail, push_entity);
            }
        }
        Tab::Questions => {
            push_state(&mut out, "Questions", view.questions, push_entity_list);
            if let Some(question_id) = view.ui.selected_question_id {
                let title = detail_title("Question", view.questions, question_id);
                push_state(&mut out, &title, view.question_detail, push_entity);
            }
        }
        Tab::Skills => {
            push_state(&mut out, "Skills", view.skills, push_entity_list);
            if view.selected_skill.is_some() {
                push_state(&mut out, "Skill", view.skill_detail, push_entity);
            }
        }
    }
    out
}

/// Names the selected entity when its parent list has already loaded.
fn detail_title(noun: &str, list: &LoadState<EntityList>, id: i64) -> String {
    match list.ready().and_then(|list| list.name_of(id)) {
        Some(name) => format!("{noun}: {name}"),
        None => format!("{noun} {id}"),
    }
}

fn push_state<T>(out: &mut String, title: &str, state: &LoadState<T>, body: fn(&mut String, &T)) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.chars().count()));
    out.push('\n');
    match state {
        LoadState::Idle => out.push_str("No data.\n"),
        LoadState::Loading => out.push_str("Loading...\n"),
        LoadState::Failed(message) => out.push_str(&format!("Error: {message}\n")),
        LoadState::Ready(data) => body(out, data),
    }
    out.push('\n');
}

fn push_kpis(out: &mut String, kpis: &[Kpi]) {
    for kpi in kpis {
        out.push_str(&render_kpi(kpi));
        out.push('\n');
    }
}

fn push_lines(out: &mut String, lines: Vec<String>) {
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
}

fn push_overview(out: &mut String, stats: &OverviewStats) {
    push_kpis(out, &stats.kpis);
    out.push_str(&format!(
        "Outcomes: {}\n",
        render_segmented_bar(&stats.outcome, BAR_WIDTH)
    ));
    out.push_str("Score distribution:\n");
    push_lines(out, render_histogram(&stats.score_distribution, BAR_WIDTH));
    for ranking in &stats.rankings {
        out.push_str(&format!("{}:\n", ranking_title(ranking.kind)));
        push_lines(out, render_difficulty_list(&ranking.items, RANKING_LIMIT));
    }
}

fn push_summary(out: &mut String, summary: &CandidateSummary) {
    out.push_str(&format!(
        "Total {} | approved {} | rejected {} | hired {} | pending {}\n",
        format_count(summary.total),
        format_count(summary.approved),
        format_count(summary.rejected),
        format_count(summary.hired),
        format_count(summary.pending)
    ));
    out.push_str(&format!(
        "Average score: {}\n",
        format_number(summary.avg_score, 1)
    ));
    out.push_str(&format!(
        "Outcomes: {}\n",
        render_segmented_bar(&summary.outcome, BAR_WIDTH)
    ));
}

fn push_candidates(out: &mut String, list: &CandidateList) {
    if list.rows.is_empty() {
        out.push_str("No candidates.\n");
        return;
    }
    for row in &list.rows {
        out.push_str(&format!(
            "  {:>6} {:<28} avg {:>5} steps {:>3} {}\n",
            format_id(row.id),
            row.name,
            format_number(row.avg_score, 1),
            format_count(row.completed_steps),
            row.status.as_deref().unwrap_or("")
        ));
    }
    out.push_str("Top candidates:\n");
    for (idx, row) in list.top(RANKING_LIMIT).iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {} ({})\n",
            idx + 1,
            row.name,
            format_number(row.avg_score, 1)
        ));
    }
}

fn push_entity_list(out: &mut String, list: &EntityList) {
    if list.items.is_empty() {
        out.push_str(&format!("No {}s.\n", list.kind.noun()));
        return;
    }
    for item in &list.items {
        out.push_str(&format!(
            "  {:>6} {:<32} avg {}\n",
            format_id(item.id),
            item.name,
            format_number(item.avg_score, 1)
        ));
    }
    out.push_str(&format!("{}:\n", ranking_title(list.kind)));
    push_lines(out, render_difficulty_list(&list.hardest, RANKING_LIMIT));
}

fn push_entity(out: &mut String, stats: &EntityStats) {
    let name = stats.name.as_deref().unwrap_or(stats.kind.noun());
    out.push_str(&format!("{name} [{}]\n", format_id(stats.id)));
    out.push_str(&format!(
        "Average {} | min {} | max {} | responses {}\n",
        format_number(stats.avg_score, 1),
        format_number(stats.min_score, 1),
        format_number(stats.max_score, 1),
        format_count(stats.responses)
    ));
    if let Some(status) = &stats.status {
        out.push_str(&format!("Status: {status}\n"));
    }
    out.push_str("Score distribution:\n");
    push_lines(out, render_histogram(&stats.score_distribution, BAR_WIDTH));
    if let Some(breakdown) = &stats.breakdown {
        let title = match (stats.kind, breakdown.kind) {
            (RankedKind::Candidate, RankedKind::Step) => "Scores by step".to_string(),
            (_, kind) => ranking_title(kind),
        };
        out.push_str(&format!("{title}:\n"));
        push_lines(out, render_difficulty_list(&breakdown.items, RANKING_LIMIT));
    }
}

fn format_id(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
