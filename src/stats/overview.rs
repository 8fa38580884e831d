use serde::Serialize;
use serde_json::Value;

use crate::scope::Level;
use crate::stats::endpoints::Endpoint;
use crate::stats::lookup::{count, fields, number};
use crate::stats::{
    DifficultyRanking, HistogramBucket, Kpi, OutcomeRates, RankedKind, count_or_len,
    parse_distribution, parse_ranking,
};

/// Canonical overview of one scope, whatever level it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub level: Level,
    pub kpis: Vec<Kpi>,
    pub outcome: OutcomeRates,
    pub score_distribution: Vec<HistogramBucket>,
    pub rankings: Vec<DifficultyRanking>,
}

/// Loader entry point: picks the level-specific shape from the endpoint.
pub fn normalize_overview(endpoint: &Endpoint, payload: &Value) -> OverviewStats {
    match endpoint {
        Endpoint::Department { .. } => normalize_department(payload),
        Endpoint::Occupation { .. } => normalize_occupation(payload),
        Endpoint::JobAd { .. } => normalize_job_ad(payload),
        _ => normalize_organization(payload),
    }
}

pub fn normalize_organization(payload: &Value) -> OverviewStats {
    let kpis = vec![
        Kpi::count(
            "Departments",
            count_or_len(payload, fields::DEPARTMENT_COUNT, RankedKind::Department),
        ),
        Kpi::count(
            "Occupations",
            count_or_len(payload, fields::OCCUPATION_COUNT, RankedKind::Occupation),
        ),
        Kpi::count(
            "Job ads",
            count_or_len(payload, fields::JOB_AD_COUNT, RankedKind::JobAd),
        ),
        Kpi::count("Candidates", count(payload, fields::CANDIDATE_COUNT)),
        Kpi::count("Interviews", count(payload, fields::INTERVIEW_COUNT)),
        Kpi::score("Average score", number(payload, fields::AVG_SCORE)),
    ];
    build(
        Level::Organization,
        payload,
        kpis,
        &[RankedKind::Department, RankedKind::Occupation, RankedKind::JobAd],
    )
}

pub fn normalize_department(payload: &Value) -> OverviewStats {
    let kpis = vec![
        Kpi::count(
            "Occupations",
            count_or_len(payload, fields::OCCUPATION_COUNT, RankedKind::Occupation),
        ),
        Kpi::count(
            "Job ads",
            count_or_len(payload, fields::JOB_AD_COUNT, RankedKind::JobAd),
        ),
        Kpi::count("Candidates", count(payload, fields::CANDIDATE_COUNT)),
        Kpi::score("Average score", number(payload, fields::AVG_SCORE)),
    ];
    build(
        Level::Department,
        payload,
        kpis,
        &[RankedKind::Occupation, RankedKind::JobAd],
    )
}

pub fn normalize_occupation(payload: &Value) -> OverviewStats {
    let kpis = vec![
        Kpi::count(
            "Job ads",
            count_or_len(payload, fields::JOB_AD_COUNT, RankedKind::JobAd),
        ),
        Kpi::count("Candidates", count(payload, fields::CANDIDATE_COUNT)),
        Kpi::score("Average score", number(payload, fields::AVG_SCORE)),
    ];
    build(Level::Occupation, payload, kpis, &[RankedKind::JobAd])
}

pub fn normalize_job_ad(payload: &Value) -> OverviewStats {
    let kpis = vec![
        Kpi::count("Candidates", count(payload, fields::CANDIDATE_COUNT)),
        Kpi::count(
            "Steps",
            count_or_len(payload, fields::STEP_COUNT, RankedKind::Step),
        ),
        Kpi::count(
            "Questions",
            count_or_len(payload, fields::QUESTION_COUNT, RankedKind::Question),
        ),
        Kpi::score("Average score", number(payload, fields::AVG_SCORE)),
    ];
    build(
        Level::JobAd,
        payload,
        kpis,
        &[RankedKind::Step, RankedKind::Question, RankedKind::Skill],
    )
}

fn build(level: Level, payload: &Value, mut kpis: Vec<Kpi>, ranked: &[RankedKind]) -> OverviewStats {
    let outcome = OutcomeRates::from_payload(payload);
    kpis.push(Kpi::percent("Approval rate", outcome.approval_rate));
    kpis.push(Kpi::percent("Rejection rate", outcome.rejection_rate));
    kpis.push(Kpi::percent("Hire rate", outcome.hire_rate));

    OverviewStats {
        level,
        kpis,
        outcome,
        score_distribution: parse_distribution(payload),
        rankings: ranked
            .iter()
            .filter_map(|kind| parse_ranking(payload, *kind))
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/overview.rs"]
mod tests;
