use serde::Serialize;
use serde_json::Value;

use crate::scope::identity::EntityId;
use crate::stats::endpoints::Endpoint;
use crate::stats::lookup::{LIST_CONTAINERS, count, fields, id, number, rows, text};
use crate::stats::{OutcomeRates, RankedKind, rate_from_counts};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRow {
    pub id: Option<EntityId>,
    pub name: String,
    pub avg_score: Option<f64>,
    pub status: Option<String>,
    pub completed_steps: Option<u64>,
}

impl CandidateRow {
    fn from_row(row: &Value) -> Self {
        let id = id(row, RankedKind::Candidate.id_fields());
        let name = text(row, RankedKind::Candidate.name_fields())
            .or_else(|| full_name(row))
            .unwrap_or_else(|| match id {
                Some(id) => format!("candidate #{id}"),
                None => "candidate".to_string(),
            });
        Self {
            id,
            name,
            avg_score: number(row, fields::AVG_SCORE),
            status: text(row, fields::STATUS),
            completed_steps: count(row, fields::COMPLETED_STEPS),
        }
    }
}

fn full_name(row: &Value) -> Option<String> {
    let first = text(row, &["firstName", "first_name"]);
    let last = text(row, &["lastName", "last_name"]);
    match (first, last) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        (Some(one), None) | (None, Some(one)) => Some(one),
        (None, None) => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateList {
    pub rows: Vec<CandidateRow>,
}

impl CandidateList {
    /// Best scores first; stable, unscored candidates last.
    pub fn top(&self, limit: usize) -> Vec<&CandidateRow> {
        let mut sorted = self.rows.iter().collect::<Vec<_>>();
        sorted.sort_by(|a, b| match (a.avg_score, b.avg_score) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        sorted.truncate(limit);
        sorted
    }
}

pub fn normalize_candidates(_endpoint: &Endpoint, payload: &Value) -> CandidateList {
    CandidateList {
        rows: rows(payload, LIST_CONTAINERS)
            .iter()
            .filter(|row| row.is_object())
            .map(CandidateRow::from_row)
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub total: Option<u64>,
    pub approved: Option<u64>,
    pub rejected: Option<u64>,
    pub hired: Option<u64>,
    pub pending: Option<u64>,
    pub avg_score: Option<f64>,
    pub outcome: OutcomeRates,
}

/// Sum of the counts that are present; `None` when none are.
fn sum_counts(counts: &[Option<u64>]) -> Option<u64> {
    counts.iter().flatten().copied().reduce(|a, b| a + b)
}

/// Rates come from the payload when present, otherwise from the counts. A
/// missing total falls back to the sum of the outcome counts.
pub fn normalize_candidate_summary(_endpoint: &Endpoint, payload: &Value) -> CandidateSummary {
    let approved = count(payload, fields::APPROVED);
    let rejected = count(payload, fields::REJECTED);
    let hired = count(payload, fields::HIRED);
    let pending = count(payload, fields::PENDING);
    let total = count(payload, fields::CANDIDATE_COUNT)
        .or_else(|| sum_counts(&[approved, rejected, hired, pending]));

    let reported = OutcomeRates::from_payload(payload);
    let outcome = OutcomeRates {
        approval_rate: reported
            .approval_rate
            .or_else(|| rate_from_counts(approved, total)),
        rejection_rate: reported
            .rejection_rate
            .or_else(|| rate_from_counts(rejected, total)),
        hire_rate: reported.hire_rate.or_else(|| rate_from_counts(hired, total)),
    };

    CandidateSummary {
        total,
        approved,
        rejected,
        hired,
        pending,
        avg_score: number(payload, fields::AVG_SCORE),
        outcome,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/candidates.rs"]
mod tests;
