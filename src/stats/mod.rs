pub mod candidates;
pub mod endpoints;
pub mod entities;
pub mod loader;
pub mod lookup;
pub mod overview;
pub mod transport;

use serde::Serialize;
use serde_json::Value;

use crate::scope::identity::EntityId;
use lookup::{clamp_percent, count, fields, first_defined, id, number, rows, text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KpiKind {
    Count,
    Score,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub label: &'static str,
    pub value: Option<f64>,
    pub kind: KpiKind,
}

impl Kpi {
    pub fn count(label: &'static str, value: Option<u64>) -> Self {
        Self {
            label,
            value: value.map(|v| v as f64),
            kind: KpiKind::Count,
        }
    }

    pub fn score(label: &'static str, value: Option<f64>) -> Self {
        Self {
            label,
            value,
            kind: KpiKind::Score,
        }
    }

    pub fn percent(label: &'static str, value: Option<f64>) -> Self {
        Self {
            label,
            value,
            kind: KpiKind::Percent,
        }
    }
}

/// Candidate outcome rates in percent, as reported (not yet clamped).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRates {
    pub approval_rate: Option<f64>,
    pub rejection_rate: Option<f64>,
    pub hire_rate: Option<f64>,
}

impl OutcomeRates {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            approval_rate: number(payload, fields::APPROVAL_RATE),
            rejection_rate: number(payload, fields::REJECTION_RATE),
            hire_rate: number(payload, fields::HIRE_RATE),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.approval_rate.is_none() && self.rejection_rate.is_none() && self.hire_rate.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    pub label: String,
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub count: f64,
}

/// Score histogram of a payload. Buckets come as `{count|cnt|value}` with a
/// `range` string or `from`/`to` bounds; the last bucket's open upper bound is
/// closed at 100.
pub fn parse_distribution(payload: &Value) -> Vec<HistogramBucket> {
    let raw = match first_defined(payload, fields::DISTRIBUTION) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => return Vec::new(),
    };

    let mut buckets = raw
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_bucket(idx, item))
        .collect::<Vec<_>>();

    if let Some(last) = buckets.last_mut() {
        if last.to.is_none() && last.from.is_some() {
            last.to = Some(100.0);
            let synthesized = last.label.starts_with('#') || last.label.ends_with("-?");
            if synthesized || last.label.ends_with('+') {
                last.label = range_label(last.from, last.to);
            }
        }
    }
    buckets
}

fn parse_bucket(idx: usize, item: &Value) -> HistogramBucket {
    if let Some(n) = lookup::coerce_number(item) {
        return HistogramBucket {
            label: format!("#{}", idx + 1),
            from: None,
            to: None,
            count: n.max(0.0),
        };
    }

    let count = number(item, fields::BUCKET_COUNT).unwrap_or(0.0).max(0.0);
    let range = text(item, &["range", "bucket", "label"]);
    let (mut from, mut to) = range.as_deref().map(parse_range).unwrap_or((None, None));
    if from.is_none() {
        from = number(item, fields::BUCKET_FROM);
    }
    if to.is_none() {
        to = number(item, fields::BUCKET_TO);
    }

    let label = match range {
        Some(label) => label,
        None if from.is_some() || to.is_some() => range_label(from, to),
        None => format!("#{}", idx + 1),
    };
    HistogramBucket {
        label,
        from,
        to,
        count,
    }
}

/// `"0-10"`, `"0–10"`, `"90+"` or a single number.
pub fn parse_range(raw: &str) -> (Option<f64>, Option<f64>) {
    let trimmed = raw.trim();
    if let Some(open) = trimmed.strip_suffix('+') {
        return (open.trim().parse().ok(), None);
    }
    let mut parts = trimmed.splitn(2, ['-', '–']);
    let from = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
    let to = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
    (from, to)
}

fn range_label(from: Option<f64>, to: Option<f64>) -> String {
    let fmt = |v: Option<f64>| match v {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.1}"),
        None => "?".to_string(),
    };
    format!("{}-{}", fmt(from), fmt(to))
}

/// What a ranked list holds; selects the aliases used to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RankedKind {
    Department,
    Occupation,
    JobAd,
    Candidate,
    Step,
    Question,
    Skill,
}

impl RankedKind {
    pub fn list_aliases(self) -> &'static [&'static str] {
        match self {
            RankedKind::Department => &["departments", "departmentStats", "department_stats", "byDepartment", "by_department"],
            RankedKind::Occupation => &["occupations", "occupationStats", "occupation_stats", "byOccupation", "by_occupation"],
            RankedKind::JobAd => &["jobAds", "job_ads", "jobAdStats", "job_ad_stats", "byJobAd", "by_job_ad"],
            RankedKind::Candidate => &["candidates", "candidateStats", "candidate_stats"],
            RankedKind::Step => &["steps", "stepStats", "step_stats", "byStep", "by_step"],
            RankedKind::Question => &["questions", "questionStats", "question_stats", "byQuestion", "by_question"],
            RankedKind::Skill => &["skills", "skillStats", "skill_stats", "bySkill", "by_skill"],
        }
    }

    fn id_fields(self) -> &'static [&'static str] {
        match self {
            RankedKind::Department => &["id", "departmentId", "department_id"],
            RankedKind::Occupation => &["id", "occupationId", "occupation_id"],
            RankedKind::JobAd => &["id", "jobAdId", "job_ad_id"],
            RankedKind::Candidate => &["id", "candidateId", "candidate_id"],
            RankedKind::Step => &["id", "stepId", "step_id"],
            RankedKind::Question => &["id", "questionId", "question_id"],
            RankedKind::Skill => &["id", "skillId", "skill_id"],
        }
    }

    fn name_fields(self) -> &'static [&'static str] {
        match self {
            RankedKind::Department => &["name", "departmentName", "department_name", "title"],
            RankedKind::Occupation => &["name", "occupationName", "occupation_name", "title"],
            RankedKind::JobAd => &["title", "jobTitle", "job_title", "name"],
            RankedKind::Candidate => &["name", "fullName", "full_name", "candidateName", "email"],
            RankedKind::Step => &["title", "name", "stepTitle", "step_title"],
            RankedKind::Question => &["title", "text", "question", "questionText", "question_text", "name"],
            RankedKind::Skill => &["title", "name", "skillName", "skill_name"],
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            RankedKind::Department => "department",
            RankedKind::Occupation => "occupation",
            RankedKind::JobAd => "job ad",
            RankedKind::Candidate => "candidate",
            RankedKind::Step => "step",
            RankedKind::Question => "question",
            RankedKind::Skill => "skill",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub id: Option<EntityId>,
    pub name: String,
    pub avg_score: Option<f64>,
    pub responses: Option<u64>,
    pub position: Option<f64>,
}

impl RankedItem {
    pub fn from_row(kind: RankedKind, row: &Value) -> Self {
        let id = id(row, kind.id_fields());
        let name = text(row, kind.name_fields())
            .or_else(|| text(row, fields::NAME))
            .unwrap_or_else(|| match id {
                Some(id) => format!("{} #{id}", kind.noun()),
                None => kind.noun().to_string(),
            });
        Self {
            id,
            name,
            avg_score: number(row, fields::AVG_SCORE),
            responses: count(row, fields::RESPONSES)
                .or_else(|| count(row, fields::CANDIDATE_COUNT)),
            position: number(row, fields::POSITION),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyRanking {
    pub kind: RankedKind,
    pub items: Vec<RankedItem>,
}

pub fn parse_items(kind: RankedKind, list: &[Value]) -> Vec<RankedItem> {
    list.iter()
        .filter(|row| row.is_object())
        .map(|row| RankedItem::from_row(kind, row))
        .collect()
}

/// Ranked list nested in an aggregate payload, hardest first.
pub fn parse_ranking(payload: &Value, kind: RankedKind) -> Option<DifficultyRanking> {
    let list = match first_defined(payload, kind.list_aliases()) {
        Some(Value::Array(items)) => items,
        _ => return None,
    };
    Some(DifficultyRanking {
        kind,
        items: rank_by_difficulty(parse_items(kind, list)),
    })
}

/// Ascending by average score (lower is harder). The sort is stable, so ties
/// keep backend order; unscored entries go last.
pub fn rank_by_difficulty(mut items: Vec<RankedItem>) -> Vec<RankedItem> {
    items.sort_by(|a, b| match (a.avg_score, b.avg_score) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    items
}

/// Count field, falling back to the length of a list stored under `list_kind`.
pub fn count_or_len(payload: &Value, aliases: &[&str], list_kind: RankedKind) -> Option<u64> {
    count(payload, aliases).or_else(|| match first_defined(payload, list_kind.list_aliases()) {
        Some(Value::Array(items)) => Some(items.len() as u64),
        _ => None,
    })
}

/// Derives a percentage from counts when the payload carries no rate.
pub fn rate_from_counts(part: Option<u64>, total: Option<u64>) -> Option<f64> {
    match (part, total) {
        (Some(part), Some(total)) if total > 0 => Some(clamp_percent(part as f64 * 100.0 / total as f64)),
        _ => None,
    }
}

/// List rows for an entity endpoint: bare array or nested under the kind's own
/// key, `content` or `items`.
pub fn entity_rows(payload: &Value, kind: RankedKind) -> &[Value] {
    let primary = kind.list_aliases()[0];
    rows(payload, &[primary, "content", "items"])
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/mod.rs"]
mod tests;
