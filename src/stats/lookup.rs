//! Tolerant field extraction for backend payloads.
//!
//! Every normalized field has an ordered alias list (current spelling first,
//! then historical camelCase/snake_case variants). A field resolves to the
//! first alias that is present and not `null`; its value is then coerced with
//! a finite guard. Missing or malformed values become `None` and render as
//! [`PLACEHOLDER`].
//!
//! Bare plurals (`steps`, `candidates`) double as list keys in some payloads,
//! so count aliases list them last.

use serde_json::Value;

use crate::scope::identity::{EntityId, get_id};

pub const PLACEHOLDER: &str = "—";

/// Keys under which list endpoints nest their rows.
pub const LIST_CONTAINERS: &[&str] = &["candidates", "content", "items"];

pub mod fields {
    pub const APPROVAL_RATE: &[&str] = &["approvalRate", "approval_rate", "approvedRate", "approved_rate"];
    pub const REJECTION_RATE: &[&str] = &["rejectionRate", "rejection_rate", "rejectedRate", "rejected_rate"];
    pub const HIRE_RATE: &[&str] = &["hireRate", "hire_rate", "hiredRate", "hired_rate"];
    pub const AVG_SCORE: &[&str] = &["avgScore", "averageScore", "avg_score", "average_score", "avg", "meanScore"];
    pub const MIN_SCORE: &[&str] = &["minScore", "min_score", "min"];
    pub const MAX_SCORE: &[&str] = &["maxScore", "max_score", "max"];
    pub const RESPONSES: &[&str] = &["responseCount", "response_count", "answerCount", "answer_count", "responses", "answers"];

    pub const DEPARTMENT_COUNT: &[&str] = &["departmentCount", "department_count", "totalDepartments", "departments"];
    pub const OCCUPATION_COUNT: &[&str] = &["occupationCount", "occupation_count", "totalOccupations", "occupations"];
    pub const JOB_AD_COUNT: &[&str] = &["jobAdCount", "job_ad_count", "totalJobAds", "total_job_ads", "jobAds"];
    pub const CANDIDATE_COUNT: &[&str] = &["candidateCount", "candidate_count", "totalCandidates", "total_candidates", "total", "candidates"];
    pub const INTERVIEW_COUNT: &[&str] = &["interviewCount", "interview_count", "totalInterviews", "interviews"];
    pub const STEP_COUNT: &[&str] = &["stepCount", "step_count", "totalSteps", "steps"];
    pub const QUESTION_COUNT: &[&str] = &["questionCount", "question_count", "totalQuestions", "questions"];
    pub const APPROVED: &[&str] = &["approved", "approvedCount", "approved_count"];
    pub const REJECTED: &[&str] = &["rejected", "rejectedCount", "rejected_count"];
    pub const HIRED: &[&str] = &["hired", "hiredCount", "hired_count"];
    pub const PENDING: &[&str] = &["pending", "pendingCount", "pending_count", "inProgress", "in_progress"];
    pub const COMPLETED_STEPS: &[&str] = &["completedSteps", "completed_steps", "stepsCompleted", "steps_completed"];
    pub const POSITION: &[&str] = &["position", "orderIndex", "order_index", "order"];

    pub const DISTRIBUTION: &[&str] = &["scoreDistribution", "score_distribution", "distribution", "histogram", "buckets"];
    pub const BUCKET_COUNT: &[&str] = &["count", "cnt", "value"];
    pub const BUCKET_FROM: &[&str] = &["from", "min", "start"];
    pub const BUCKET_TO: &[&str] = &["to", "max", "end"];

    pub const NAME: &[&str] = &["name", "title", "label", "fullName", "full_name"];
    pub const STATUS: &[&str] = &["status", "state", "decision"];
}

/// First alias that is present and not `null`.
pub fn first_defined<'a>(obj: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let map = obj.as_object()?;
    aliases
        .iter()
        .filter_map(|alias| map.get(*alias))
        .find(|v| !v.is_null())
}

pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

pub fn number(obj: &Value, aliases: &[&str]) -> Option<f64> {
    first_defined(obj, aliases).and_then(coerce_number)
}

/// Counts are whole, non-negative numbers; anything else is absent.
pub fn count(obj: &Value, aliases: &[&str]) -> Option<u64> {
    number(obj, aliases)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64)
}

pub fn text(obj: &Value, aliases: &[&str]) -> Option<String> {
    match first_defined(obj, aliases)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn id(obj: &Value, aliases: &[&str]) -> Option<EntityId> {
    get_id(obj, aliases)
}

/// Rows of a list payload: a bare array, or an array nested under one of
/// `containers`.
pub fn rows<'a>(payload: &'a Value, containers: &[&str]) -> &'a [Value] {
    if let Some(items) = payload.as_array() {
        return items;
    }
    first_defined(payload, containers)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn clamp_percent(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 }
}

pub fn format_number(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_percent(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:.1}%"),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_count(v: Option<u64>) -> String {
    v.map(|c| c.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/lookup.rs"]
mod tests;
