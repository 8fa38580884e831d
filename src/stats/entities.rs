use serde::Serialize;
use serde_json::Value;

use crate::scope::identity::EntityId;
use crate::stats::endpoints::Endpoint;
use crate::stats::lookup::{count, fields, id, number, text};
use crate::stats::{
    DifficultyRanking, HistogramBucket, RankedItem, RankedKind, entity_rows, parse_distribution,
    parse_items, parse_ranking, rank_by_difficulty,
};

/// Steps, questions or skills of one parent, in display order plus ranked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityList {
    pub kind: RankedKind,
    pub items: Vec<RankedItem>,
    pub hardest: Vec<RankedItem>,
}

impl EntityList {
    fn from_payload(kind: RankedKind, payload: &Value) -> Self {
        let mut items = parse_items(kind, entity_rows(payload, kind));
        if items.iter().any(|item| item.position.is_some()) {
            items.sort_by(|a, b| match (a.position, b.position) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
        let hardest = rank_by_difficulty(items.clone());
        Self {
            kind,
            items,
            hardest,
        }
    }

    pub fn name_of(&self, id: EntityId) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.id == Some(id))
            .map(|item| item.name.as_str())
    }
}

pub fn normalize_entity_list(endpoint: &Endpoint, payload: &Value) -> EntityList {
    let kind = match endpoint {
        Endpoint::StepQuestions { .. } => RankedKind::Question,
        Endpoint::QuestionSkills { .. } => RankedKind::Skill,
        _ => RankedKind::Step,
    };
    EntityList::from_payload(kind, payload)
}

/// Detail statistics for one step, question, skill or candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStats {
    pub kind: RankedKind,
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub avg_score: Option<f64>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub responses: Option<u64>,
    pub status: Option<String>,
    pub score_distribution: Vec<HistogramBucket>,
    pub breakdown: Option<DifficultyRanking>,
}

pub fn normalize_entity_stats(endpoint: &Endpoint, payload: &Value) -> EntityStats {
    let (kind, id, breakdown) = match *endpoint {
        Endpoint::Step { step_id, .. } => (RankedKind::Step, step_id, Some(RankedKind::Question)),
        Endpoint::Question { question_id, .. } => {
            (RankedKind::Question, question_id, Some(RankedKind::Skill))
        }
        Endpoint::Skill { skill_id } => (RankedKind::Skill, skill_id, Some(RankedKind::Question)),
        Endpoint::CandidateStats { candidate_id } => {
            (RankedKind::Candidate, candidate_id, Some(RankedKind::Step))
        }
        _ => return entity_stats(RankedKind::Step, None, payload, None),
    };
    entity_stats(kind, Some(id), payload, breakdown)
}

fn entity_stats(
    kind: RankedKind,
    requested: Option<EntityId>,
    payload: &Value,
    breakdown: Option<RankedKind>,
) -> EntityStats {
    EntityStats {
        kind,
        id: id(payload, kind.id_fields()).or(requested),
        name: text(payload, kind.name_fields()).or_else(|| text(payload, fields::NAME)),
        avg_score: number(payload, fields::AVG_SCORE),
        min_score: number(payload, fields::MIN_SCORE),
        max_score: number(payload, fields::MAX_SCORE),
        responses: count(payload, fields::RESPONSES),
        status: text(payload, fields::STATUS),
        score_distribution: parse_distribution(payload),
        breakdown: breakdown.and_then(|kind| parse_ranking(payload, kind)),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/entities.rs"]
mod tests;
