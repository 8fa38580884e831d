use serde_json::json;

use super::*;

fn item(name: &str, avg: Option<f64>) -> RankedItem {
    RankedItem {
        id: None,
        name: name.to_string(),
        avg_score: avg,
        responses: None,
        position: None,
    }
}

#[test]
fn test_parse_distribution_ranges() {
    let payload = json!({
        "scoreDistribution": [
            { "range": "0-50", "count": 2 },
            { "range": "50–90", "cnt": "5" },
            { "range": "90+", "value": 1 }
        ]
    });
    let buckets = parse_distribution(&payload);
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[0].from, Some(0.0));
    assert_eq!(buckets[0].to, Some(50.0));
    assert_eq!(buckets[1].count, 5.0);
    assert_eq!(buckets[1].to, Some(90.0));
    assert_eq!(buckets[2].from, Some(90.0));
    assert_eq!(buckets[2].to, Some(100.0));
    assert_eq!(buckets[2].label, "90-100");
}

#[test]
fn test_parse_distribution_bounds_and_scalars() {
    let payload = json!({ "distribution": [{ "from": 0, "to": 10, "count": 3 }, { "min": 10, "count": -4 }] });
    let buckets = parse_distribution(&payload);
    assert_eq!(buckets[0].label, "0-10");
    assert_eq!(buckets[1].count, 0.0);
    assert_eq!(buckets[1].to, Some(100.0));
    assert_eq!(buckets[1].label, "10-100");

    let payload = json!({ "histogram": [1, "2", null] });
    let buckets = parse_distribution(&payload);
    assert_eq!(
        buckets.iter().map(|b| b.count).collect::<Vec<_>>(),
        vec![1.0, 2.0, 0.0]
    );
    assert_eq!(buckets[0].label, "#1");
}

#[test]
fn test_parse_distribution_missing() {
    assert!(parse_distribution(&json!({})).is_empty());
    assert!(parse_distribution(&json!({ "scoreDistribution": "n/a" })).is_empty());
}

#[test]
fn test_parse_range() {
    assert_eq!(parse_range("0-10"), (Some(0.0), Some(10.0)));
    assert_eq!(parse_range(" 10 – 20 "), (Some(10.0), Some(20.0)));
    assert_eq!(parse_range("90+"), (Some(90.0), None));
    assert_eq!(parse_range("low"), (None, None));
}

#[test]
fn test_rank_by_difficulty_is_stable_and_ascending() {
    let ranked = rank_by_difficulty(vec![
        item("b", Some(70.0)),
        item("none-1", None),
        item("a", Some(40.0)),
        item("c", Some(70.0)),
        item("none-2", None),
    ]);
    let names = ranked.iter().map(|i| i.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["a", "b", "c", "none-1", "none-2"]);
}

#[test]
fn test_parse_ranking_reads_aliases() {
    let payload = json!({
        "by_step": [
            { "stepId": 1, "title": "Intro", "avgScore": 80, "responseCount": 12 },
            { "id": 2, "name": "Coding", "average_score": "55.5" },
            "garbage"
        ]
    });
    let ranking = parse_ranking(&payload, RankedKind::Step).unwrap();
    assert_eq!(ranking.items.len(), 2);
    assert_eq!(ranking.items[0].name, "Coding");
    assert_eq!(ranking.items[0].avg_score, Some(55.5));
    assert_eq!(ranking.items[1].id, Some(1));
    assert_eq!(ranking.items[1].responses, Some(12));
    assert!(parse_ranking(&payload, RankedKind::Skill).is_none());
}

#[test]
fn test_ranked_item_name_fallback() {
    let row = json!({ "questionId": 8 });
    let parsed = RankedItem::from_row(RankedKind::Question, &row);
    assert_eq!(parsed.name, "question #8");
    let row = json!({});
    assert_eq!(RankedItem::from_row(RankedKind::JobAd, &row).name, "job ad");
}

#[test]
fn test_count_or_len() {
    let payload = json!({ "departments": [{ "id": 1 }, { "id": 2 }] });
    assert_eq!(
        count_or_len(&payload, lookup::fields::DEPARTMENT_COUNT, RankedKind::Department),
        Some(2)
    );
    let payload = json!({ "departmentCount": 7, "departments": [] });
    assert_eq!(
        count_or_len(&payload, lookup::fields::DEPARTMENT_COUNT, RankedKind::Department),
        Some(7)
    );
    let payload = json!({ "departments": 3 });
    assert_eq!(
        count_or_len(&payload, lookup::fields::DEPARTMENT_COUNT, RankedKind::Department),
        Some(3)
    );
}

#[test]
fn test_rate_from_counts() {
    assert_eq!(rate_from_counts(Some(1), Some(4)), Some(25.0));
    assert_eq!(rate_from_counts(Some(1), Some(0)), None);
    assert_eq!(rate_from_counts(None, Some(4)), None);
    assert_eq!(rate_from_counts(Some(9), Some(4)), Some(100.0));
}

#[test]
fn test_outcome_rates_from_payload() {
    let rates = OutcomeRates::from_payload(&json!({ "approvalRate": "40", "hire_rate": 10 }));
    assert_eq!(rates.approval_rate, Some(40.0));
    assert_eq!(rates.rejection_rate, None);
    assert_eq!(rates.hire_rate, Some(10.0));
    assert!(OutcomeRates::from_payload(&json!({})).is_empty());
}

#[test]
fn test_entity_rows_containers() {
    let payload = json!({ "steps": [{ "id": 1 }], "items": [{ "id": 2 }, { "id": 3 }] });
    assert_eq!(entity_rows(&payload, RankedKind::Step).len(), 1);
    assert_eq!(entity_rows(&payload, RankedKind::Question).len(), 2);
}
