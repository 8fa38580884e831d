use serde_json::json;

use super::fields::*;
use super::*;

#[test]
fn test_first_defined_skips_null_aliases() {
    let payload = json!({ "approvalRate": null, "approval_rate": 42.5 });
    assert_eq!(first_defined(&payload, APPROVAL_RATE), Some(&json!(42.5)));
    assert_eq!(first_defined(&json!([1, 2]), APPROVAL_RATE), None);
}

#[test]
fn test_number_coercion() {
    let payload = json!({
        "avgScore": "71.25",
        "minScore": "abc",
        "maxScore": true,
        "responseCount": 12
    });
    assert_eq!(number(&payload, AVG_SCORE), Some(71.25));
    assert_eq!(number(&payload, MIN_SCORE), None);
    assert_eq!(number(&payload, MAX_SCORE), None);
    assert_eq!(number(&payload, RESPONSES), Some(12.0));
    assert_eq!(coerce_number(&json!("Infinity")), None);
    assert_eq!(coerce_number(&json!("NaN")), None);
}

#[test]
fn test_first_alias_wins_even_if_malformed() {
    // The first non-null alias decides; later aliases are not consulted.
    let payload = json!({ "avgScore": "n/a", "averageScore": 50 });
    assert_eq!(number(&payload, AVG_SCORE), None);
}

#[test]
fn test_count_rejects_negative() {
    let payload = json!({ "stepCount": -2, "questionCount": 3.6 });
    assert_eq!(count(&payload, STEP_COUNT), None);
    assert_eq!(count(&payload, QUESTION_COUNT), Some(4));
}

#[test]
fn test_count_alias_prefers_explicit_field_over_list() {
    let payload = json!({ "steps": [{ "id": 1 }], "stepCount": 5 });
    assert_eq!(count(&payload, STEP_COUNT), Some(5));
    let payload = json!({ "steps": [{ "id": 1 }] });
    assert_eq!(count(&payload, STEP_COUNT), None);
}

#[test]
fn test_text_trims_and_accepts_numbers() {
    let payload = json!({ "name": "  Backend Engineer ", "status": 3 });
    assert_eq!(text(&payload, NAME).as_deref(), Some("Backend Engineer"));
    assert_eq!(text(&payload, STATUS).as_deref(), Some("3"));
    assert_eq!(text(&json!({ "name": "  " }), NAME), None);
}

#[test]
fn test_rows_shapes() {
    let bare = json!([{ "id": 1 }, { "id": 2 }]);
    assert_eq!(rows(&bare, LIST_CONTAINERS).len(), 2);

    let paged = json!({ "content": [{ "id": 1 }], "totalElements": 1 });
    assert_eq!(rows(&paged, LIST_CONTAINERS).len(), 1);

    let nested = json!({ "candidates": [{ "id": 1 }, { "id": 2 }, { "id": 3 }] });
    assert_eq!(rows(&nested, LIST_CONTAINERS).len(), 3);

    assert!(rows(&json!({ "items": "none" }), LIST_CONTAINERS).is_empty());
    assert!(rows(&json!(null), LIST_CONTAINERS).is_empty());
}

#[test]
fn test_id_reads_aliases() {
    assert_eq!(id(&json!({ "id": "12" }), &["id"]), Some(12));
    assert_eq!(id(&json!({ "id": null }), &["id"]), None);
}

#[test]
fn test_clamp_percent() {
    assert_eq!(clamp_percent(-5.0), 0.0);
    assert_eq!(clamp_percent(150.0), 100.0);
    assert_eq!(clamp_percent(f64::NAN), 0.0);
    assert_eq!(clamp_percent(33.3), 33.3);
}

#[test]
fn test_formatting_placeholders() {
    assert_eq!(format_number(Some(71.256), 1), "71.3");
    assert_eq!(format_number(None, 1), PLACEHOLDER);
    assert_eq!(format_number(Some(f64::INFINITY), 1), PLACEHOLDER);
    assert_eq!(format_percent(Some(12.0)), "12.0%");
    assert_eq!(format_percent(None), "—");
    assert_eq!(format_count(Some(7)), "7");
    assert_eq!(format_count(None), "—");
}
