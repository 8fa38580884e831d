use serde_json::json;

use super::*;

#[test]
fn test_to_int_numbers_and_strings() {
    assert_eq!(to_int(&json!(42)), Some(42));
    assert_eq!(to_int(&json!(42.0)), Some(42));
    assert_eq!(to_int(&json!(" 17 ")), Some(17));
    assert_eq!(to_int(&json!("8.0")), Some(8));
    assert_eq!(to_int(&json!(-3)), Some(-3));
}

#[test]
fn test_to_int_rejects_non_ids() {
    assert_eq!(to_int(&json!(null)), None);
    assert_eq!(to_int(&json!(true)), None);
    assert_eq!(to_int(&json!("")), None);
    assert_eq!(to_int(&json!("abc")), None);
    assert_eq!(to_int(&json!("NaN")), None);
    assert_eq!(to_int(&json!("inf")), None);
    assert_eq!(to_int(&json!(1.5)), None);
    assert_eq!(to_int(&json!({ "id": 1 })), None);
}

#[test]
fn test_get_id_probes_fields_in_order() {
    let data = json!({ "jobAdId": "55", "id": 12 });
    assert_eq!(get_id(&data, JOB_AD_ID_FIELDS), Some(12));

    let data = json!({ "id": null, "jobAdId": "55" });
    assert_eq!(get_id(&data, JOB_AD_ID_FIELDS), Some(55));

    let data = json!({ "id": "", "job_ad_id": 9 });
    assert_eq!(get_id(&data, JOB_AD_ID_FIELDS), Some(9));
}

#[test]
fn test_get_id_skips_unparseable_candidates() {
    let data = json!({ "id": "n/a", "departmentId": 4 });
    assert_eq!(get_id(&data, DEPARTMENT_ID_FIELDS), Some(4));
}

#[test]
fn test_get_id_scalar_inputs() {
    assert_eq!(get_id(&json!(7), DEPARTMENT_ID_FIELDS), Some(7));
    assert_eq!(get_id(&json!("7"), DEPARTMENT_ID_FIELDS), Some(7));
    assert_eq!(get_id(&json!(null), DEPARTMENT_ID_FIELDS), None);
    assert_eq!(get_id(&json!({ "name": "Sales" }), DEPARTMENT_ID_FIELDS), None);
}

#[test]
fn test_get_opt_id_none() {
    assert_eq!(get_opt_id(None, OCCUPATION_ID_FIELDS), None);
    let data = json!({ "occupationId": 3 });
    assert_eq!(get_opt_id(Some(&data), OCCUPATION_ID_FIELDS), Some(3));
}

#[test]
fn test_parse_id_str() {
    assert_eq!(parse_id_str("101"), Some(101));
    assert_eq!(parse_id_str("  "), None);
    assert_eq!(parse_id_str("1e2"), Some(100));
    assert_eq!(parse_id_str("2.5"), None);
}
