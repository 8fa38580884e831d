use serde_json::Value;

/// Entity ids as the backend issues them.
pub type EntityId = i64;

pub const DEPARTMENT_ID_FIELDS: &[&str] = &["id", "departmentId", "department_id"];
pub const OCCUPATION_ID_FIELDS: &[&str] = &["id", "occupationId", "occupation_id"];
pub const JOB_AD_ID_FIELDS: &[&str] = &["id", "jobAdId", "job_ad_id", "jobAdID"];
pub const PARENT_DEPARTMENT_FIELDS: &[&str] = &["departmentId", "department_id", "deptId"];
pub const PARENT_OCCUPATION_FIELDS: &[&str] = &["occupationId", "occupation_id", "occId"];

/// Coerces a scalar JSON value into an id.
///
/// Numbers must be finite and integral, strings are trimmed and parsed the same
/// way. Anything else (including `NaN`-producing strings) is treated as absent,
/// so a malformed id can never look "changed" on every comparison.
pub fn to_int(value: &Value) -> Option<EntityId> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            n.as_f64().and_then(integral)
        }
        Value::String(s) => parse_id_str(s),
        _ => None,
    }
}

/// Reads an id from a heterogeneous input: `null`, a number, a numeric string,
/// or an object probed through `fields` in order.
pub fn get_id(value: &Value, fields: &[&str]) -> Option<EntityId> {
    match value {
        Value::Object(map) => fields
            .iter()
            .filter_map(|field| map.get(*field))
            .filter(|v| !is_blank(v))
            .find_map(to_int),
        other => to_int(other),
    }
}

/// Same as [`get_id`] for an optional host-owned selection object.
pub fn get_opt_id(value: Option<&Value>, fields: &[&str]) -> Option<EntityId> {
    value.and_then(|v| get_id(v, fields))
}

pub fn parse_id_str(raw: &str) -> Option<EntityId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(i);
    }
    trimmed.parse::<f64>().ok().and_then(integral)
}

fn integral(v: f64) -> Option<EntityId> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/scope/identity.rs"]
mod tests;
