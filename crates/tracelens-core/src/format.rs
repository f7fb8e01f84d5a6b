//! Display formatting helpers shared by the composer and the widgets.

use chrono::{Local, TimeZone};
use serde_json::Value;

/// Placeholder shown when a value is absent.
pub const MISSING: &str = "-";

/// Format an epoch-milliseconds timestamp as local `YYYY-MM-DD HH:MM:SS`.
pub fn time_str(timestamp_ms: Option<f64>) -> String {
    let Some(ms) = timestamp_ms.filter(|ms| ms.is_finite() && *ms != 0.0) else {
        return MISSING.to_string();
    };
    match Local.timestamp_millis_opt(ms as i64).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => MISSING.to_string(),
    }
}

/// Format a duration in milliseconds as seconds with two decimals.
pub fn time_cost_str(cost_ms: Option<f64>) -> String {
    match cost_ms.filter(|ms| ms.is_finite()) {
        Some(ms) => format!("{:.2}s", ms / 1000.0),
        None => MISSING.to_string(),
    }
}

/// `Type / SubType` when a sub-type is present, else `Type`.
pub fn type_str(task_type: &str, sub_type: Option<&str>) -> String {
    match sub_type.filter(|s| !s.is_empty()) {
        Some(sub) => format!("{} / {}", task_type, sub),
        None => task_type.to_string(),
    }
}

/// Two-space indented JSON.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Single-line JSON.
pub fn compact_json(value: &Value) -> String {
    value.to_string()
}

/// Strings as-is, anything else as single-line JSON.
pub fn plain_or_compact(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => compact_json(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    #[test]
    fn test_time_str_missing() {
        assert_eq!(time_str(None), "-");
        assert_eq!(time_str(Some(0.0)), "-");
        assert_eq!(time_str(Some(f64::NAN)), "-");
    }

    #[test]
    fn test_time_str_format_shape() {
        let formatted = time_str(Some(1_700_000_000_000.0));
        let re = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap();
        assert!(re.is_match(&formatted), "unexpected format: {formatted}");
    }

    #[test]
    fn test_time_cost_str() {
        assert_eq!(time_cost_str(Some(1500.0)), "1.50s");
        assert_eq!(time_cost_str(Some(0.0)), "0.00s");
        assert_eq!(time_cost_str(Some(12.0)), "0.01s");
        assert_eq!(time_cost_str(None), "-");
    }

    #[test]
    fn test_type_str() {
        assert_eq!(type_str("Insight", Some("Assert")), "Insight / Assert");
        assert_eq!(type_str("Insight", Some("")), "Insight");
        assert_eq!(type_str("Action", None), "Action");
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        assert_eq!(pretty_json(&json!({"pass": true})), "{\n  \"pass\": true\n}");
    }

    #[test]
    fn test_compact_json() {
        assert_eq!(compact_json(&json!({"id": 1})), r#"{"id":1}"#);
    }

    #[test]
    fn test_plain_or_compact() {
        assert_eq!(plain_or_compact(&json!("#btn")), "#btn");
        assert_eq!(plain_or_compact(&json!(3)), "3");
        assert_eq!(plain_or_compact(&Value::Null), "");
    }
}
