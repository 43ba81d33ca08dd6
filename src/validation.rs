use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

/// Check an email address against the usual mailbox@domain.tld shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Report every required field that is absent or null in `data`.
/// Returns one message per missing field (not just the first); an
/// empty list means valid.
pub fn validate_required_fields(data: &Map<String, Value>, required_fields: &[&str]) -> Vec<String> {
    let mut errors = Vec::new();

    for field in required_fields {
        match data.get(*field) {
            None | Some(Value::Null) => {
                errors.push(format!("Missing required field: {}", field));
            }
            Some(_) => {}
        }
    }

    errors
}

/// Check string length bounds, counted in characters. `max_length` of
/// None means unbounded above.
pub fn validate_string_length(value: &str, min_length: usize, max_length: Option<usize>) -> bool {
    let length = value.chars().count();

    if length < min_length {
        return false;
    }

    if let Some(max) = max_length {
        if length > max {
            return false;
        }
    }

    true
}

/// Check a numeric value against optional inclusive bounds. NaN is
/// never in range.
pub fn validate_numeric_range(value: f64, min_value: Option<f64>, max_value: Option<f64>) -> bool {
    if value.is_nan() {
        return false;
    }

    if let Some(min) = min_value {
        if value < min {
            return false;
        }
    }

    if let Some(max) = max_value {
        if value > max {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_email_accepts_common_forms() {
        assert!(validate_email("lou@example.com"));
        assert!(validate_email("first.last+tag@sub.example.co"));
        assert!(validate_email("USER_99%x@host-name.org"));
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(!validate_email(""));
        assert!(!validate_email("no-at-sign.example.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("user@host"));
        assert!(!validate_email("user@host.c"));
        assert!(!validate_email("user name@example.com"));
    }

    #[test]
    fn test_validate_required_fields_all_present() {
        let data = json!({"name": "agent", "enabled": true})
            .as_object()
            .unwrap()
            .clone();
        let errors = validate_required_fields(&data, &["name", "enabled"]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_required_fields_collects_all_errors() {
        let data = json!({"name": "agent", "extra": null})
            .as_object()
            .unwrap()
            .clone();
        let errors = validate_required_fields(&data, &["name", "extra", "missing"]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "Missing required field: extra");
        assert_eq!(errors[1], "Missing required field: missing");
    }

    #[test]
    fn test_validate_string_length() {
        assert!(validate_string_length("hello", 0, None));
        assert!(validate_string_length("hello", 5, Some(5)));
        assert!(!validate_string_length("hi", 3, None));
        assert!(!validate_string_length("too long", 0, Some(3)));
        assert!(validate_string_length("", 0, Some(0)));
    }

    #[test]
    fn test_validate_numeric_range() {
        assert!(validate_numeric_range(0.5, Some(0.0), Some(1.0)));
        assert!(validate_numeric_range(0.0, Some(0.0), Some(1.0)));
        assert!(validate_numeric_range(1.0, Some(0.0), Some(1.0)));
        assert!(!validate_numeric_range(1.5, Some(0.0), Some(1.0)));
        assert!(!validate_numeric_range(-0.1, Some(0.0), None));
        assert!(validate_numeric_range(1e9, None, None));
        assert!(!validate_numeric_range(f64::NAN, None, None));
    }
}
