//! Rule evaluator — pure logic, no side effects.
//!
//! Checks for one field run in a fixed order and the first failure wins, so
//! a field reports at most one message.

use std::collections::BTreeMap;

use super::predicates::{is_email_shape, is_url_shape};
use super::rules::{Rule, RuleSet, ValidationResult};
use super::value::{FieldValue, Record};

/// Validate every field named in `rules` against `record`.
///
/// Keys present only in the record are ignored. A field named by the rule
/// set but missing from the record is evaluated as [`FieldValue::Empty`].
pub fn validate(record: &Record, rules: &RuleSet) -> ValidationResult {
    let errors: BTreeMap<String, String> = rules
        .iter()
        .filter_map(|(field, rule)| {
            let value = record.get(field).unwrap_or(&FieldValue::Empty);
            validate_field(value, rule, field).map(|message| (field.to_string(), message))
        })
        .collect();

    ValidationResult::from_errors(errors)
}

/// Validate a single value, returning the first failing check's message.
pub fn validate_field(value: &FieldValue, rule: &Rule, field_name: &str) -> Option<String> {
    if value.is_blank() {
        return rule
            .required
            .then(|| format!("{field_name} is required"));
    }

    let builtin = match value {
        FieldValue::Text(s) => check_text(s, rule, field_name),
        FieldValue::Number(n) => check_number(*n, rule, field_name),
        FieldValue::Bool(_) | FieldValue::Empty => None,
    };
    if builtin.is_some() {
        return builtin;
    }

    rule.custom
        .and_then(|check| check(value))
        .filter(|message| !message.is_empty())
}

fn check_text(s: &str, rule: &Rule, field_name: &str) -> Option<String> {
    let len = s.chars().count();

    if let Some(min) = rule.min_length {
        if len < min {
            return Some(format!("{field_name} must be at least {min} characters"));
        }
    }

    if let Some(max) = rule.max_length {
        if len > max {
            return Some(format!(
                "{field_name} must be no more than {max} characters"
            ));
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_full_match(s) {
            return Some(format!("{field_name} format is invalid"));
        }
    }

    if rule.email && !is_email_shape(s) {
        return Some(format!("{field_name} must be a valid email address"));
    }

    if rule.url && !is_url_shape(s) {
        return Some(format!("{field_name} must be a valid URL"));
    }

    None
}

fn check_number(n: f64, rule: &Rule, field_name: &str) -> Option<String> {
    if let Some(min) = rule.min {
        if n < min {
            return Some(format!("{field_name} must be at least {min}"));
        }
    }

    if let Some(max) = rule.max {
        if n > max {
            return Some(format!("{field_name} must be no more than {max}"));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::catalog::checks::{strong_password, WEAK_PASSWORD};
    use crate::validation::rules::Pattern;

    fn always_fails(_: &FieldValue) -> Option<String> {
        Some("custom failed".to_string())
    }

    fn empty_message(_: &FieldValue) -> Option<String> {
        Some(String::new())
    }

    fn record(pairs: &[(&str, FieldValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn blanks() -> [FieldValue; 2] {
        [FieldValue::Empty, FieldValue::from("")]
    }

    // -- required / optional --------------------------------------------------

    #[test]
    fn required_blank_reports_only_required() {
        let rule = Rule::new()
            .required()
            .min_length(3)
            .email()
            .pattern(Pattern::new("x+").unwrap())
            .min(10.0)
            .custom(always_fails);
        for value in blanks() {
            assert_eq!(
                validate_field(&value, &rule, "Email").as_deref(),
                Some("Email is required")
            );
        }
    }

    #[test]
    fn optional_blank_skips_every_check() {
        let rule = Rule::new()
            .min_length(3)
            .email()
            .url()
            .pattern(Pattern::new("x+").unwrap())
            .min(10.0)
            .custom(always_fails);
        for value in blanks() {
            assert_eq!(validate_field(&value, &rule, "field"), None);
        }
    }

    #[test]
    fn whitespace_is_not_blank() {
        let rule = Rule::new().required().min_length(2);
        assert_eq!(
            validate_field(&FieldValue::from(" "), &rule, "name").as_deref(),
            Some("name must be at least 2 characters")
        );
    }

    #[test]
    fn required_accepts_zero_and_false() {
        let rule = Rule::new().required();
        assert_eq!(validate_field(&FieldValue::from(0), &rule, "qty"), None);
        assert_eq!(validate_field(&FieldValue::from(false), &rule, "flag"), None);
    }

    // -- string checks --------------------------------------------------------

    #[test]
    fn min_length_boundary() {
        let rule = Rule::new().min_length(3);
        assert_eq!(validate_field(&"abc".into(), &rule, "code"), None);
        assert_eq!(
            validate_field(&"ab".into(), &rule, "code").as_deref(),
            Some("code must be at least 3 characters")
        );
    }

    #[test]
    fn max_length_boundary() {
        let rule = Rule::new().max_length(3);
        assert_eq!(validate_field(&"abc".into(), &rule, "code"), None);
        assert_eq!(
            validate_field(&"abcd".into(), &rule, "code").as_deref(),
            Some("code must be no more than 3 characters")
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let rule = Rule::new().max_length(4);
        assert_eq!(validate_field(&"café".into(), &rule, "name"), None);
    }

    #[test]
    fn pattern_must_match_whole_string() {
        let rule = Rule::new().pattern(Pattern::new("[0-9]{4}").unwrap());
        assert_eq!(validate_field(&"2024".into(), &rule, "year"), None);
        assert_eq!(
            validate_field(&"year 2024".into(), &rule, "year").as_deref(),
            Some("year format is invalid")
        );
    }

    #[test]
    fn email_shape_message() {
        let rule = Rule::new().required().email();
        assert_eq!(
            validate_field(&"not-an-email".into(), &rule, "Email").as_deref(),
            Some("Email must be a valid email address")
        );
        assert_eq!(validate_field(&"a@b.co".into(), &rule, "Email"), None);
    }

    #[test]
    fn url_shape_message() {
        let rule = Rule::new().url();
        assert_eq!(
            validate_field(&"makrx.org".into(), &rule, "Website").as_deref(),
            Some("Website must be a valid URL")
        );
        assert_eq!(
            validate_field(&"https://makrx.org".into(), &rule, "Website"),
            None
        );
    }

    #[test]
    fn url_without_host_is_invalid() {
        let rule = Rule::new().url();
        for value in ["mailto:a@b.co", "javascript:alert(1)"] {
            assert_eq!(
                validate_field(&value.into(), &rule, "u").as_deref(),
                Some("u must be a valid URL")
            );
        }
    }

    #[test]
    fn string_checks_short_circuit_in_order() {
        let rule = Rule::new()
            .min_length(5)
            .pattern(Pattern::new("[a-z]+").unwrap())
            .email();
        assert_eq!(
            validate_field(&"AB".into(), &rule, "f").as_deref(),
            Some("f must be at least 5 characters")
        );
        assert_eq!(
            validate_field(&"ABCDE".into(), &rule, "f").as_deref(),
            Some("f format is invalid")
        );
        assert_eq!(
            validate_field(&"abcde".into(), &rule, "f").as_deref(),
            Some("f must be a valid email address")
        );
    }

    #[test]
    fn numeric_checks_do_not_apply_to_strings() {
        let rule = Rule::new().min(10.0).max(20.0);
        assert_eq!(validate_field(&"5".into(), &rule, "qty"), None);
    }

    // -- numeric checks -------------------------------------------------------

    #[test]
    fn price_range() {
        let rule = Rule::new().min(0.0).max(999_999.99);
        assert_eq!(
            validate_field(&FieldValue::from(-5), &rule, "Price").as_deref(),
            Some("Price must be at least 0")
        );
        assert_eq!(
            validate_field(&FieldValue::from(1_000_000), &rule, "Price").as_deref(),
            Some("Price must be no more than 999999.99")
        );
        assert_eq!(validate_field(&FieldValue::from(0), &rule, "Price"), None);
        assert_eq!(
            validate_field(&FieldValue::from(999_999.99), &rule, "Price"),
            None
        );
    }

    #[test]
    fn fractional_bounds_render_as_written() {
        let rule = Rule::new().min(0.5);
        assert_eq!(
            validate_field(&FieldValue::from(0.25), &rule, "rate").as_deref(),
            Some("rate must be at least 0.5")
        );
    }

    #[test]
    fn string_checks_do_not_apply_to_numbers() {
        let rule = Rule::new().min_length(5).email();
        assert_eq!(validate_field(&FieldValue::from(1), &rule, "f"), None);
    }

    // -- custom ---------------------------------------------------------------

    #[test]
    fn password_scenario() {
        let rule = Rule::new().required().min_length(8).custom(strong_password);
        assert_eq!(
            validate_field(&"abc".into(), &rule, "Password").as_deref(),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            validate_field(&"abcdefgh".into(), &rule, "Password").as_deref(),
            Some(WEAK_PASSWORD)
        );
        assert_eq!(validate_field(&"Abcd123!".into(), &rule, "Password"), None);
    }

    #[test]
    fn custom_runs_only_after_builtins_pass() {
        let rule = Rule::new().max_length(2).custom(always_fails);
        assert_eq!(
            validate_field(&"abc".into(), &rule, "f").as_deref(),
            Some("f must be no more than 2 characters")
        );
        assert_eq!(
            validate_field(&"ab".into(), &rule, "f").as_deref(),
            Some("custom failed")
        );
    }

    #[test]
    fn custom_sees_booleans() {
        let rule = Rule::new().custom(always_fails);
        assert_eq!(
            validate_field(&FieldValue::from(true), &rule, "f").as_deref(),
            Some("custom failed")
        );
    }

    #[test]
    fn empty_custom_message_is_not_an_error() {
        let rule = Rule::new().custom(empty_message);
        assert_eq!(validate_field(&"x".into(), &rule, "f"), None);
    }

    // -- record validation ----------------------------------------------------

    #[test]
    fn both_failing_fields_are_reported() {
        let rules = RuleSet::new()
            .with("name", Rule::new().required().min_length(2))
            .with("price", Rule::new().required().min(0.0));
        let data = record(&[("name", "A".into()), ("price", FieldValue::from(-1))]);

        let result = validate(&data, &rules);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(
            result.error_for("name"),
            Some("name must be at least 2 characters")
        );
        assert_eq!(result.error_for("price"), Some("price must be at least 0"));
    }

    #[test]
    fn missing_optional_field_passes() {
        let rules = RuleSet::new().with("notes", Rule::new().max_length(10));
        let result = validate(&Record::new(), &rules);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn missing_required_field_fails() {
        let rules = RuleSet::new().with("name", Rule::new().required());
        let result = validate(&Record::new(), &rules);
        assert_eq!(result.error_for("name"), Some("name is required"));
    }

    #[test]
    fn fields_without_rules_are_ignored() {
        let rules = RuleSet::new().with("name", Rule::new().required());
        let data = record(&[("name", "Drill".into()), ("extra", "".into())]);
        let result = validate(&data, &rules);
        assert!(result.is_valid);
    }

    #[test]
    fn validation_is_idempotent() {
        let rules = RuleSet::new()
            .with("name", Rule::new().required().min_length(2))
            .with("email", Rule::new().email())
            .with("price", Rule::new().min(0.0));
        let data = record(&[
            ("name", "A".into()),
            ("email", "bad".into()),
            ("price", FieldValue::from(3)),
        ]);
        assert_eq!(validate(&data, &rules), validate(&data, &rules));
    }

    #[test]
    fn result_serializes_to_flat_error_map() {
        let rules = RuleSet::new().with("name", Rule::new().required());
        let json = serde_json::to_value(validate(&Record::new(), &rules)).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["errors"]["name"], "name is required");
    }
}
