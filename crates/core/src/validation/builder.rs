//! Fluent form validator.
//!
//! Forms start from a catalog rule set (or nothing) and add or override
//! fields at the call site:
//!
//! ```
//! use makrx_core::validation::catalog::{common, equipment_rules};
//! use makrx_core::validation::{FieldValue, FormValidator, Record, Rule};
//!
//! let validator = FormValidator::from_rules(equipment_rules())
//!     .add_rule("serial_number", Rule::new().required().min_length(4))
//!     .add_rule("contact_email", common::email());
//!
//! let mut record = Record::new();
//! record.insert("name".into(), FieldValue::from("Laser cutter"));
//!
//! let result = validator.validate(&record);
//! assert!(!result.is_valid);
//! assert_eq!(result.error_for("serial_number"), Some("serial_number is required"));
//! ```

use super::evaluator;
use super::rules::{Rule, RuleSet, ValidationResult};
use super::value::{FieldValue, Record};

#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    rules: RuleSet,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Register `rule` for `field`, replacing any existing rule for it.
    pub fn add_rule(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.rules.insert(field, rule);
        self
    }

    pub fn validate(&self, record: &Record) -> ValidationResult {
        evaluator::validate(record, &self.rules)
    }

    /// Check one field, e.g. while the user is typing.
    ///
    /// A field without a rule never produces an error.
    pub fn validate_field(&self, field: &str, value: &FieldValue) -> Option<String> {
        let rule = self.rules.get(field)?;
        evaluator::validate_field(value, rule, field)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn into_rules(self) -> RuleSet {
        self.rules
    }
}

impl From<RuleSet> for FormValidator {
    fn from(rules: RuleSet) -> Self {
        Self::from_rules(rules)
    }
}
