//! Validation rule and result types.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;

use super::evaluator;
use super::value::{FieldValue, Record};

/// Domain-specific check run after every built-in check has passed.
///
/// Returns the error message to show, or `None` when the value is
/// acceptable. A plain function pointer, so it cannot capture state.
pub type CustomCheck = fn(&FieldValue) -> Option<String>;

/// A regular expression that must match the whole input string.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source`, anchored at both ends.
    pub fn new(source: &str) -> Result<Self, CoreError> {
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
            CoreError::InvalidPattern {
                pattern: source.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The expression as written, without the added anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Constraints for one form field.
///
/// Compose rules with struct update syntax; explicitly named fields replace
/// the base rule's values and everything else is inherited:
///
/// ```
/// use makrx_core::validation::catalog::common;
/// use makrx_core::validation::Rule;
///
/// let name = Rule { required: true, ..common::name() };
/// assert!(name.required);
/// assert_eq!(name.min_length, Some(2));
/// ```
#[derive(Clone, Default)]
pub struct Rule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
    pub email: bool,
    pub url: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub custom: Option<CustomCheck>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern)
            .field("email", &self.email)
            .field("url", &self.url)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn custom(mut self, check: CustomCheck) -> Self {
        self.custom = Some(check);
        self
    }

    pub fn describe(&self) -> RuleDescriptor {
        RuleDescriptor {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern: self.pattern.as_ref().map(|p| p.as_str().to_string()),
            email: self.email,
            url: self.url,
            min: self.min,
            max: self.max,
            has_custom: self.custom.is_some(),
        }
    }
}

/// Serializable view of a [`Rule`] for clients that render hints or mirror
/// the checks. Custom checks are reported by presence only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub email: bool,
    pub url: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub has_custom: bool,
}

/// One form's validation contract: field name to exactly one rule.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining form of [`RuleSet::insert`], for static catalog definitions.
    pub fn with(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.insert(field, rule);
        self
    }

    /// Register `rule` for `field`, returning the rule it replaced.
    pub fn insert(&mut self, field: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(field.into(), rule)
    }

    /// Copy every rule of `other` into this set; `other` wins on conflicts.
    pub fn extend_from(&mut self, other: &RuleSet) {
        for (field, rule) in other.iter() {
            self.rules.insert(field.to_string(), rule.clone());
        }
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in field name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(field, rule)| (field.as_str(), rule))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn validate(&self, record: &Record) -> ValidationResult {
        evaluator::validate(record, self)
    }

    pub fn describe(&self) -> BTreeMap<String, RuleDescriptor> {
        self.rules
            .iter()
            .map(|(field, rule)| (field.clone(), rule.describe()))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, Rule)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (S, Rule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(f, r)| (f.into(), r)).collect(),
        }
    }
}

impl IntoIterator for RuleSet {
    type Item = (String, Rule);
    type IntoIter = btree_map::IntoIter<String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

/// Outcome of validating one record against a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}
