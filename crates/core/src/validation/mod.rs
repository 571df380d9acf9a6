//! Form validation engine.
//!
//! Provides the field value model, rule types, built-in shape predicates, a
//! pure-logic evaluator, the fluent [`FormValidator`] builder, and the
//! predefined rule-set catalog.

pub mod builder;
pub mod catalog;
pub mod evaluator;
pub mod predicates;
pub mod rules;
pub mod value;

pub use builder::FormValidator;
pub use catalog::RuleCatalog;
pub use evaluator::{validate, validate_field};
pub use rules::{CustomCheck, Pattern, Rule, RuleDescriptor, RuleSet, ValidationResult};
pub use value::{FieldValue, Record};
