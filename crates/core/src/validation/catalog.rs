//! Predefined rule sets for the platform's forms.
//!
//! [`common`] holds the shared field rules. Domain rule sets reuse them and
//! override individual constraints with struct update syntax, so a custom
//! check is replaced wholesale rather than composed.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::CoreError;

use super::rules::{Pattern, Rule, RuleSet};

pub const EQUIPMENT: &str = "equipment";
pub const INVENTORY: &str = "inventory";
pub const PROJECT: &str = "project";
pub const ACCOUNT: &str = "account";

/// Lowercase status keys used by the equipment booking board.
static EQUIPMENT_STATUS: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new("available|in_use|maintenance|out_of_order").expect("valid pattern")
});

/// Uppercase letters, digits and dashes.
static SKU: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("[A-Z0-9][A-Z0-9-]{2,31}").expect("valid pattern"));

pub mod common {
    //! Shared rules for fields that appear on many forms.

    use super::checks;
    use crate::validation::rules::Rule;

    pub fn email() -> Rule {
        Rule::new().required().email()
    }

    pub fn password() -> Rule {
        Rule::new()
            .required()
            .min_length(8)
            .custom(checks::strong_password)
    }

    pub fn name() -> Rule {
        Rule::new().min_length(2).max_length(100)
    }

    pub fn phone() -> Rule {
        Rule::new().custom(checks::phone)
    }

    pub fn url() -> Rule {
        Rule::new().url()
    }

    pub fn description() -> Rule {
        Rule::new().max_length(1000)
    }

    pub fn price() -> Rule {
        Rule::new().min(0.0).max(999_999.99)
    }

    pub fn quantity() -> Rule {
        Rule::new()
            .min(0.0)
            .max(999_999.0)
            .custom(checks::whole_number)
    }
}

/// Custom checks shared by the catalog rules.
pub mod checks {
    use chrono::{NaiveDate, Utc};

    use crate::validation::predicates::{is_phone_shape, is_strong_password};
    use crate::validation::value::FieldValue;

    pub const WEAK_PASSWORD: &str = concat!(
        "Password must contain at least 8 characters with uppercase, ",
        "lowercase, number and special character"
    );
    pub const INVALID_PHONE: &str = "Please enter a valid phone number";
    pub const FRACTIONAL_QUANTITY: &str = "Quantity must be a whole number";
    pub const INVALID_DEADLINE: &str = "Deadline must be a valid date in the future";

    pub fn strong_password(value: &FieldValue) -> Option<String> {
        match value.as_text() {
            Some(s) if !is_strong_password(s) => Some(WEAK_PASSWORD.to_string()),
            _ => None,
        }
    }

    pub fn phone(value: &FieldValue) -> Option<String> {
        match value.as_text() {
            Some(s) if !is_phone_shape(s) => Some(INVALID_PHONE.to_string()),
            _ => None,
        }
    }

    pub fn whole_number(value: &FieldValue) -> Option<String> {
        match value.as_number() {
            Some(n) if n.fract() != 0.0 => Some(FRACTIONAL_QUANTITY.to_string()),
            _ => None,
        }
    }

    /// `YYYY-MM-DD`, today or later (UTC).
    pub fn future_date(value: &FieldValue) -> Option<String> {
        let date = value
            .as_text()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        match date {
            Some(d) if d >= Utc::now().date_naive() => None,
            _ => Some(INVALID_DEADLINE.to_string()),
        }
    }
}

pub fn equipment_rules() -> RuleSet {
    RuleSet::new()
        .with(
            "name",
            Rule {
                required: true,
                ..common::name()
            },
        )
        .with("category", Rule::new().required())
        .with("location", Rule::new().required().max_length(100))
        .with("status", Rule::new().pattern(EQUIPMENT_STATUS.clone()))
        .with("description", common::description())
        .with("hourly_rate", common::price())
        .with("manual_url", common::url())
}

pub fn inventory_rules() -> RuleSet {
    RuleSet::new()
        .with(
            "name",
            Rule {
                required: true,
                ..common::name()
            },
        )
        .with("category", Rule::new().required())
        .with("sku", Rule::new().pattern(SKU.clone()))
        .with(
            "quantity",
            Rule {
                required: true,
                ..common::quantity()
            },
        )
        .with("min_quantity", common::quantity())
        .with(
            "price",
            Rule {
                required: true,
                ..common::price()
            },
        )
        .with("supplier", common::name())
        .with("supplier_url", common::url())
}

pub fn project_rules() -> RuleSet {
    RuleSet::new()
        .with(
            "title",
            Rule {
                required: true,
                max_length: Some(200),
                ..common::name()
            },
        )
        .with(
            "description",
            Rule {
                required: true,
                min_length: Some(10),
                ..common::description()
            },
        )
        .with("budget", common::price())
        .with("deadline", Rule::new().custom(checks::future_date))
        .with("repository_url", common::url())
}

pub fn account_rules() -> RuleSet {
    RuleSet::new()
        .with("email", common::email())
        .with("password", common::password())
        .with(
            "name",
            Rule {
                required: true,
                ..common::name()
            },
        )
        .with("phone", common::phone())
}

/// Immutable collection of named rule sets.
///
/// Built once at startup and shared by reference; there is no global
/// mutable registry.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    sets: BTreeMap<String, RuleSet>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The platform's built-in forms: equipment, inventory, project, account.
    pub fn standard() -> Self {
        Self::new()
            .with_rule_set(EQUIPMENT, equipment_rules())
            .with_rule_set(INVENTORY, inventory_rules())
            .with_rule_set(PROJECT, project_rules())
            .with_rule_set(ACCOUNT, account_rules())
    }

    pub fn with_rule_set(mut self, name: impl Into<String>, rules: RuleSet) -> Self {
        self.sets.insert(name.into(), rules);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RuleSet> {
        self.sets.get(name)
    }

    /// Like [`RuleCatalog::get`], with a `NotFound` error for unknown names.
    pub fn require(&self, name: &str) -> Result<&RuleSet, CoreError> {
        self.get(name).ok_or_else(|| CoreError::NotFound {
            entity: "RuleSet",
            key: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
