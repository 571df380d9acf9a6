//! MakrX form validation core.
//!
//! Declarative per-field rules, a pure evaluator, and the catalog of rule
//! sets used by the platform's equipment, inventory, project and account
//! forms. No I/O and no logging happens in this crate.

pub mod error;
pub mod validation;
