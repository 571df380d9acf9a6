//! Handlers for the `/rule-sets` resource.
//!
//! Lists the rule-set catalog, describes individual rule sets, and runs
//! dry-run validation of whole records or single fields.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use makrx_core::error::CoreError;
use makrx_core::validation::{
    validate, validate_field, FieldValue, Record, RuleDescriptor, ValidationResult,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/rule-sets
///
/// List the names of every rule set in the catalog.
pub async fn list_rule_sets(State(state): State<AppState>) -> Json<DataResponse<Vec<String>>> {
    let names = state.catalog.names().map(str::to_string).collect();
    Json(DataResponse { data: names })
}

/// Declarative view of one rule set.
#[derive(Debug, Serialize)]
pub struct RuleSetView {
    pub name: String,
    pub fields: BTreeMap<String, RuleDescriptor>,
}

/// GET /api/v1/rule-sets/{name}
///
/// Describe every field rule of a rule set. Returns 404 for unknown names.
pub async fn get_rule_set(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<RuleSetView>>> {
    let rules = state.catalog.require(&name)?;
    Ok(Json(DataResponse {
        data: RuleSetView {
            fields: rules.describe(),
            name,
        },
    }))
}

/// Request body for record validation.
#[derive(Debug, Deserialize)]
pub struct ValidateRecordRequest {
    pub record: Record,
}

/// POST /api/v1/rule-sets/{name}/validate
///
/// Validate a record against the named rule set. A failing record is still
/// a 200 response with `is_valid: false`. A malformed body is a 400.
pub async fn validate_record(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<ValidateRecordRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<ValidationResult>>> {
    let Json(body) = body?;
    let rules = state.catalog.require(&name)?;
    let result = validate(&body.record, rules);

    tracing::debug!(
        rule_set = %name,
        fields = rules.len(),
        errors = result.errors.len(),
        "Validated record"
    );

    Ok(Json(DataResponse { data: result }))
}

/// Request body for single-field validation.
#[derive(Debug, Deserialize)]
pub struct ValidateFieldRequest {
    #[serde(default)]
    pub value: FieldValue,
}

/// Result of validating one field.
#[derive(Debug, Serialize)]
pub struct FieldValidation {
    pub field: String,
    pub error: Option<String>,
}

/// POST /api/v1/rule-sets/{name}/fields/{field}/validate
///
/// Validate a single field value, as a form does while the user types.
/// Returns 404 when the rule set or the field rule does not exist.
pub async fn validate_single_field(
    State(state): State<AppState>,
    Path((name, field)): Path<(String, String)>,
    body: Result<Json<ValidateFieldRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<FieldValidation>>> {
    let Json(body) = body?;
    let rules = state.catalog.require(&name)?;
    let rule = rules.get(&field).ok_or_else(|| CoreError::NotFound {
        entity: "FieldRule",
        key: format!("{name}.{field}"),
    })?;

    let error = validate_field(&body.value, rule, &field);

    tracing::debug!(
        rule_set = %name,
        field = %field,
        valid = error.is_none(),
        "Validated field"
    );

    Ok(Json(DataResponse {
        data: FieldValidation { field, error },
    }))
}
