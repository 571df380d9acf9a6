//! Route definitions for the `/rule-sets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Routes mounted at `/rule-sets`.
///
/// ```text
/// GET    /                                -> list_rule_sets
/// GET    /{name}                          -> get_rule_set
/// POST   /{name}/validate                 -> validate_record
/// POST   /{name}/fields/{field}/validate  -> validate_single_field
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(validation::list_rule_sets))
        .route("/{name}", get(validation::get_rule_set))
        .route("/{name}/validate", post(validation::validate_record))
        .route(
            "/{name}/fields/{field}/validate",
            post(validation::validate_single_field),
        )
}
