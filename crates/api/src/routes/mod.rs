pub mod health;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /rule-sets                                       list
/// /rule-sets/{name}                                describe
/// /rule-sets/{name}/validate                       validate record (POST)
/// /rule-sets/{name}/fields/{field}/validate        validate one field (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/rule-sets", validation::router())
}
