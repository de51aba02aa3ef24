//! `/whitelists` handler for dataplane agents.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::ApiError;
use crate::app_state::AppState;

/// Destination groups named by the first `groups` parameter.
///
/// Later repetitions of `groups` are ignored. A missing parameter resolves
/// a single empty group id.
pub fn requested_groups(params: &[(String, String)]) -> Vec<String> {
    let raw = params
        .iter()
        .find(|(k, _)| k == "groups")
        .map(|(_, v)| v.as_str())
        .unwrap_or_default();
    raw.split(',').map(str::to_string).collect()
}

pub async fn get(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let span = tracing::info_span!("whitelists");
    span.in_scope(|| {
        tracing::info!("start");
        let groups = requested_groups(&params);
        let res = match state.store().get_whitelists(&groups) {
            Ok(all) => (StatusCode::OK, Json(all)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, code = e.client_code().as_str(), "store-get-whitelists");
                ApiError(e).into_response()
            }
        };
        tracing::info!("done");
        res
    })
}
