//! `/rules` handlers for operators: list, add, delete.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use netpolicy_core::error::{NetPolicyError, Result};
use netpolicy_core::models::Rule;

use super::ApiError;
use crate::app_state::AppState;

/// Decode and validate a `{group1, group2}` body.
pub(crate) fn read_rule(body: &[u8]) -> Result<Rule> {
    let rule: Rule = serde_json::from_slice(body)
        .map_err(|e| NetPolicyError::BadRequest(format!("invalid rule payload: {e}")))?;
    rule.validate()?;
    Ok(rule)
}

pub async fn list(State(state): State<AppState>) -> Response {
    let span = tracing::info_span!("list-rules");
    span.in_scope(|| {
        tracing::info!("start");
        let res = match state.store().list() {
            Ok(all) => (StatusCode::OK, Json(all)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, code = e.client_code().as_str(), "store-list");
                ApiError(e).into_response()
            }
        };
        tracing::info!("done");
        res
    })
}

pub async fn add(State(state): State<AppState>, body: Bytes) -> Response {
    let span = tracing::info_span!("add-rule");
    span.in_scope(|| {
        tracing::info!("start");
        let res = match read_rule(&body) {
            Err(e) => {
                tracing::info!(error = %e, "rejected");
                ApiError(e).into_response()
            }
            Ok(rule) => {
                tracing::info!(rule = %rule, "adding");
                match state.store().add(rule) {
                    Ok(()) => StatusCode::CREATED.into_response(),
                    Err(e) => {
                        tracing::error!(error = %e, code = e.client_code().as_str(), "store-add");
                        ApiError(e).into_response()
                    }
                }
            }
        };
        tracing::info!("done");
        res
    })
}

pub async fn delete(State(state): State<AppState>, body: Bytes) -> Response {
    let span = tracing::info_span!("delete-rule");
    span.in_scope(|| {
        tracing::info!("start");
        let res = match read_rule(&body) {
            Err(e) => {
                tracing::info!(error = %e, "rejected");
                ApiError(e).into_response()
            }
            Ok(rule) => {
                tracing::info!(rule = %rule, "deleting");
                match state.store().delete(&rule) {
                    Ok(()) => StatusCode::NO_CONTENT.into_response(),
                    Err(e) => {
                        tracing::error!(error = %e, code = e.client_code().as_str(), "store-delete");
                        ApiError(e).into_response()
                    }
                }
            }
        };
        tracing::info!("done");
        res
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn reads_valid_rule() {
        let rule = read_rule(br#"{"group1":"a","group2":"b"}"#).unwrap();
        assert_eq!(rule, Rule::new("a", "b"));
    }

    #[test]
    fn rejects_malformed_and_incomplete_bodies() {
        for body in [
            &b"not json"[..],
            &br#"{"group1":"a"}"#[..],
            &br#"{"group1":"","group2":"b"}"#[..],
            &b""[..],
        ] {
            let err = read_rule(body).unwrap_err();
            assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
        }
    }
}
