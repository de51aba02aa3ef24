//! HTTP handlers: translate wire payloads into store operations.
//!
//! Validation failures answer 400. Every store failure, a delete that
//! matched nothing included, answers 500 with an empty body; the detail goes
//! to the server log only.

pub mod rules;
pub mod whitelists;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use netpolicy_core::NetPolicyError;

/// Handler-side wrapper so store errors can become responses.
#[derive(Debug)]
pub struct ApiError(pub NetPolicyError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.client_code().is_caller_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}
