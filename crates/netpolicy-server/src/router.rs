//! Axum router wiring.
//!
//! Rule CRUD for operators, whitelist polling for dataplane agents, and a
//! liveness probe.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, handlers, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/rules", get(handlers::rules::list))
        .route("/rules/add", post(handlers::rules::add))
        .route("/rules/delete", post(handlers::rules::delete))
        .route("/whitelists", get(handlers::whitelists::get))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
