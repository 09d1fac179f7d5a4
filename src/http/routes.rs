use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    http::handlers::{
        get_feedback_handler, get_latest_stats_handler, get_stats_handler, health_handler,
        list_feedback_handler, submit_feedback_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/feedback",
            post(submit_feedback_handler).get(list_feedback_handler),
        )
        .route("/feedback/{id}", get(get_feedback_handler))
        .route("/stats", get(get_stats_handler))
        .route("/stats/latest", get(get_latest_stats_handler))
        .with_state(state)
}
