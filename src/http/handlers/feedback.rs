use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    models::{FeedbackFilter, FeedbackRecord, NewFeedback},
    state::AppState,
};

pub async fn submit_feedback_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewFeedback>,
) -> Result<Json<FeedbackRecord>, (StatusCode, String)> {
    match state.store.insert(payload).await {
        Ok(record) => {
            tracing::info!(
                "Feedback submitted with rating {} for owner {:?}",
                record.rating.value(),
                record.owner_id
            );
            Ok(Json(record))
        }
        Err(err) => {
            tracing::error!("Error submitting feedback: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn list_feedback_handler(
    State(state): State<AppState>,
    Query(filter): Query<FeedbackFilter>,
) -> Result<Json<Vec<FeedbackRecord>>, (StatusCode, String)> {
    filter.validate().map_err(|e| e.to_response())?;

    let records = state.store.list(&filter).await.map_err(|e| {
        tracing::error!("Failed to list feedback: {}", e);
        e.to_response()
    })?;

    Ok(Json(records))
}

pub async fn get_feedback_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FeedbackRecord>, (StatusCode, String)> {
    let record = state.store.get(id).await.map_err(|e| {
        tracing::error!("Error retrieving feedback {}: {}", id, e);
        e.to_response()
    })?;

    Ok(Json(record))
}
