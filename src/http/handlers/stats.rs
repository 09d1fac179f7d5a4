use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    errors::AppError,
    models::{FeedbackFilter, StatsView},
    state::AppState,
    stats::refresh,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestStatsQuery {
    pub owner_id: Option<String>,
}

pub async fn get_stats_handler(
    State(state): State<AppState>,
    Query(filter): Query<FeedbackFilter>,
) -> Result<Json<StatsView>, (StatusCode, String)> {
    let view = refresh(state.store.as_ref(), &state.stats, &filter)
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute stats: {}", e);
            e.to_response()
        })?;

    if view.stale {
        tracing::warn!("Serving stale stats for scope {:?}", filter.scope());
    }

    Ok(Json(view))
}

pub async fn get_latest_stats_handler(
    State(state): State<AppState>,
    Query(query): Query<LatestStatsQuery>,
) -> Result<Json<StatsView>, (StatusCode, String)> {
    match state.stats.latest(query.owner_id.as_deref()).await {
        Some(view) => Ok(Json(view)),
        None => {
            let scope = query.owner_id.as_deref().unwrap_or("all owners");
            Err(AppError::NotFound(format!("No stats computed yet for {scope}")).to_response())
        }
    }
}
