use futures::FutureExt;

use crate::{
    errors::AppError,
    models::{feedback::FeedbackRecord, stats::StatsSummary},
    stats::aggregator::aggregate,
};

/// Aggregates `records` on the blocking pool so request tasks stay responsive.
pub fn spawn_aggregate(
    records: Vec<FeedbackRecord>,
) -> impl Future<Output = Result<StatsSummary, AppError>> + Send + 'static {
    run_blocking(move || {
        tracing::debug!("Aggregating {} feedback records", records.len());
        aggregate(&records)
    })
}

/// Runs a stats job on tokio's blocking pool. A job that panics or is
/// cancelled resolves to `AppError::WorkerFailed`.
pub fn run_blocking<F>(job: F) -> impl Future<Output = Result<StatsSummary, AppError>> + Send + 'static
where
    F: FnOnce() -> StatsSummary + Send + 'static,
{
    tokio::task::spawn_blocking(job).map(|joined| {
        joined.map_err(|e| {
            tracing::error!("Stats worker failed: {}", e);
            AppError::WorkerFailed(e.to_string())
        })
    })
}
