pub mod aggregator;
pub mod board;
pub mod worker;

pub use aggregator::aggregate;
pub use board::{Outcome, Scope, StatsBoard, Ticket};
pub use worker::spawn_aggregate;

use crate::{
    db::FeedbackStore,
    errors::AppError,
    models::{
        filter::FeedbackFilter,
        stats::{StatsSummary, StatsView},
    },
};

/// Fetches the filtered records, aggregates them off the request task and
/// publishes the result on `board`.
pub async fn refresh(
    store: &dyn FeedbackStore,
    board: &StatsBoard,
    filter: &FeedbackFilter,
) -> Result<StatsView, AppError> {
    filter.validate()?;

    let records = store.list(filter).await?;
    let ticket = board.begin(filter).await;
    let result = spawn_aggregate(records).await;

    publish(board, ticket, result).await
}

/// Hands a finished computation to `board` and decides what the caller sees.
///
/// The caller always gets a summary for its own filter. On failure that is
/// the scope's previous summary, provided it was computed over the same
/// filter; otherwise the error is returned.
pub async fn publish(
    board: &StatsBoard,
    ticket: Ticket,
    result: Result<StatsSummary, AppError>,
) -> Result<StatsView, AppError> {
    let filter = ticket.filter.clone();

    match board.complete(ticket, result).await {
        Outcome::Applied(view) | Outcome::Superseded(view) => Ok(view),
        Outcome::Failed {
            previous: Some(view),
            ..
        } if view.filter == filter => Ok(view),
        Outcome::Failed { error, .. } => Err(error),
    }
}
