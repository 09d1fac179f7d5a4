use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    errors::AppError,
    models::{
        filter::FeedbackFilter,
        stats::{StatsSummary, StatsView},
    },
};

/// Owner the summary belongs to; `None` covers every owner.
pub type Scope = Option<String>;

/// Identifies one refresh of one scope. Later tickets win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub scope: Scope,
    pub seq: u64,
    pub filter: FeedbackFilter,
}

#[derive(Debug)]
pub enum Outcome {
    /// The result became the current summary for its scope.
    Applied(StatsView),
    /// A newer refresh already landed. The caller still gets its own result,
    /// the scope keeps the newer one.
    Superseded(StatsView),
    /// The computation failed; whatever was shown before stays.
    Failed {
        previous: Option<StatsView>,
        error: AppError,
    },
}

#[derive(Debug, Clone)]
struct Snapshot {
    summary: StatsSummary,
    filter: FeedbackFilter,
    computed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Slot {
    issued: u64,
    applied: u64,
    snapshot: Option<Snapshot>,
    // a refresh newer than the snapshot failed
    stale: bool,
}

impl Slot {
    fn view(&self) -> Option<StatsView> {
        self.snapshot.as_ref().map(|s| StatsView {
            summary: s.summary.clone(),
            filter: s.filter.clone(),
            stale: self.stale,
            computed_at: s.computed_at,
        })
    }
}

/// Last good summary per scope, shared by every request handler.
#[derive(Debug, Clone, Default)]
pub struct StatsBoard {
    slots: Arc<Mutex<HashMap<Scope, Slot>>>,
}

impl StatsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn begin(&self, filter: &FeedbackFilter) -> Ticket {
        let scope = filter.scope();
        let mut slots = self.slots.lock().await;
        let slot = slots.entry(scope.clone()).or_default();
        slot.issued += 1;

        Ticket {
            scope,
            seq: slot.issued,
            filter: filter.clone(),
        }
    }

    pub async fn complete(
        &self,
        ticket: Ticket,
        result: Result<StatsSummary, AppError>,
    ) -> Outcome {
        let mut slots = self.slots.lock().await;
        let slot = slots.entry(ticket.scope.clone()).or_default();

        match result {
            Ok(summary) => {
                let view = StatsView {
                    summary,
                    filter: ticket.filter,
                    stale: false,
                    computed_at: Utc::now(),
                };

                if ticket.seq <= slot.applied {
                    tracing::debug!(
                        "Not publishing stats refresh #{} for scope {:?}: #{} already applied",
                        ticket.seq,
                        ticket.scope,
                        slot.applied
                    );
                    return Outcome::Superseded(view);
                }

                slot.applied = ticket.seq;
                slot.stale = false;
                slot.snapshot = Some(Snapshot {
                    summary: view.summary.clone(),
                    filter: view.filter.clone(),
                    computed_at: view.computed_at,
                });
                Outcome::Applied(view)
            }
            Err(error) => {
                tracing::error!(
                    "Stats refresh #{} for scope {:?} failed: {}",
                    ticket.seq,
                    ticket.scope,
                    error
                );
                if ticket.seq > slot.applied {
                    slot.stale = slot.snapshot.is_some();
                }
                Outcome::Failed {
                    previous: slot.view(),
                    error,
                }
            }
        }
    }

    pub async fn latest(&self, scope: Option<&str>) -> Option<StatsView> {
        self.slots
            .lock()
            .await
            .get(&scope.map(str::to_string))
            .and_then(Slot::view)
    }
}
