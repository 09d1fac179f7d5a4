use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::FeedbackStore,
    errors::AppError,
    models::{FeedbackFilter, FeedbackRecord, NewFeedback},
};

/// Process-local store, used when no Redis is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeedbackStore {
    records: Arc<RwLock<Vec<FeedbackRecord>>>,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from already-validated records. Records without an id get one.
    pub fn with_records(records: Vec<FeedbackRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|mut r| {
                r.id.get_or_insert_with(Uuid::new_v4);
                r
            })
            .collect();
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn insert(&self, feedback: NewFeedback) -> Result<FeedbackRecord, AppError> {
        let record = feedback.into_record(Uuid::new_v4(), Utc::now())?;
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<FeedbackRecord, AppError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == Some(id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Feedback {id} not found")))
    }

    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<FeedbackRecord>, AppError> {
        let mut matching: Vec<FeedbackRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}
