pub mod feedback;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{FeedbackFilter, FeedbackRecord, NewFeedback},
    state::RedisClient,
};

pub use memory::MemoryFeedbackStore;

/// Where feedback records live. Implementations reject malformed stored
/// records here so everything downstream works with valid values only.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Validates and persists a submission, assigning its id and timestamp.
    async fn insert(&self, feedback: NewFeedback) -> Result<FeedbackRecord, AppError>;

    async fn get(&self, id: Uuid) -> Result<FeedbackRecord, AppError>;

    /// Records matching `filter`, newest first.
    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<FeedbackRecord>, AppError>;
}

#[derive(Clone)]
pub struct RedisFeedbackStore {
    redis: RedisClient,
}

impl RedisFeedbackStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl FeedbackStore for RedisFeedbackStore {
    async fn insert(&self, feedback: NewFeedback) -> Result<FeedbackRecord, AppError> {
        feedback::post::create_feedback(feedback, self.redis.clone()).await
    }

    async fn get(&self, id: Uuid) -> Result<FeedbackRecord, AppError> {
        feedback::get::get_feedback(id, self.redis.clone()).await
    }

    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<FeedbackRecord>, AppError> {
        feedback::get::list_feedback(filter, self.redis.clone()).await
    }
}
