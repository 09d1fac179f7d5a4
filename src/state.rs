use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use std::sync::Arc;

use crate::{db::FeedbackStore, stats::StatsBoard};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FeedbackStore>,
    pub stats: StatsBoard,
}

impl AppState {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self {
            store,
            stats: StatsBoard::new(),
        }
    }
}

pub type RedisClient = Pool<RedisConnectionManager>;
