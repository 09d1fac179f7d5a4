use redis::AsyncCommands;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{FeedbackFilter, FeedbackRecord, redis::RedisKey},
    state::RedisClient,
};

pub async fn get_feedback(id: Uuid, redis: RedisClient) -> Result<FeedbackRecord, AppError> {
    let mut conn = redis.get().await?;

    let data: HashMap<String, String> = conn
        .hgetall(RedisKey::feedback(id))
        .await
        .map_err(AppError::RedisCommandError)?;

    if data.is_empty() {
        return Err(AppError::NotFound(format!("Feedback {id} not found")));
    }

    let mut record = FeedbackRecord::from_storage(&data)?;
    record.id.get_or_insert(id);

    Ok(record)
}

pub async fn list_feedback(
    filter: &FeedbackFilter,
    redis: RedisClient,
) -> Result<Vec<FeedbackRecord>, AppError> {
    let mut conn = redis.get().await?;

    let index_key = match &filter.owner_id {
        Some(owner_id) => RedisKey::owner_feedbacks(owner_id),
        None => RedisKey::feedbacks(),
    };
    let max = filter
        .to_millis()
        .map(|ms| ms.to_string())
        .unwrap_or_else(|| "+inf".into());
    let min = filter
        .from_millis()
        .map(|ms| ms.to_string())
        .unwrap_or_else(|| "-inf".into());

    // Newest first
    let ids: Vec<String> = redis::cmd("ZREVRANGEBYSCORE")
        .arg(&index_key)
        .arg(max)
        .arg(min)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut pipe = redis::pipe();
    for id in &ids {
        pipe.hgetall(RedisKey::feedback(id));
    }
    let rows: Vec<HashMap<String, String>> = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = 0usize;

    for (id, data) in ids.iter().zip(rows) {
        if data.is_empty() {
            tracing::warn!("Index {} points at missing feedback {}", index_key, id);
            continue;
        }

        match FeedbackRecord::from_storage(&data) {
            Ok(mut record) => {
                if record.id.is_none() {
                    record.id = Uuid::parse_str(id).ok();
                }
                if filter.matches(&record) {
                    records.push(record);
                }
            }
            Err(e) => {
                rejected += 1;
                tracing::warn!("Skipping malformed feedback {}: {}", id, e);
            }
        }
    }

    if rejected > 0 {
        tracing::warn!(
            "Rejected {} malformed feedback records from {}",
            rejected,
            index_key
        );
    }

    Ok(records)
}
