use chrono::Utc;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{FeedbackRecord, NewFeedback, redis::RedisKey},
    state::RedisClient,
};

pub async fn create_feedback(
    feedback: NewFeedback,
    redis: RedisClient,
) -> Result<FeedbackRecord, AppError> {
    let id = Uuid::new_v4();
    let record = feedback.into_record(id, Utc::now())?;

    let mut conn = redis.get().await?;

    let member = id.to_string();
    let score = record.created_at.timestamp_millis();
    let fields = record.to_storage();

    let mut pipe = redis::pipe();
    pipe.atomic()
        .hset_multiple(RedisKey::feedback(id), fields.as_slice())
        .ignore()
        .zadd(RedisKey::feedbacks(), &member, score)
        .ignore();
    if let Some(owner_id) = &record.owner_id {
        pipe.zadd(RedisKey::owner_feedbacks(owner_id), &member, score)
            .ignore();
    }

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!(
        "Stored feedback {} (rating {}, owner {:?})",
        id,
        record.rating.value(),
        record.owner_id
    );

    Ok(record)
}
