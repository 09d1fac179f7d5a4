#![allow(dead_code)]

use chrono::{DateTime, Utc};
use feedback_stats_be::models::{FeedbackRecord, Rating};

pub fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

pub fn record(rating: u8, created_at: &str) -> FeedbackRecord {
    FeedbackRecord {
        id: None,
        name: None,
        email: None,
        rating: Rating::try_from(rating).expect("rating in range"),
        comments: "Great service".into(),
        created_at: ts(created_at),
        owner_id: None,
        survey_id: None,
    }
}

pub fn owned_record(rating: u8, created_at: &str, owner_id: &str) -> FeedbackRecord {
    FeedbackRecord {
        owner_id: Some(owner_id.into()),
        ..record(rating, created_at)
    }
}
