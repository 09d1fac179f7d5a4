use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::AppError,
    models::feedback::{FeedbackRecord, MAX_RATING, MIN_RATING},
};

/// Selection applied before aggregation. Date bounds are inclusive UTC days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl FeedbackFilter {
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for (label, rating) in [("minRating", self.min_rating), ("maxRating", self.max_rating)] {
            if let Some(r) = rating {
                if !(MIN_RATING..=MAX_RATING).contains(&r) {
                    return Err(AppError::BadRequest(format!(
                        "{label} must be between {MIN_RATING} and {MAX_RATING}"
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_rating, self.max_rating) {
            if min > max {
                return Err(AppError::BadRequest(
                    "minRating must not exceed maxRating".into(),
                ));
            }
        }

        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(AppError::BadRequest("from must not be after to".into()));
            }
        }

        Ok(())
    }

    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        if let Some(owner_id) = &self.owner_id {
            if record.owner_id.as_deref() != Some(owner_id.as_str()) {
                return false;
            }
        }

        let rating = record.rating.value();
        if self.min_rating.is_some_and(|min| rating < min)
            || self.max_rating.is_some_and(|max| rating > max)
        {
            return false;
        }

        let day = record.created_day();
        !(self.from.is_some_and(|from| day < from) || self.to.is_some_and(|to| day > to))
    }

    /// Stats cache key: the owner, or `None` for every owner.
    pub fn scope(&self) -> Option<String> {
        self.owner_id.clone()
    }

    /// Inclusive lower bound in epoch millis.
    pub fn from_millis(&self) -> Option<i64> {
        self.from.map(|day| start_of_day(day).timestamp_millis())
    }

    /// Inclusive upper bound in epoch millis: the last millisecond of `to`.
    pub fn to_millis(&self) -> Option<i64> {
        self.to.map(|day| match day.checked_add_days(Days::new(1)) {
            Some(next) => start_of_day(next).timestamp_millis() - 1,
            None => i64::MAX,
        })
    }
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}
