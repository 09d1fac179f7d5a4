use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{
    feedback::{MAX_RATING, MIN_RATING},
    filter::FeedbackFilter,
};

/// Occurrences per rating value; keys 1..=5 are always present.
pub type RatingHistogram = BTreeMap<u8, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEntry {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub count: u64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_count: u64,
    pub average_rating: f64,
    pub rating_histogram: RatingHistogram,
    pub daily_trend: Vec<TrendEntry>,
}

impl StatsSummary {
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            average_rating: 0.0,
            rating_histogram: empty_histogram(),
            daily_trend: Vec::new(),
        }
    }
}

impl Default for StatsSummary {
    fn default() -> Self {
        Self::empty()
    }
}

pub fn empty_histogram() -> RatingHistogram {
    (MIN_RATING..=MAX_RATING).map(|r| (r, 0)).collect()
}

/// What the stats endpoints hand to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub summary: StatsSummary,
    /// Selection the summary was computed over.
    pub filter: FeedbackFilter,
    /// Set when the latest refresh failed and an older summary is served.
    pub stale: bool,
    pub computed_at: DateTime<Utc>,
}
