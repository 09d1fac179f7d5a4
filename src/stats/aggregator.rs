use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{
    feedback::FeedbackRecord,
    stats::{StatsSummary, TrendEntry, empty_histogram},
};

/// Totals, rating histogram and per-day trend for a set of records.
///
/// Input order does not matter. Ratings are summed as integers, so the
/// averages come out bit-identical for any permutation of the same input.
pub fn aggregate(records: &[FeedbackRecord]) -> StatsSummary {
    let mut histogram = empty_histogram();
    let mut rating_sum: u64 = 0;
    // day -> (count, rating sum)
    let mut days: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();

    for record in records {
        let rating = record.rating.value() as u64;
        rating_sum += rating;
        *histogram.entry(record.rating.value()).or_insert(0) += 1;

        let day = days.entry(record.created_day()).or_insert((0, 0));
        day.0 += 1;
        day.1 += rating;
    }

    let total_count = records.len() as u64;

    // BTreeMap iterates days in ascending order, which matches the
    // `YYYY-MM-DD` string order.
    let daily_trend = days
        .into_iter()
        .map(|(date, (count, sum))| TrendEntry {
            date,
            count,
            average_rating: mean(sum, count),
        })
        .collect();

    StatsSummary {
        total_count,
        average_rating: mean(rating_sum, total_count),
        rating_histogram: histogram,
        daily_trend,
    }
}

fn mean(sum: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
