pub mod feedback;
pub mod filter;
pub mod redis;
pub mod stats;

pub use feedback::{FeedbackRecord, NewFeedback, Rating, RawRating, RecordError};
pub use filter::FeedbackFilter;
pub use stats::{StatsSummary, StatsView, TrendEntry};
