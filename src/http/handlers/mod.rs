pub mod feedback;
pub mod stats;

pub use feedback::{get_feedback_handler, list_feedback_handler, submit_feedback_handler};
pub use stats::{get_latest_stats_handler, get_stats_handler};

pub async fn health_handler() -> &'static str {
    "ok"
}
