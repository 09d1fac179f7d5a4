pub mod get;
pub mod post;

pub use get::{get_feedback, list_feedback};
pub use post::create_feedback;
