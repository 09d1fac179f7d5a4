use std::fmt::Display;

pub struct RedisKey;

impl RedisKey {
    pub fn feedback(id: impl Display) -> String {
        format!("feedback:{id}")
    }

    pub fn feedbacks() -> String {
        "feedbacks".to_string()
    }

    pub fn owner_feedbacks(owner_id: &str) -> String {
        format!("owner:{owner_id}:feedbacks")
    }
}
