pub mod health;
pub mod news;

pub use health::{health_check, readiness_check};
pub use news::{add_news_item, list_news};
