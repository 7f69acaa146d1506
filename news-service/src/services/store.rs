use crate::models::NewsItem;
use async_trait::async_trait;
use service_core::error::AppError;

/// Persistence seam for news items. The production implementation is
/// MongoDB; tests substitute an in-memory fake.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// All stored items in the store's natural order, internal ids stripped.
    async fn list(&self) -> Result<Vec<NewsItem>, AppError>;

    async fn insert(&self, item: NewsItem) -> Result<(), AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
