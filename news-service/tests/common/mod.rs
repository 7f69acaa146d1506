use async_trait::async_trait;
use news_service::config::NewsConfig;
use news_service::models::NewsItem;
use news_service::services::NewsStore;
use news_service::startup::Application;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory store so tests can drive the full HTTP surface without a
/// database.
#[derive(Default)]
pub struct InMemoryNewsStore {
    items: Mutex<Vec<NewsItem>>,
    unavailable: AtomicBool,
}

impl InMemoryNewsStore {
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    /// Simulate a lost database connection; every store call fails until
    /// cleared.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "connection refused"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl NewsStore for InMemoryNewsStore {
    async fn list(&self) -> Result<Vec<NewsItem>, AppError> {
        self.check_available()?;
        Ok(self.items.lock().await.clone())
    }

    async fn insert(&self, item: NewsItem) -> Result<(), AppError> {
        self.check_available()?;
        self.items.lock().await.push(item);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.check_available()
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryNewsStore>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        std::env::set_var("CREDENTIALS_SOURCE", "static");
        std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");

        let mut config = NewsConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing

        let store = Arc::new(InMemoryNewsStore::default());
        let app = Application::with_store(config, store.clone())
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp { address, store }
    }
}
