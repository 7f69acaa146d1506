use crate::config::{CredentialsSource, NewsConfig};
use crate::handlers;
use crate::services::{DbCredentials, MongoDb, NewsStore, SecretsClient};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NewsStore>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    /// Full cold-start path: resolve credentials, connect to MongoDB once,
    /// then wire the router around the resulting store.
    pub async fn build(config: NewsConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;
        Self::with_store(config, store).await
    }

    /// Router wiring around an already-constructed store. Tests inject an
    /// in-memory fake here.
    pub async fn with_store(
        config: NewsConfig,
        store: Arc<dyn NewsStore>,
    ) -> Result<Self, AppError> {
        let state = AppState { store };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/news", get(handlers::list_news))
            .route("/newsitem", post(handlers::add_news_item))
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn connect_store(config: &NewsConfig) -> Result<Arc<dyn NewsStore>, AppError> {
    let mongo = &config.mongodb;
    let db = match mongo.source {
        CredentialsSource::SecretsManager => {
            let secrets = SecretsClient::new(&config.secrets.region).await;
            let payload = secrets.fetch(&config.secrets.secret_name).await?;
            let credentials = DbCredentials::parse(&payload)?;
            MongoDb::connect_with_credentials(&credentials, &mongo.database, &mongo.collection)
                .await?
        }
        CredentialsSource::Static => {
            let uri = mongo.uri.as_deref().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!(
                    "MONGODB_URI is required with the static credentials source"
                ))
            })?;
            MongoDb::connect(uri, &mongo.database, &mongo.collection).await?
        }
    };
    Ok(Arc::new(db))
}
