use crate::models::NewsItem;
use crate::services::secrets::DbCredentials;
use crate::services::store::NewsStore;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, Credential, FindOptions, Tls, TlsOptions},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    /// Connect with credentials from the secret payload. Transport encryption
    /// is on with certificate validation off, a deliberate relaxation for
    /// this deployment.
    pub async fn connect_with_credentials(
        credentials: &DbCredentials,
        database: &str,
        collection: &str,
    ) -> Result<Self, AppError> {
        tracing::info!(host = %credentials.host, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(format!("mongodb://{}", credentials.host))
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse MongoDB options for {}: {}", credentials.host, e);
                AppError::from(e)
            })?;
        options.credential = Some(
            Credential::builder()
                .username(credentials.username.clone())
                .password(credentials.password.clone())
                .build(),
        );
        options.tls = Some(Tls::Enabled(
            TlsOptions::builder()
                .allow_invalid_certificates(true)
                .build(),
        ));

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to build MongoDB client for {}: {}", credentials.host, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub fn news(&self) -> Collection<NewsItem> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

#[async_trait]
impl NewsStore for MongoDb {
    async fn list(&self) -> Result<Vec<NewsItem>, AppError> {
        // Natural order, no sort; the internal id is projected out.
        let options = FindOptions::builder()
            .projection(doc! { "_id": 0 })
            .build();
        let mut cursor = self.news().find(doc! {}, options).await?;

        let mut items = Vec::new();
        while let Some(item) = cursor.try_next().await? {
            items.push(item);
        }
        Ok(items)
    }

    async fn insert(&self, item: NewsItem) -> Result<(), AppError> {
        self.news().insert_one(&item, None).await.map_err(|e| {
            tracing::error!("Failed to insert news item: {}", e);
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
