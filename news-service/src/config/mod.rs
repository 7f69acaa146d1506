use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub secrets: SecretsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub source: CredentialsSource,
    pub uri: Option<String>,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecretsConfig {
    pub secret_name: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialsSource {
    SecretsManager,
    Static,
}

impl NewsConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let source: CredentialsSource = get_env("CREDENTIALS_SOURCE", Some("secretsmanager"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let uri = match source {
            // The static path bypasses Secrets Manager entirely; the URI is
            // then mandatory.
            CredentialsSource::Static => Some(get_env("MONGODB_URI", None, is_prod)?),
            CredentialsSource::SecretsManager => env::var("MONGODB_URI").ok(),
        };

        Ok(NewsConfig {
            common: common_config,
            mongodb: MongoConfig {
                source,
                uri,
                database: get_env("MONGODB_DATABASE", Some("sample_database"), is_prod)?,
                collection: get_env("MONGODB_COLLECTION", Some("news"), is_prod)?,
            },
            secrets: SecretsConfig {
                secret_name: get_env("SECRET_NAME", Some("documentDB"), is_prod)?,
                region: get_env("AWS_REGION", Some("eu-west-2"), is_prod)?,
            },
        })
    }
}

impl std::str::FromStr for CredentialsSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "secretsmanager" => Ok(CredentialsSource::SecretsManager),
            "static" => Ok(CredentialsSource::Static),
            _ => Err(format!("Invalid credentials source: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}
