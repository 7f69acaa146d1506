use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::Client;
use serde::Deserialize;
use service_core::error::AppError;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const MAX_ATTEMPTS: u32 = 3;

/// Database credentials as stored in the secret's JSON payload.
#[derive(Debug, Clone, Deserialize)]
pub struct DbCredentials {
    pub host: String,
    pub username: String,
    pub password: String,
}

impl DbCredentials {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::SecretsError(anyhow::anyhow!("Failed to parse credentials payload: {}", e))
        })
    }
}

/// Thin wrapper over the Secrets Manager client, fetched once at startup.
pub struct SecretsClient {
    client: Client,
}

impl SecretsClient {
    pub async fn new(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .timeout_config(
                TimeoutConfig::builder()
                    .connect_timeout(CONNECT_TIMEOUT)
                    .build(),
            )
            .retry_config(RetryConfig::standard().with_max_attempts(MAX_ATTEMPTS))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
        }
    }

    /// Fetch the raw secret payload. String secrets are returned as-is; the
    /// SDK hands binary secrets back already base64-decoded.
    pub async fn fetch(&self, secret_name: &str) -> Result<String, AppError> {
        tracing::info!(secret = %secret_name, "Fetching secret from Secrets Manager");

        let output = match self.client.get_secret_value().secret_id(secret_name).send().await {
            Ok(output) => output,
            Err(err) => return Err(classify_error(err, secret_name)),
        };

        if let Some(secret_string) = output.secret_string() {
            return Ok(secret_string.to_string());
        }

        match output.secret_binary() {
            Some(blob) => String::from_utf8(blob.clone().into_inner()).map_err(|e| {
                AppError::SecretsError(anyhow::anyhow!(
                    "Secret `{}` binary payload is not valid UTF-8: {}",
                    secret_name,
                    e
                ))
            }),
            None => Err(AppError::SecretsError(anyhow::anyhow!(
                "Secret `{}` has neither a string nor a binary payload",
                secret_name
            ))),
        }
    }
}

/// The five documented GetSecretValue error codes are logged by code and
/// propagated; anything else fails with a message naming the code instead of
/// silently passing through.
fn classify_error(
    err: SdkError<aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError>,
    secret_name: &str,
) -> AppError {
    match err {
        SdkError::ServiceError(_) => {
            let service_err = err.into_service_error();
            let recognized = service_err.is_decryption_failure()
                || service_err.is_internal_service_error()
                || service_err.is_invalid_parameter_exception()
                || service_err.is_invalid_request_exception()
                || service_err.is_resource_not_found_exception();
            let code = service_err.meta().code().unwrap_or("<none>").to_string();

            if recognized {
                tracing::error!(
                    error_code = %code,
                    secret = %secret_name,
                    "Secrets Manager request failed"
                );
                AppError::SecretsError(anyhow::Error::new(service_err))
            } else {
                tracing::error!(
                    error_code = %code,
                    secret = %secret_name,
                    "Unrecognized Secrets Manager error"
                );
                AppError::SecretsError(anyhow::anyhow!(
                    "Unrecognized Secrets Manager error code `{}` fetching secret `{}`",
                    code,
                    secret_name
                ))
            }
        }
        other => {
            tracing::error!(secret = %secret_name, "Secrets Manager request failed: {}", other);
            AppError::SecretsError(anyhow::Error::new(other))
        }
    }
}
