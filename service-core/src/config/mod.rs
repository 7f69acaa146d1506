use crate::error::AppError;
use config::Config as Cfg;
use serde::Deserialize;

/// Settings common to the service process: currently just the listen port.
/// Everything is environment-driven (`.env` in dev, `APP__`-prefixed
/// variables everywhere); there is no configuration file in this deployment.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn port_defaults_to_8080() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.port, 8080);
    }
}
