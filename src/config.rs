use std::{env, str::FromStr};

use dotenvy::dotenv;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost,http://localhost:4200";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

#[derive(Debug, Clone, Validate)]
pub struct Config {
    pub db_user: String,
    pub db_password: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub aws_access_key: String,
    pub aws_secret: String,
    #[validate(length(min = 1))]
    pub aws_bucket_name: String,
    #[validate(length(min = 1))]
    pub aws_region: String,
    pub cors_origins: Vec<String>,
    pub host: String,
    pub port: u16,
    #[validate(range(min = 1, max = 104857600))] // Max 100MB
    pub max_upload_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load environment variables from `.env` file (if it exists)
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_origins = or_default("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            db_user: required("DB_USER")?,
            db_password: required("DB_PASSWORD")?,
            db_host: or_default("DB_HOST", "localhost"),
            db_port: parse("DB_PORT", or_default("DB_PORT", "5432"))?,
            db_name: or_default("DB_NAME", "complaints"),
            aws_access_key: required("AWS_ACCESS_KEY")?,
            aws_secret: required("AWS_SECRET")?,
            aws_bucket_name: required("AWS_BUCKET_NAME")?,
            aws_region: required("AWS_REGION")?,
            cors_origins,
            host: or_default("HOST", "0.0.0.0"),
            port: parse("PORT", or_default("PORT", "8000"))?,
            max_upload_size: parse("MAX_UPLOAD_SIZE", or_default("MAX_UPLOAD_SIZE", "10485760"))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// PostgreSQL connection URL assembled from the `DB_*` settings.
    pub fn database_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    let parsed = raw.trim().parse();
    parsed.map_err(|_| ConfigError::Invalid(key, raw))
}
