use std::{
    env,
    net::{IpAddr, SocketAddr},
};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/cyphertech.db";
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HOST is not a valid IP address: {0}")]
    InvalidHost(String),
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
    #[error("ACCESS_TOKEN_SECRET is too weak for production: {0}")]
    WeakSecret(&'static str),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    /// Optional on purpose: without it the server still starts and token
    /// operations fail per request.
    pub access_token_secret: Option<String>,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host_raw = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let host = host_raw
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_raw.clone()))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let access_token_secret = env::var("ACCESS_TOKEN_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty());

        Ok(AppConfig {
            host,
            port,
            database_url,
            access_token_secret,
            environment: current_environment(),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Rejects placeholder or short signing secrets in production.
    ///
    /// A missing secret only produces a warning here; token endpoints
    /// report it when they are called.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(secret) = self.access_token_secret.as_deref() else {
            warn!("ACCESS_TOKEN_SECRET not set; token issuance and verification will fail");
            return Ok(());
        };

        if !self.is_production() {
            return Ok(());
        }

        if secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::WeakSecret("must be at least 32 bytes"));
        }

        let lowered = secret.to_ascii_lowercase();
        if ["example", "changeme", "default", "secret"]
            .iter()
            .any(|word| lowered.contains(word))
        {
            return Err(ConfigError::WeakSecret("looks like a placeholder value"));
        }

        Ok(())
    }
}

fn current_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}
