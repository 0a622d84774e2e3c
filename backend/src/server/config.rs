//! Server settings loaded via OrthoConfig.
//!
//! Every field can come from a `SHAREFOOD_*` environment variable, a config
//! file or a CLI flag; unset optional fields fall back to the defaults below.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 120;
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CLIENT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No signing secret was configured.
    #[error("SHAREFOOD_JWT_SECRET must be set")]
    MissingJwtSecret,
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Configuration values for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHAREFOOD")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; fixture ports are used when absent.
    pub database_url: Option<String>,
    /// HMAC secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Bearer token lifetime in minutes.
    pub token_ttl_minutes: Option<i64>,
    /// Language used when `Accept-Language` matches nothing.
    pub default_language: Option<String>,
    /// JSON message catalog replacing the bundled one.
    pub message_catalog_path: Option<PathBuf>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Seconds a client has to send its request head.
    pub client_request_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Signing secret, moved into zeroizing storage.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingJwtSecret`] when unset or blank.
    pub fn jwt_secret(&self) -> Result<Zeroizing<String>, SettingsError> {
        match self.jwt_secret.as_deref() {
            Some(secret) if !secret.trim().is_empty() => Ok(Zeroizing::new(secret.to_owned())),
            _ => Err(SettingsError::MissingJwtSecret),
        }
    }

    /// Bearer token lifetime.
    pub fn token_ttl(&self) -> chrono::Duration {
        let minutes = self
            .token_ttl_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        chrono::Duration::minutes(minutes)
    }

    /// Fallback response language.
    pub fn default_language(&self) -> &str {
        self.default_language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Pool size cap.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Request head timeout.
    pub fn client_request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.client_request_timeout_secs
                .unwrap_or(DEFAULT_CLIENT_REQUEST_TIMEOUT_SECS),
        )
    }
}
