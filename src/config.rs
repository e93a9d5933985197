// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! # Runtime Configuration
//!
//! Read once from the environment at process entry and passed explicitly
//! into everything that needs it; request-handling code never touches
//! ambient environment state.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `MONGO_URL` | MongoDB connection string | Required (fatal if absent) |
//! | `DB_NAME` | Database name | `meridian` |
//! | `USER_JWT_SECRET` | Signing secret, user track | Dev fallback (warned) |
//! | `ADMIN_JWT_SECRET` | Signing secret, admin track | Dev fallback (warned) |
//! | `CORS_ORIGINS` | Comma-separated allowed origins, or `*` | `*` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |
//!
//! The two token secrets MUST differ in any real deployment; tokens from
//! one track must never verify on the other.

use std::env;

use thiserror::Error;

const DEV_USER_SECRET: &str = "dev-user-secret-change-in-production";
const DEV_ADMIN_SECRET: &str = "dev-admin-secret-change-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("environment variable {0} has an invalid value: {1}")]
    InvalidVar(&'static str, String),
}

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string.
    pub mongo_url: String,
    /// Database name.
    pub db_name: String,
    /// User-track token signing secret.
    pub user_token_secret: String,
    /// Admin-track token signing secret.
    pub admin_token_secret: String,
    /// Allowed CORS origins (`*` means any).
    pub cors_origins: Vec<String>,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// A missing `MONGO_URL` is fatal; everything else has a default.
    /// Falling back to a development token secret is allowed but warned
    /// about loudly.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongo_url = env::var("MONGO_URL").map_err(|_| ConfigError::MissingVar("MONGO_URL"))?;
        let db_name = env::var("DB_NAME").unwrap_or_else(|_| "meridian".to_string());

        let user_token_secret = env::var("USER_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("USER_JWT_SECRET not set, using development fallback");
            DEV_USER_SECRET.to_string()
        });
        let admin_token_secret = env::var("ADMIN_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("ADMIN_JWT_SECRET not set, using development fallback");
            DEV_ADMIN_SECRET.to_string()
        });
        if user_token_secret == admin_token_secret {
            tracing::warn!(
                "user and admin token secrets are identical; the tracks must use distinct secrets"
            );
        }

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidVar("PORT", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            mongo_url,
            db_name,
            user_token_secret,
            admin_token_secret,
            cors_origins,
            host,
            port,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Minimal config for constructing state in tests.
    pub fn for_tests() -> Self {
        Self {
            mongo_url: "mongodb://localhost:27017".into(),
            db_name: "meridian_test".into(),
            user_token_secret: "user-track-test-secret".into(),
            admin_token_secret: "admin-track-test-secret".into(),
            cors_origins: vec!["*".into()],
            host: "127.0.0.1".into(),
            port: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_tracks_use_distinct_secrets() {
        let config = Config::for_tests();
        assert_ne!(config.user_token_secret, config.admin_token_secret);
    }
}
