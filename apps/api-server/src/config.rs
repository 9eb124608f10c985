//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use inkwell_core::pagination::DEFAULT_PAGE_SIZE;
use inkwell_infra::auth::JwtConfig;
use inkwell_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs against the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub feed_page_size: u64,
    pub media_root: PathBuf,
    pub jwt: JwtConfig,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS").unwrap_or(20),
            min_connections: parsed("DB_MIN_CONNECTIONS").unwrap_or(2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(8080),
            database,
            feed_page_size: parsed("FEED_PAGE_SIZE")
                .filter(|size: &u64| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("media")),
            jwt: JwtConfig::from_env(),
        }
    }

    /// In-memory settings used by handler tests.
    #[cfg(test)]
    pub fn for_tests(media_root: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database: None,
            feed_page_size: DEFAULT_PAGE_SIZE,
            media_root: media_root.into(),
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                issuer: "inkwell-test".to_string(),
            },
        }
    }
}
