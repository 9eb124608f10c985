//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::ports::{MediaStore, PasswordService, TokenService};
use inkwell_core::service::{AccountService, BlogService, CatalogService, Repositories};
use inkwell_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService, LocalMediaStore};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use inkwell_infra::DatabaseConnections;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    pub accounts: AccountService,
    pub catalog: CatalogService,
    pub tokens: Arc<dyn TokenService>,
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    /// Build the application state, preferring PostgreSQL when configured.
    pub async fn new(config: &AppConfig) -> Self {
        let repos = Self::repositories(config).await;
        let state = Self::from_repositories(config, repos);
        tracing::info!("Application state initialized");
        state
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> Repositories {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return InMemoryStore::new().repositories();
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => connections.repositories(),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                InMemoryStore::new().repositories()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(_config: &AppConfig) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        InMemoryStore::new().repositories()
    }

    /// Wire services over an existing set of repositories.
    pub fn from_repositories(config: &AppConfig, repos: Repositories) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            accounts: AccountService::new(repos.users.clone(), passwords),
            catalog: CatalogService::new(repos.categories.clone(), repos.locations.clone()),
            blog: BlogService::new(repos).with_page_size(config.feed_page_size),
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            media: Arc::new(LocalMediaStore::new(config.media_root.clone())),
        }
    }
}
