//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use quickblog_core::BlogService;
use quickblog_core::ports::{KeyValueStore, PasswordService};
use quickblog_infra::{Argon2PasswordService, InMemoryStore};

#[cfg(feature = "redis")]
use quickblog_infra::RedisStore;

use crate::config::AppConfig;

/// Which store the server ended up running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    pub backend: StoreBackend,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the application state with the configured store.
    ///
    /// Falls back to the in-memory store when Redis is unreachable and the
    /// fallback is enabled.
    pub async fn new(config: AppConfig) -> io::Result<Self> {
        let passwords: Arc<dyn PasswordService> = Arc::new(
            Argon2PasswordService::with_config(config.argon2)
                .map_err(|e| io::Error::other(e.to_string()))?,
        );

        let (store, backend) = Self::connect_store(&config).await?;
        tracing::info!(backend = ?backend, "Application state initialized");

        Ok(Self::from_parts(store, passwords, backend, config))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        store: Arc<dyn KeyValueStore>,
        passwords: Arc<dyn PasswordService>,
        backend: StoreBackend,
        config: AppConfig,
    ) -> Self {
        Self {
            blog: BlogService::new(store, passwords),
            backend,
            config: Arc::new(config),
        }
    }

    #[cfg(feature = "redis")]
    async fn connect_store(config: &AppConfig) -> io::Result<(Arc<dyn KeyValueStore>, StoreBackend)> {
        match RedisStore::new(&config.redis).await {
            Ok(store) => Ok((Arc::new(store), StoreBackend::Redis)),
            Err(e) if config.redis.fallback_to_memory => {
                tracing::warn!(
                    error = %e,
                    "Redis unavailable. Using in-memory store; data will not survive a restart."
                );
                Ok((Arc::new(InMemoryStore::new()), StoreBackend::Memory))
            }
            Err(e) => {
                tracing::error!(error = %e, "Redis unavailable and fallback disabled");
                Err(io::Error::other(e.to_string()))
            }
        }
    }

    #[cfg(not(feature = "redis"))]
    async fn connect_store(_config: &AppConfig) -> io::Result<(Arc<dyn KeyValueStore>, StoreBackend)> {
        tracing::info!("Running without redis feature - using in-memory store");
        Ok((Arc::new(InMemoryStore::new()), StoreBackend::Memory))
    }
}
