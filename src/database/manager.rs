use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::types::{DbKind, Region};

/// Errors from DatabaseManager and the regional store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connection settings for one (kind, region) cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbCredentials {
    pub host: String,
    pub user: String,
    pub password: String,
}

impl DbCredentials {
    /// Resolve `USER_NAME`, `HOST_{KIND}_{REGION}` and `PASSWD_{KIND}_{REGION}`
    pub fn resolve<F>(kind: DbKind, region: Region, lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host_key = format!("HOST_{}_{}", kind, region);
        let passwd_key = format!("PASSWD_{}_{}", kind, region);

        let user = lookup("USER_NAME").ok_or_else(|| DatabaseError::ConfigMissing("USER_NAME".to_string()))?;
        let host = lookup(&host_key).ok_or(DatabaseError::ConfigMissing(host_key))?;
        let password = lookup(&passwd_key).ok_or(DatabaseError::ConfigMissing(passwd_key))?;

        Ok(Self { host, user, password })
    }
}

/// Connection pool manager for the regional GENERAL and IDENTITY clusters.
/// Pools are created lazily on first use and cached per (region, kind).
pub struct DatabaseManager {
    pools: Arc<RwLock<HashMap<(Region, DbKind), MySqlPool>>>,
    settings: DatabaseConfig,
}

impl DatabaseManager {
    pub fn new(settings: DatabaseConfig) -> Self {
        Self {
            pools: Arc::new(RwLock::new(HashMap::new())),
            settings,
        }
    }

    /// Get existing pool or create a new one lazily
    pub async fn pool(&self, region: Region, kind: DbKind) -> Result<MySqlPool, DatabaseError> {
        // Fast path: try read lock
        {
            let pools = self.pools.read().await;
            if let Some(pool) = pools.get(&(region, kind)) {
                return Ok(pool.clone());
            }
        }

        let credentials = DbCredentials::resolve(kind, region, |key| std::env::var(key).ok())?;
        let options = MySqlConnectOptions::new()
            .host(&credentials.host)
            .port(self.settings.port)
            .username(&credentials.user)
            .password(&credentials.password);

        let pool = MySqlPoolOptions::new()
            .max_connections(self.settings.max_connections)
            .acquire_timeout(Duration::from_secs(self.settings.connection_timeout))
            .connect_with(options)
            .await?;

        // Another task may have raced us here; keep whichever landed first
        let pool = {
            let mut pools = self.pools.write().await;
            pools.entry((region, kind)).or_insert(pool).clone()
        };

        info!("Created database pool for {} {}", kind, region);
        Ok(pool)
    }

    /// Close and remove all pools (e.g., on shutdown)
    pub async fn close_all(&self) {
        let mut pools = self.pools.write().await;
        for ((region, kind), pool) in pools.drain() {
            pool.close().await;
            info!("Closed database pool: {} {}", kind, region);
        }
    }
}
