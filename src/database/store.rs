use async_trait::async_trait;
use sqlx::mysql::MySqlArguments;
use sqlx::query::Query;
use sqlx::MySql;
use std::time::{Duration, Instant};

use crate::config::DatabaseConfig;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::queries::LookupQuery;
use crate::database::row::{row_to_json, Row};
use crate::types::{DbKind, Region};

/// Point lookups against one regional cluster.
///
/// Everything above this trait works on reshaped rows, so the region
/// resolver and the chain walkers never touch a driver type.
#[async_trait]
pub trait RegionStore: Send + Sync {
    async fn fetch_one(&self, region: Region, kind: DbKind, query: &LookupQuery) -> Result<Option<Row>, DatabaseError>;

    async fn fetch_all(&self, region: Region, kind: DbKind, query: &LookupQuery) -> Result<Vec<Row>, DatabaseError>;

    /// Cheap connectivity check
    async fn ping(&self, region: Region, kind: DbKind) -> Result<(), DatabaseError>;
}

/// `RegionStore` backed by sqlx MySQL pools
pub struct MySqlRegionStore {
    manager: DatabaseManager,
    slow_query_threshold: Duration,
}

impl MySqlRegionStore {
    pub fn new(settings: DatabaseConfig) -> Self {
        let slow_query_threshold = Duration::from_millis(settings.slow_query_threshold_ms);
        Self {
            manager: DatabaseManager::new(settings),
            slow_query_threshold,
        }
    }

    pub async fn close(&self) {
        self.manager.close_all().await;
    }

    fn bind<'q>(query: &'q LookupQuery) -> Query<'q, MySql, MySqlArguments> {
        query
            .binds
            .iter()
            .fold(sqlx::query(query.sql), |q, value| q.bind(value.as_str()))
    }

    fn note_elapsed(&self, region: Region, kind: DbKind, query: &LookupQuery, started: Instant) {
        let elapsed = started.elapsed();
        if elapsed > self.slow_query_threshold {
            tracing::warn!(
                "Slow query on {} {} ({} ms): {}",
                kind,
                region,
                elapsed.as_millis(),
                query.sql
            );
        }
    }
}

#[async_trait]
impl RegionStore for MySqlRegionStore {
    async fn fetch_one(&self, region: Region, kind: DbKind, query: &LookupQuery) -> Result<Option<Row>, DatabaseError> {
        let pool = self.manager.pool(region, kind).await?;
        let started = Instant::now();
        let row = Self::bind(query).fetch_optional(&pool).await?;
        self.note_elapsed(region, kind, query, started);
        Ok(row.as_ref().map(row_to_json))
    }

    async fn fetch_all(&self, region: Region, kind: DbKind, query: &LookupQuery) -> Result<Vec<Row>, DatabaseError> {
        let pool = self.manager.pool(region, kind).await?;
        let started = Instant::now();
        let rows = Self::bind(query).fetch_all(&pool).await?;
        self.note_elapsed(region, kind, query, started);
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn ping(&self, region: Region, kind: DbKind) -> Result<(), DatabaseError> {
        let pool = self.manager.pool(region, kind).await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }
}
