use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::database::{DatabaseError, LookupQuery, RegionStore, Row};
use crate::types::{DbKind, Region};

/// In-memory `RegionStore` keyed by exact (region, kind, query)
#[derive(Default)]
pub struct MemoryStore {
    rows: HashMap<(Region, DbKind, LookupQuery), Vec<Row>>,
    failing: HashSet<Region>,
    unconfigured: HashMap<Region, String>,
    calls: Mutex<Vec<(Region, DbKind)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row to the result set of `query` in `region`
    pub fn with_row(mut self, region: Region, kind: DbKind, query: LookupQuery, row: Value) -> Self {
        let row = row.as_object().cloned().unwrap_or_default();
        self.rows.entry((region, kind, query)).or_default().push(row);
        self
    }

    /// Every query against `region` fails as if the cluster were down
    pub fn failing(mut self, region: Region) -> Self {
        self.failing.insert(region);
        self
    }

    /// Every query against `region` fails as if `key` were unset
    pub fn unconfigured(mut self, region: Region, key: &str) -> Self {
        self.unconfigured.insert(region, key.to_string());
        self
    }

    /// (region, kind) of every fetch, in call order
    pub fn calls(&self) -> Vec<(Region, DbKind)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn check(&self, region: Region, kind: DbKind) -> Result<(), DatabaseError> {
        if let Some(key) = self.unconfigured.get(&region) {
            return Err(DatabaseError::ConfigMissing(key.clone()));
        }
        if self.failing.contains(&region) {
            return Err(DatabaseError::QueryError(format!("{} {} unavailable", kind, region)));
        }
        Ok(())
    }

    fn lookup(&self, region: Region, kind: DbKind, query: &LookupQuery) -> Result<Vec<Row>, DatabaseError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((region, kind));
        }
        self.check(region, kind)?;
        Ok(self
            .rows
            .get(&(region, kind, query.clone()))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl RegionStore for MemoryStore {
    async fn fetch_one(&self, region: Region, kind: DbKind, query: &LookupQuery) -> Result<Option<Row>, DatabaseError> {
        Ok(self.lookup(region, kind, query)?.into_iter().next())
    }

    async fn fetch_all(&self, region: Region, kind: DbKind, query: &LookupQuery) -> Result<Vec<Row>, DatabaseError> {
        self.lookup(region, kind, query)
    }

    async fn ping(&self, region: Region, kind: DbKind) -> Result<(), DatabaseError> {
        self.check(region, kind)
    }
}
