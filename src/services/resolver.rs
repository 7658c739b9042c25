use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use super::LookupError;
use crate::database::queries::{self, LookupQuery};
use crate::database::{DatabaseError, RegionStore, Row, RowExt};
use crate::types::{DbKind, IdType, Region};

/// A value together with the region it was found in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Located<T> {
    pub region: Region,
    pub value: T,
}

impl<T> Located<T> {
    pub fn new(region: Region, value: T) -> Self {
        Self { region, value }
    }
}

impl Located<Row> {
    /// The row with a leading `region` key
    pub fn into_tagged_row(self) -> Row {
        let mut tagged = Row::new();
        tagged.insert("region".to_string(), Value::String(self.region.to_string()));
        for (key, value) in self.value {
            if key != "region" {
                tagged.insert(key, value);
            }
        }
        tagged
    }
}

/// Walks the configured regions in order and stops at the first hit
#[derive(Clone)]
pub struct RegionResolver {
    store: Arc<dyn RegionStore>,
    regions: Vec<Region>,
}

impl RegionResolver {
    pub fn new(store: Arc<dyn RegionStore>, regions: Vec<Region>) -> Self {
        Self { store, regions }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn store(&self) -> &Arc<dyn RegionStore> {
        &self.store
    }

    /// First region holding a row for `query`. Regions that fail are logged
    /// and skipped; if none answered with a row and any failed, the lookup is
    /// reported as incomplete rather than not found. Missing credentials stop
    /// the walk at once.
    pub async fn find_first(&self, kind: DbKind, query: &LookupQuery) -> Result<Option<Located<Row>>, LookupError> {
        let started = Instant::now();
        let mut failed = Vec::new();

        for &region in &self.regions {
            tracing::debug!("Checking {} {} region", kind, region);
            match self.store.fetch_one(region, kind, query).await {
                Ok(Some(row)) => {
                    tracing::info!(
                        "Found record in {} {} after {} ms",
                        kind,
                        region,
                        started.elapsed().as_millis()
                    );
                    return Ok(Some(Located::new(region, row)));
                }
                Ok(None) => tracing::debug!("Could not find record in {}", region),
                Err(e @ DatabaseError::ConfigMissing(_)) => {
                    tracing::error!("Cannot query {} database for {}: {}", kind, region, e);
                    return Err(e.into());
                }
                Err(e) => {
                    tracing::error!("Error querying {} database for {}: {}", kind, region, e);
                    failed.push(region);
                }
            }
        }

        tracing::info!(
            "Record not found in any of {:?} after {} ms",
            self.regions,
            started.elapsed().as_millis()
        );
        if failed.is_empty() {
            Ok(None)
        } else {
            Err(LookupError::RegionsUnavailable(failed))
        }
    }

    /// Single-region point lookup
    pub async fn fetch_in(&self, region: Region, kind: DbKind, query: &LookupQuery) -> Result<Option<Row>, LookupError> {
        Ok(self.store.fetch_one(region, kind, query).await?)
    }

    pub async fn fetch_all_in(&self, region: Region, kind: DbKind, query: &LookupQuery) -> Result<Vec<Row>, LookupError> {
        Ok(self.store.fetch_all(region, kind, query).await?)
    }

    /// Look in `region` when known, otherwise fan out
    pub async fn resolve_one(
        &self,
        region: Option<Region>,
        kind: DbKind,
        query: &LookupQuery,
    ) -> Result<Option<Located<Row>>, LookupError> {
        match region {
            Some(region) => Ok(self
                .fetch_in(region, kind, query)
                .await?
                .map(|row| Located::new(region, row))),
            None => self.find_first(kind, query).await,
        }
    }

    /// Ids of every environment (vendor) of an account
    pub async fn environment_ids_by_account_id(&self, account_id: &str, region: Region) -> Result<Vec<String>, LookupError> {
        let rows = self
            .fetch_all_in(region, DbKind::General, &queries::vendors_by_account_id(account_id))
            .await?;
        Ok(rows.iter().filter_map(|row| row.string("id")).collect())
    }

    /// Which region holds a vendor or tenant; the matching row tagged with
    /// its region
    pub async fn check_customer_region(&self, id_type: IdType, id: &str) -> Result<Option<Row>, LookupError> {
        let query = match id_type {
            IdType::Vendor => queries::vendor_by_id(id),
            IdType::Tenant => queries::tenant_by_id(id),
        };
        Ok(self
            .find_first(DbKind::General, &query)
            .await?
            .map(Located::into_tagged_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use serde_json::json;

    const VENDOR: &str = "d058e199-6ed3-4049-8034-447bbd5004e9";

    #[tokio::test]
    async fn stops_at_first_region_with_a_hit() {
        let store = MemoryStore::new()
            .with_row(Region::Us, DbKind::General, queries::vendor_by_id(VENDOR), json!({"id": VENDOR, "accountId": "acc-us"}))
            .with_row(Region::Ca, DbKind::General, queries::vendor_by_id(VENDOR), json!({"id": VENDOR, "accountId": "acc-ca"}));
        let store = Arc::new(store);
        let resolver = RegionResolver::new(store.clone(), vec![Region::Eu, Region::Us, Region::Ca]);

        let found = resolver
            .find_first(DbKind::General, &queries::vendor_by_id(VENDOR))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.region, Region::Us);
        assert_eq!(found.value["accountId"], "acc-us");
        assert_eq!(store.calls(), vec![(Region::Eu, DbKind::General), (Region::Us, DbKind::General)]);
    }

    #[tokio::test]
    async fn skips_failing_regions() {
        let store = MemoryStore::new()
            .failing(Region::Eu)
            .with_row(Region::Us, DbKind::General, queries::vendor_by_id(VENDOR), json!({"id": VENDOR}));
        let resolver = RegionResolver::new(Arc::new(store), vec![Region::Eu, Region::Us]);

        let found = resolver
            .find_first(DbKind::General, &queries::vendor_by_id(VENDOR))
            .await
            .unwrap();
        assert_eq!(found.map(|l| l.region), Some(Region::Us));
    }

    #[tokio::test]
    async fn not_found_everywhere_is_none() {
        let resolver = RegionResolver::new(Arc::new(MemoryStore::new()), vec![Region::Eu, Region::Us]);
        let found = resolver
            .find_first(DbKind::General, &queries::vendor_by_id(VENDOR))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn failures_without_a_hit_are_reported() {
        let store = MemoryStore::new().failing(Region::Us);
        let resolver = RegionResolver::new(Arc::new(store), vec![Region::Eu, Region::Us]);

        match resolver.find_first(DbKind::General, &queries::vendor_by_id(VENDOR)).await {
            Err(LookupError::RegionsUnavailable(regions)) => assert_eq!(regions, vec![Region::Us]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_credentials_stop_the_walk() {
        let store = Arc::new(MemoryStore::new().unconfigured(Region::Eu, "HOST_GENERAL_EU").with_row(
            Region::Us,
            DbKind::General,
            queries::vendor_by_id(VENDOR),
            json!({"id": VENDOR}),
        ));
        let resolver = RegionResolver::new(store.clone(), vec![Region::Eu, Region::Us]);

        match resolver.find_first(DbKind::General, &queries::vendor_by_id(VENDOR)).await {
            Err(LookupError::Database(DatabaseError::ConfigMissing(key))) => assert_eq!(key, "HOST_GENERAL_EU"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(store.calls(), vec![(Region::Eu, DbKind::General)]);
    }

    #[tokio::test]
    async fn lists_environment_ids_of_an_account() {
        let store = MemoryStore::new()
            .with_row(Region::Ca, DbKind::General, queries::vendors_by_account_id("acc-1"), json!({"id": VENDOR}))
            .with_row(Region::Ca, DbKind::General, queries::vendors_by_account_id("acc-1"), json!({"id": null}))
            .with_row(Region::Ca, DbKind::General, queries::vendors_by_account_id("acc-1"), json!({"id": "env-2"}));
        let resolver = RegionResolver::new(Arc::new(store), vec![Region::Eu]);

        let ids = resolver.environment_ids_by_account_id("acc-1", Region::Ca).await.unwrap();
        assert_eq!(ids, vec![VENDOR, "env-2"]);
    }

    #[tokio::test]
    async fn explicit_region_does_not_fan_out() {
        let store = Arc::new(MemoryStore::new().with_row(
            Region::Eu,
            DbKind::General,
            queries::vendor_by_id(VENDOR),
            json!({"id": VENDOR}),
        ));
        let resolver = RegionResolver::new(store.clone(), vec![Region::Eu, Region::Us]);

        let found = resolver
            .resolve_one(Some(Region::Us), DbKind::General, &queries::vendor_by_id(VENDOR))
            .await
            .unwrap();
        assert!(found.is_none());
        assert_eq!(store.calls(), vec![(Region::Us, DbKind::General)]);
    }

    #[tokio::test]
    async fn tags_rows_with_region_first() {
        let tenant = "eb399604-647b-4a8a-9098-12185cef964d";
        let store = MemoryStore::new().with_row(
            Region::Us,
            DbKind::General,
            queries::tenant_by_id(tenant),
            json!({"accountId": tenant, "vendorId": VENDOR, "name": "Acme"}),
        );
        let resolver = RegionResolver::new(Arc::new(store), vec![Region::Eu, Region::Us]);

        let row = resolver
            .check_customer_region(IdType::Tenant, tenant)
            .await
            .unwrap()
            .unwrap();
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["region", "accountId", "vendorId", "name"]);
        assert_eq!(row["region"], "US");
    }
}
