use std::sync::Arc;

use crate::clients::{ClientError, TicketingClient, VendorApiClient};
use crate::config::AppConfig;
use crate::database::RegionStore;
use crate::services::{AccountService, AdminService, RegionResolver};

/// Everything a request handler needs, built once at startup
pub struct AppContext {
    pub config: AppConfig,
    pub resolver: Arc<RegionResolver>,
    pub accounts: AccountService,
    pub admin: AdminService,
}

pub type SharedContext = Arc<AppContext>;

impl AppContext {
    pub fn new(config: AppConfig, store: Arc<dyn RegionStore>) -> Result<Self, ClientError> {
        let resolver = Arc::new(RegionResolver::new(store, config.regions.clone()));
        let ticketing = TicketingClient::new(config.ticketing.clone())?;
        let vendor_api = VendorApiClient::new(config.vendor_api.clone())?;

        Ok(Self {
            accounts: AccountService::new(resolver.clone(), config.identity.clone(), ticketing),
            admin: AdminService::new(resolver.clone(), vendor_api),
            resolver,
            config,
        })
    }

    pub fn shared(self) -> SharedContext {
        Arc::new(self)
    }
}
