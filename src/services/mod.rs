pub mod account_service;
pub mod admin_service;
pub mod error;
pub mod resolver;

pub use account_service::{AccountService, DomainSso, VendorSsoReport};
pub use admin_service::{AdminService, TrialRemoval, TrialTarget, WhiteLabelOutcome};
pub use error::LookupError;
pub use resolver::{Located, RegionResolver};
