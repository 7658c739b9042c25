pub mod error;
pub mod ticketing;
pub mod vendor_api;

pub use error::ClientError;
pub use ticketing::{TicketEmails, TicketUser, TicketingClient};
pub use vendor_api::{PutOutcome, VendorApiClient, VendorToken};

/// Join a configured base URL and an absolute path, keeping any path prefix
/// on the base
pub(crate) fn endpoint(base: &str, path: &str) -> Result<url::Url, ClientError> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    url::Url::parse(&raw).map_err(|_| ClientError::InvalidUrl(raw))
}
