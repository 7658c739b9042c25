pub mod account;
pub mod sso;
pub mod tenant;
pub mod vendor;

pub use account::{Account, BuilderConfig};
pub use sso::{SamlGroup, SsoConfig};
pub use tenant::Tenant;
pub use vendor::Vendor;
