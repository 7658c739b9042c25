pub mod manager;
pub mod models;
pub mod queries;
pub mod row;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use queries::LookupQuery;
pub use row::{Row, RowExt};
pub use store::{MySqlRegionStore, RegionStore};
