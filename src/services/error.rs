use thiserror::Error;

use crate::clients::ClientError;
use crate::database::DatabaseError;
use crate::types::Region;

/// Errors surfaced by the lookup and mutation services
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} was not found")]
    NotFound(String),

    /// Nothing was found and at least one region could not be searched
    #[error("lookup incomplete, regions unavailable: {0:?}")]
    RegionsUnavailable(Vec<Region>),

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl LookupError {
    pub fn not_found(what: impl Into<String>) -> Self {
        LookupError::NotFound(what.into())
    }
}
