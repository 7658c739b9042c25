use thiserror::Error;

/// Errors from the outbound vendor-management and ticketing clients
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{service} returned {status}: {body}")]
    UnexpectedStatus {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} response is missing '{field}'")]
    MalformedResponse {
        service: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
