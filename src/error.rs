use thiserror::Error;

use crate::client::ClientError;

/// Failures surfaced by the backend while initializing or loading translations.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Contentful backend attempted to load translations but the client hasn't been initialized yet")]
    UninitializedClient,

    #[error(
        "Could not find key field '{accessor}' in the response from Contentful. The fields we found were: {}",
        .found.join(", ")
    )]
    MissingKeyField { accessor: String, found: Vec<String> },

    #[error(
        "Could not find value field '{accessor}' in the response from Contentful. The fields we found were: {}",
        .found.join(", ")
    )]
    MissingValueField { accessor: String, found: Vec<String> },

    #[error("Failed to construct Contentful client: {0}")]
    ClientConstruction(#[source] ClientError),

    /// The content API call itself failed; displayed exactly as the client reported it.
    #[error(transparent)]
    Upstream(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, BackendError>;
