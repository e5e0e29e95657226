use thiserror::Error;

/// Failure talking to the donation backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid endpoint: {0}")]
    Url(String),

    #[error("invalid proof file: {0}")]
    InvalidProof(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid backend URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("backend URL {0:?} cannot carry path segments")]
    OpaqueUrl(String),
}
