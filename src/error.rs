use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} failed with status {status}: {detail}")]
    Status {
        operation: &'static str,
        status: u16,
        detail: String,
    },

    #[error("malformed {operation} response: {source}")]
    Malformed {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected {operation} reply")]
    UnexpectedReply { operation: &'static str },

    #[error("invalid endpoint URL: {0}")]
    Url(String),

    #[error("store error: {0}")]
    Store(#[source] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid confirmation code: {0}")]
    InvalidCode(String),
}
