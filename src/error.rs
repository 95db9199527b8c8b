use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed cache store at {}", path.display())]
    CacheStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("spelling service request failed")]
    RemoteUnavailable(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
