use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read registry snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse registry snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid registry snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid metadata payload '{value}': {reason}")]
    InvalidPayload { value: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
