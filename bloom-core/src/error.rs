//! Error type shared by the wall and preview modules.
//!
//! Placement itself never fails; errors come from decoding input, invalid
//! configuration, and manifest I/O.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WallError {
    #[error("invalid input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    #[error("invalid config: {msg}")]
    InvalidConfig { msg: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no preview manifest at {path}; run a full preview pass first")]
    MissingManifest { path: PathBuf },

    #[error("malformed preview manifest: {0}")]
    Manifest(#[source] serde_json::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),
}

pub type Result<T> = std::result::Result<T, WallError>;
