use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SorterError {
    #[error("failed to list folder {path}: {source}")]
    ListFolder {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create folder {path}: {source}")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open image {path}: {source}")]
    OpenImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write config {path}: {source}")]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode config: {0}")]
    EncodeConfig(#[from] serde_json::Error),
    #[error("no target folder selected")]
    NoTargetFolder,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
