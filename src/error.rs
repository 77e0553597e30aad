use std::path::PathBuf;

use thiserror::Error;

use crate::label::LabelId;

/// Errors returned by [`crate::store::LabelStore`] mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("label {0} already exists")]
    DuplicateId(LabelId),
    #[error("no label with id {0}")]
    NotFound(LabelId),
}

/// Errors that can occur while accepting an uploaded image
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{0} is not an image file")]
    NotAnImage(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("{0} has no readable content")]
    Empty(String),
}

/// Errors that can occur while exporting the labeled image
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("there is no image to export")]
    MissingViewport,
    #[error("an export is already in progress")]
    Busy,
    #[error("rasterization failed: {0}")]
    Rasterize(String),
    #[error("the rasterizer dropped the request")]
    Cancelled,
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
