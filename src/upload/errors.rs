use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("failed to read image file {path}: {source}")]
    ReadImage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize metadata document: {0}")]
    SerializeFailed(#[from] serde_json::Error),

    #[error("storage request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("storage rejected upload of {file_name} with status {status}: {body}")]
    Rejected {
        file_name: String,
        status: u16,
        body: String,
    },

    #[error("storage returned an empty locator for {0}")]
    EmptyLocator(String),

    #[error("metadata locator {0} is longer than {1} bytes")]
    LocatorTooLong(String, usize),
}
