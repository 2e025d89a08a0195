use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to get account data: {0}")]
    ClientError(String),

    #[error("failed to decode metadata: {0}")]
    DecodeMetadataFailed(String),
}
