//! Error types for flowdash-feed

use thiserror::Error;

/// Errors raised while connecting to or decoding the transaction feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid feed endpoint: {url}")]
    InvalidEndpoint { url: String },

    #[error("Failed to decode feed frame: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type with FeedError
pub type FeedResult<T> = Result<T, FeedError>;
