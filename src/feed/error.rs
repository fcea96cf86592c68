use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed file not found: '{0}'")]
    FileNotFound(PathBuf),

    #[error("Failed to read feed file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Feed is not valid JSON")]
    Decode(#[source] serde_json::Error),

    #[error("Feed JSON does not match the expected forecast shape")]
    Schema(#[source] serde_json::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
