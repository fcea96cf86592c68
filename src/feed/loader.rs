//! Loads the forecast feed, either from a snapshot file on disk or live from
//! the CWA open-data endpoint.
//!
//! Both variants produce the same typed [`FeedDocument`]; neither performs
//! any flattening. Decoding is a two-step affair so the two failure modes
//! stay distinguishable: the raw text must parse as JSON at all
//! ([`FeedError::Decode`]), and the resulting tree must match the fixed
//! forecast shape ([`FeedError::Schema`]).

use crate::feed::error::FeedError;
use crate::feed::schema::FeedDocument;
use log::{info, warn};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

/// The CWA open-data endpoint for the weekly agricultural forecast.
pub const FEED_URL: &str = "https://opendata.cwa.gov.tw/fileapi/v1/opendataapi/F-A0010-001";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches and decodes the forecast feed.
pub struct FeedLoader {
    client: Client,
}

impl FeedLoader {
    /// Creates a loader with a request timeout configured, so a stalled
    /// endpoint surfaces as an error instead of blocking the run forever.
    pub fn new() -> Result<FeedLoader, FeedError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FeedError::ClientBuild)?;
        Ok(FeedLoader { client })
    }

    /// Reads and decodes a pre-downloaded feed snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::FileNotFound`] if `path` does not exist,
    /// [`FeedError::FileRead`] on an I/O failure, and [`FeedError::Decode`] /
    /// [`FeedError::Schema`] if the contents are not a well-formed feed.
    pub fn from_file(path: &Path) -> Result<FeedDocument, FeedError> {
        if !path.exists() {
            return Err(FeedError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| FeedError::FileRead(path.to_path_buf(), e))?;
        info!("Read feed snapshot from {:?} ({} bytes)", path, text.len());
        Self::decode(&text)
    }

    /// Fetches the live feed from `url` with the given authorization key.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NetworkRequest`] if the request itself fails,
    /// [`FeedError::HttpStatus`] on a non-success status code, and
    /// [`FeedError::Decode`] / [`FeedError::Schema`] if the body is not a
    /// well-formed feed.
    pub async fn fetch(&self, url: &str, api_key: &str) -> Result<FeedDocument, FeedError> {
        info!("Downloading forecast feed from {}", url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("Authorization", api_key),
                ("downloadType", "WEB"),
                ("format", "JSON"),
            ])
            .send()
            .await
            .map_err(|e| FeedError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FeedError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FeedError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let text = response
            .text()
            .await
            .map_err(|e| FeedError::NetworkRequest(url.to_string(), e))?;
        info!("Downloaded {} bytes of feed data", text.len());
        Self::decode(&text)
    }

    /// Decodes feed text in two steps: JSON syntax first, forecast shape
    /// second.
    fn decode(text: &str) -> Result<FeedDocument, FeedError> {
        let tree: serde_json::Value = serde_json::from_str(text).map_err(FeedError::Decode)?;
        serde_json::from_value(tree).map_err(FeedError::Schema)
    }
}
