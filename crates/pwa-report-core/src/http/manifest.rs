//! Web app manifest fetcher.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::collaborators::ManifestFetcher;
use crate::error::{FetchError, FetchResult};
use crate::types::ManifestDocument;

use super::{build_client, get_text, resolve_url};

/// Fetches a web app manifest over HTTP and parses it as a JSON object.
#[derive(Debug, Clone)]
pub struct HttpManifestFetcher {
    client: reqwest::Client,
}

impl HttpManifestFetcher {
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManifestFetcher for HttpManifestFetcher {
    async fn fetch(&self, manifest_url: &str, page_url: &str) -> FetchResult<ManifestDocument> {
        let url = resolve_url(manifest_url, Some(page_url))?;
        let raw = get_text(&self.client, &url).await?;

        // Tolerate a leading byte-order mark.
        let body = raw.trim_start_matches('\u{feff}');
        if body.trim().is_empty() {
            return Err(FetchError::Empty {
                url: url.to_string(),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(body).map_err(|e| FetchError::Parse {
                message: format!("manifest {url} is not valid JSON: {e}"),
            })?;
        if !json.is_object() {
            return Err(FetchError::Parse {
                message: format!("manifest {url} is not a JSON object"),
            });
        }

        debug!(url = %url, bytes = raw.len(), "manifest fetched");
        Ok(ManifestDocument { raw, json })
    }
}
