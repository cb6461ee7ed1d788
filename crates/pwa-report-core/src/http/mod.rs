//! HTTP enrichment collaborators.
//!
//! Status handling lives in [`get_text`]; the fetchers never look at status
//! codes themselves.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;
use url::Url;

use crate::error::{FetchError, FetchResult};

mod manifest;
mod service_worker;

pub use manifest::HttpManifestFetcher;
pub use service_worker::{classify_script, HttpServiceWorkerAnalyzer};

const USER_AGENT_VALUE: &str = concat!("pwa-report/", env!("CARGO_PKG_VERSION"));

pub(crate) fn build_client(timeout: Duration) -> FetchResult<reqwest::Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(default_headers)
        .build()
        .map_err(|e| FetchError::Network {
            message: format!("failed to create HTTP client: {}", e),
        })
}

/// Resolve `reference` against `base`; absolute references ignore the base.
pub(crate) fn resolve_url(reference: &str, base: Option<&str>) -> FetchResult<Url> {
    let invalid = |message: String| FetchError::InvalidUrl {
        url: reference.to_string(),
        message,
    };

    match Url::parse(reference) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base.ok_or_else(|| invalid("relative url without base".into()))?;
            let base = Url::parse(base).map_err(|e| invalid(format!("bad base {base}: {e}")))?;
            base.join(reference).map_err(|e| invalid(e.to_string()))
        }
        Err(e) => Err(invalid(e.to_string())),
    }
}

/// GET `url` and return the body of a 2xx response.
pub(crate) async fn get_text(client: &reqwest::Client, url: &Url) -> FetchResult<String> {
    debug!(url = %url, "fetching");
    let response = client.get(url.clone()).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    response.text().await.map_err(|e| FetchError::Network {
        message: format!("failed to read response body: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_absolute_ignores_base() {
        let url = resolve_url("https://cdn.x/m.json", Some("https://x/app/")).unwrap();
        assert_eq!(url.as_str(), "https://cdn.x/m.json");
    }

    #[test]
    fn resolve_relative_against_base() {
        let url = resolve_url("manifest.json", Some("https://x/app/index.html")).unwrap();
        assert_eq!(url.as_str(), "https://x/app/manifest.json");

        let url = resolve_url("/m.json", Some("https://x/app/")).unwrap();
        assert_eq!(url.as_str(), "https://x/m.json");
    }

    #[test]
    fn resolve_relative_without_base_fails() {
        assert!(matches!(
            resolve_url("manifest.json", None),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            resolve_url("manifest.json", Some("not a url")),
            Err(FetchError::InvalidUrl { .. })
        ));
    }
}
