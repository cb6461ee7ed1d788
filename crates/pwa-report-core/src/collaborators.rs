//! Collaborator seams: the audit tool and the two enrichment fetchers.

use async_trait::async_trait;

use crate::error::{AuditResult, FetchResult};
use crate::raw::RawAuditSet;
use crate::types::{ManifestDocument, ServiceWorkerAnalysis};

/// Runs the page audit.
#[async_trait]
pub trait AuditInvoker: Send + Sync {
    /// Audit `url` with the mobile form factor, or desktop when `desktop` is set.
    async fn invoke(&self, url: &str, desktop: bool) -> AuditResult<RawAuditSet>;

    /// Name recorded on the request span.
    fn invoker_name(&self) -> &'static str {
        "custom"
    }
}

/// Downloads and classifies a service-worker script.
#[async_trait]
pub trait ServiceWorkerAnalyzer: Send + Sync {
    async fn analyze(&self, script_url: &str) -> FetchResult<ServiceWorkerAnalysis>;
}

/// Downloads and parses a web app manifest linked from `page_url`.
#[async_trait]
pub trait ManifestFetcher: Send + Sync {
    async fn fetch(&self, manifest_url: &str, page_url: &str) -> FetchResult<ManifestDocument>;
}
