//! PWA audit report aggregation.
//!
//! This crate turns one raw page audit into a normalized PWA report:
//!
//! - Extraction of the PWA checks from the raw audit payload ([`extract()`])
//! - Concurrent, failure-isolated enrichment of the service worker and the
//!   web app manifest ([`ConcurrentEnricher`])
//! - Assembly of the final [`Report`] ([`assemble()`])
//! - Classification of fatal pipeline failures ([`classify()`])
//!
//! The audit tool, the service-worker analyzer and the manifest fetcher are
//! collaborators behind traits ([`AuditInvoker`], [`ServiceWorkerAnalyzer`],
//! [`ManifestFetcher`]). Default implementations drive the Lighthouse CLI
//! ([`LighthouseInvoker`]) and plain HTTP ([`HttpManifestFetcher`],
//! [`HttpServiceWorkerAnalyzer`]).
//!
//! # Quick Start
//!
//! ```no_run
//! use pwa_report_core::{ReportConfig, ReportRequest, ReportService};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = ReportService::from_config(&ReportConfig::from_env())?;
//! let outcome = service
//!     .handle(&ReportRequest::new("https://example.com"))
//!     .await;
//! println!("{}", serde_json::to_string(&outcome.response)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `PWA_REPORT_LIGHTHOUSE_BIN` | Lighthouse executable (default: `lighthouse`) |
//! | `PWA_REPORT_CHROME_PATH` | Chrome executable passed as `CHROME_PATH` |
//! | `PWA_REPORT_TEMP_DIR` | Temp directory passed as `TEMP` |
//! | `PWA_REPORT_AUDIT_TIMEOUT` | Audit timeout in seconds (default: 180) |
//! | `PWA_REPORT_HTTP_TIMEOUT` | Enrichment request timeout in seconds (default: 30) |
//! | `PWA_REPORT_MAX_IMPORTED_SCRIPTS` | Service-worker imports followed (default: 10) |

pub mod classify;
pub mod collaborators;
pub mod config;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod http;
pub mod lighthouse;
pub mod pipeline;
pub mod raw;
pub mod report;
pub mod types;

// Re-export main types
pub use classify::{classify, FailureClass, ReportResponse, STATUS_FAILURE, STATUS_SUCCESS};
pub use collaborators::{AuditInvoker, ManifestFetcher, ServiceWorkerAnalyzer};
pub use config::ReportConfig;
pub use enrich::{BranchOutcome, ConcurrentEnricher, Enrichment};
pub use error::{AuditError, AuditResult, FetchError, FetchResult};
pub use extract::extract;
pub use http::{HttpManifestFetcher, HttpServiceWorkerAnalyzer};
pub use lighthouse::LighthouseInvoker;
pub use pipeline::{ReportOutcome, ReportRequest, ReportService};
pub use raw::{CheckDetails, CheckId, RawAuditSet};
pub use report::assemble;
pub use types::{
    Artifacts, ExtractedAudits, ManifestCheck, ManifestCheckDetails, ManifestDocument, Report,
    ScoredCheck, ServiceWorkerAnalysis, ServiceWorkerArtifact, ServiceWorkerCheck,
    ServiceWorkerCheckDetails, ServiceWorkerFeatures, WebAppManifestArtifact,
};
