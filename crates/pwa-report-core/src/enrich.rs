//! Concurrent enrichment of the service worker and the web app manifest.
//!
//! Each branch runs as its own task and settles into a [`BranchOutcome`];
//! the enricher waits for both, so one branch failing (or panicking) never
//! cancels or hides the other.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::collaborators::{ManifestFetcher, ServiceWorkerAnalyzer};
use crate::error::{FetchError, FetchResult};
use crate::types::{ExtractedAudits, ManifestDocument, ServiceWorkerAnalysis};

/// Terminal state of one enrichment branch.
#[derive(Debug, Clone, PartialEq)]
pub enum BranchOutcome<T> {
    Succeeded(T),
    Failed(FetchError),
}

impl<T> BranchOutcome<T> {
    pub fn succeeded(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(e) => Some(e),
        }
    }
}

/// Results of both branches. `None` means the branch was not applicable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Enrichment {
    pub service_worker: Option<BranchOutcome<ServiceWorkerAnalysis>>,
    pub manifest: Option<BranchOutcome<ManifestDocument>>,
}

#[derive(Clone)]
pub struct ConcurrentEnricher {
    analyzer: Arc<dyn ServiceWorkerAnalyzer>,
    fetcher: Arc<dyn ManifestFetcher>,
}

impl ConcurrentEnricher {
    pub fn new(analyzer: Arc<dyn ServiceWorkerAnalyzer>, fetcher: Arc<dyn ManifestFetcher>) -> Self {
        Self { analyzer, fetcher }
    }

    /// Run the applicable branches concurrently and wait for all of them.
    ///
    /// The service-worker branch runs iff a script URL was reported, the
    /// manifest branch iff a manifest URL was reported. Never fails.
    pub async fn enrich(&self, audits: &ExtractedAudits, page_url: &str) -> Enrichment {
        let sw_task = audits.service_worker_url().map(|script_url| {
            let analyzer = Arc::clone(&self.analyzer);
            let script_url = script_url.to_string();
            tokio::spawn(async move { analyzer.analyze(&script_url).await })
        });

        let manifest_task = audits.manifest_url().map(|manifest_url| {
            let fetcher = Arc::clone(&self.fetcher);
            let manifest_url = manifest_url.to_string();
            let page_url = page_url.to_string();
            tokio::spawn(async move { fetcher.fetch(&manifest_url, &page_url).await })
        });

        if sw_task.is_none() && manifest_task.is_none() {
            debug!("no service worker or manifest reported, skipping enrichment");
            return Enrichment::default();
        }

        let (service_worker, manifest) = tokio::join!(
            settle(sw_task, "service-worker"),
            settle(manifest_task, "manifest")
        );

        Enrichment {
            service_worker,
            manifest,
        }
    }
}

async fn settle<T>(
    task: Option<JoinHandle<FetchResult<T>>>,
    branch: &'static str,
) -> Option<BranchOutcome<T>> {
    let outcome = match task?.await {
        Ok(Ok(value)) => BranchOutcome::Succeeded(value),
        Ok(Err(e)) => BranchOutcome::Failed(e),
        Err(join) => BranchOutcome::Failed(FetchError::Panicked {
            message: join.to_string(),
        }),
    };

    match &outcome {
        BranchOutcome::Succeeded(_) => debug!(branch, "enrichment succeeded"),
        BranchOutcome::Failed(e) => warn!(branch, error = %e, "enrichment failed"),
    }

    Some(outcome)
}
