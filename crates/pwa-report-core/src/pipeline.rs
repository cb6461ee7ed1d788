//! Request pipeline: audit, extract, enrich, assemble.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::classify::{classify, FailureClass, ReportResponse};
use crate::collaborators::{AuditInvoker, ManifestFetcher, ServiceWorkerAnalyzer};
use crate::config::ReportConfig;
use crate::enrich::ConcurrentEnricher;
use crate::error::{AuditResult, FetchResult};
use crate::extract::extract;
use crate::http::{HttpManifestFetcher, HttpServiceWorkerAnalyzer};
use crate::lighthouse::LighthouseInvoker;
use crate::report::assemble;
use crate::types::Report;

/// One report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub site: String,
    pub desktop: bool,
}

impl ReportRequest {
    pub fn new(site: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            desktop: false,
        }
    }

    pub fn with_desktop(mut self, desktop: bool) -> Self {
        self.desktop = desktop;
        self
    }
}

/// Response envelope plus the operational signals around it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub response: ReportResponse,
    /// Transport status chosen for `response`.
    pub status: u16,
    /// Set on failure only.
    pub failure: Option<FailureClass>,
    pub elapsed: Duration,
}

#[derive(Clone)]
pub struct ReportService {
    invoker: Arc<dyn AuditInvoker>,
    enricher: ConcurrentEnricher,
}

impl ReportService {
    pub fn new(
        invoker: Arc<dyn AuditInvoker>,
        analyzer: Arc<dyn ServiceWorkerAnalyzer>,
        fetcher: Arc<dyn ManifestFetcher>,
    ) -> Self {
        Self {
            invoker,
            enricher: ConcurrentEnricher::new(analyzer, fetcher),
        }
    }

    /// Wire the Lighthouse invoker and the HTTP collaborators.
    pub fn from_config(config: &ReportConfig) -> FetchResult<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);
        Ok(Self::new(
            Arc::new(LighthouseInvoker::new(config)),
            Arc::new(HttpServiceWorkerAnalyzer::new(
                timeout,
                config.max_imported_scripts,
            )?),
            Arc::new(HttpManifestFetcher::new(timeout)?),
        ))
    }

    /// Produce the report for `url`.
    ///
    /// Only the audit invocation can fail; enrichment failures end up as
    /// absent fields in the report.
    pub async fn run(&self, url: &str, desktop: bool) -> AuditResult<Report> {
        let raw = self.invoker.invoke(url, desktop).await?;
        let audits = extract(&raw);
        let enrichment = self.enricher.enrich(&audits, url).await;
        Ok(assemble(audits, enrichment))
    }

    /// Run one request and wrap the result for the response layer.
    pub async fn handle(&self, request: &ReportRequest) -> ReportOutcome {
        let span = info_span!(
            "report",
            request_id = %Uuid::new_v4(),
            site = %request.site,
            invoker = self.invoker.invoker_name()
        );
        self.handle_inner(request).instrument(span).await
    }

    async fn handle_inner(&self, request: &ReportRequest) -> ReportOutcome {
        let url = request.site.as_str();
        info!("Report: function is processing a request for site: {url}");
        let started = Instant::now();

        let result = self.run(url, request.desktop).await;
        let failure = match &result {
            Ok(_) => {
                info!("Report: function is DONE processing a request for site: {url}");
                None
            }
            Err(e) => {
                let class = classify(e);
                match class {
                    FailureClass::Timeout => {
                        error!("Report: function TIMED OUT processing a request for site: {url}")
                    }
                    FailureClass::Generic => error!(
                        "Report: function failed for {url} with the following error: {e}"
                    ),
                }
                Some(class)
            }
        };

        let response = ReportResponse::from_result(result);
        ReportOutcome {
            status: response.status(),
            response,
            failure,
            elapsed: started.elapsed(),
        }
    }
}
