//! Report assembly: extracted checks plus enrichment results.

use crate::enrich::{BranchOutcome, Enrichment};
use crate::types::{
    Artifacts, ExtractedAudits, Report, ServiceWorkerArtifact, WebAppManifestArtifact,
};

/// Merge extracted checks and enrichment results into the final report.
///
/// Artifact presence follows the URLs reported by the audit, not branch
/// outcomes: a reported URL always yields an artifact carrying at least the
/// URL, an unreported one yields no artifact at all. Raw script text only
/// ever lands in `artifacts.serviceWorker.raw`.
pub fn assemble(mut audits: ExtractedAudits, enrichment: Enrichment) -> Report {
    let analysis = enrichment
        .service_worker
        .and_then(|outcome| match outcome {
            BranchOutcome::Succeeded(analysis) => Some(analysis),
            BranchOutcome::Failed(_) => None,
        });
    let manifest = enrichment
        .manifest
        .and_then(|outcome| match outcome {
            BranchOutcome::Succeeded(document) => Some(document),
            BranchOutcome::Failed(_) => None,
        });

    let service_worker = audits.service_worker_url().map(|url| ServiceWorkerArtifact {
        url: url.to_string(),
        raw: analysis.as_ref().map(|a| a.raw.clone()),
    });
    audits.service_worker.details.features = analysis.map(|a| a.features);

    let web_app_manifest = audits.manifest_url().map(|url| {
        let (raw, json) = match manifest {
            Some(document) => (Some(document.raw), Some(document.json)),
            None => (None, None),
        };
        WebAppManifestArtifact {
            url: url.to_string(),
            raw,
            json,
        }
    });

    Report {
        audits,
        artifacts: Artifacts {
            web_app_manifest,
            service_worker,
        },
    }
}
