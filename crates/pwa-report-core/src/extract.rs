//! Check extraction: raw audit payload to [`ExtractedAudits`].

use crate::raw::{CheckDetails, CheckId, RawAuditSet};
use crate::types::{
    ExtractedAudits, ManifestCheck, ManifestCheckDetails, ScoredCheck, ServiceWorkerCheck,
    ServiceWorkerCheckDetails,
};

/// Pull the PWA checks out of a raw audit set.
///
/// Never fails: a missing or malformed check scores `false` and carries no
/// detail fields. Service-worker features are left empty; they are filled in
/// by [`crate::assemble`] after enrichment.
pub fn extract(raw: &RawAuditSet) -> ExtractedAudits {
    let scored = |id| ScoredCheck {
        score: raw.score(id),
    };

    let manifest_url = match raw.details(CheckId::InstallableManifest) {
        CheckDetails::InstallableManifest { manifest_url } => manifest_url,
        _ => None,
    };

    let (script_url, scope_url) = match raw.details(CheckId::ServiceWorker) {
        CheckDetails::ServiceWorker {
            script_url,
            scope_url,
        } => (script_url, scope_url),
        _ => (None, None),
    };

    ExtractedAudits {
        is_on_https: scored(CheckId::IsOnHttps),
        installable_manifest: ManifestCheck {
            score: raw.score(CheckId::InstallableManifest),
            details: ManifestCheckDetails { url: manifest_url },
        },
        service_worker: ServiceWorkerCheck {
            score: raw.score(CheckId::ServiceWorker),
            details: ServiceWorkerCheckDetails {
                url: script_url,
                scope: scope_url,
                features: None,
            },
        },
        maskable_icon: scored(CheckId::MaskableIcon),
        splash_screen: scored(CheckId::SplashScreen),
        themed_omnibox: scored(CheckId::ThemedOmnibox),
        viewport: scored(CheckId::Viewport),
    }
}
