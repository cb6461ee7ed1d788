//! Report shapes and collaborator payloads.
//!
//! Everything here serializes to the camelCase JSON the response layer
//! hands out. Optional fields are omitted rather than written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A check that only carries a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoredCheck {
    pub score: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManifestCheckDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManifestCheck {
    pub score: bool,
    #[serde(default)]
    pub details: ManifestCheckDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceWorkerCheckDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Set only when the service-worker analysis succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<ServiceWorkerFeatures>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceWorkerCheck {
    pub score: bool,
    #[serde(default)]
    pub details: ServiceWorkerCheckDetails,
}

/// One entry per PWA check. Every field is always present; a missing raw
/// check reads as a failed one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedAudits {
    pub is_on_https: ScoredCheck,
    pub installable_manifest: ManifestCheck,
    pub service_worker: ServiceWorkerCheck,
    pub maskable_icon: ScoredCheck,
    pub splash_screen: ScoredCheck,
    pub themed_omnibox: ScoredCheck,
    pub viewport: ScoredCheck,
}

impl ExtractedAudits {
    /// Manifest URL reported by the installability check.
    pub fn manifest_url(&self) -> Option<&str> {
        self.installable_manifest.details.url.as_deref()
    }

    /// Script URL reported by the service-worker check.
    pub fn service_worker_url(&self) -> Option<&str> {
        self.service_worker.details.url.as_deref()
    }
}

/// Statically detected service-worker capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWorkerFeatures {
    pub detected_background_sync: bool,
    pub detected_periodic_background_sync: bool,
    pub detected_push_registration: bool,
    pub detected_signs_of_logic: bool,
    pub detected_empty: bool,
}

/// Successful service-worker analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceWorkerAnalysis {
    pub features: ServiceWorkerFeatures,
    /// Script source, primary script first.
    pub raw: Vec<String>,
}

/// Successfully fetched manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    pub raw: String,
    pub json: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebAppManifestArtifact {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWorkerArtifact {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_app_manifest: Option<WebAppManifestArtifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_worker: Option<ServiceWorkerArtifact>,
}

/// Final PWA report for one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Report {
    pub audits: ExtractedAudits,
    pub artifacts: Artifacts,
}
