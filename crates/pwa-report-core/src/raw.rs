//! Raw audit payload as produced by the audit tool.
//!
//! Entries are kept untyped; readers decode leniently and treat any
//! unexpected shape as absence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The PWA checks this crate extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckId {
    IsOnHttps,
    InstallableManifest,
    ServiceWorker,
    MaskableIcon,
    SplashScreen,
    ThemedOmnibox,
    Viewport,
}

impl CheckId {
    pub const ALL: [CheckId; 7] = [
        CheckId::ServiceWorker,
        CheckId::InstallableManifest,
        CheckId::IsOnHttps,
        CheckId::MaskableIcon,
        CheckId::SplashScreen,
        CheckId::ThemedOmnibox,
        CheckId::Viewport,
    ];

    /// Key of the check in the audit tool's output.
    pub fn key(self) -> &'static str {
        match self {
            CheckId::IsOnHttps => "is-on-https",
            CheckId::InstallableManifest => "installable-manifest",
            CheckId::ServiceWorker => "service-worker",
            CheckId::MaskableIcon => "maskable-icon",
            CheckId::SplashScreen => "splash-screen",
            CheckId::ThemedOmnibox => "themed-omnibox",
            CheckId::Viewport => "viewport",
        }
    }
}

/// Check-specific detail fields, decoded from the untyped `details` object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckDetails {
    InstallableManifest {
        manifest_url: Option<String>,
    },
    ServiceWorker {
        script_url: Option<String>,
        scope_url: Option<String>,
    },
    /// Checks without extra detail fields, or details that could not be read.
    #[default]
    Opaque,
}

/// Mapping from check key to check result, one per request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAuditSet {
    entries: BTreeMap<String, Value>,
}

impl RawAuditSet {
    pub fn new(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }

    /// Pull the `audits` object out of a full audit tool result.
    ///
    /// Returns `None` when there is no `audits` object at all; an empty
    /// object is a valid (if unhelpful) audit set.
    pub fn from_lighthouse_result(result: &Value) -> Option<Self> {
        let audits = result.get("audits")?.as_object()?;
        Some(Self {
            entries: audits
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: Value) {
        self.entries.insert(key.into(), entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, id: CheckId) -> Option<&Value> {
        self.entries.get(id.key()).filter(|v| v.is_object())
    }

    /// Score of a check, coerced by truthiness. Absent or malformed entries
    /// score `false`.
    pub fn score(&self, id: CheckId) -> bool {
        self.entry(id)
            .and_then(|e| e.get("score"))
            .is_some_and(is_truthy)
    }

    /// Detail fields of a check.
    pub fn details(&self, id: CheckId) -> CheckDetails {
        let details = self.entry(id).and_then(|e| e.get("details"));
        match id {
            CheckId::InstallableManifest => CheckDetails::InstallableManifest {
                manifest_url: details
                    .and_then(|d| d.get("debugData"))
                    .and_then(|d| non_empty_str(d.get("manifestUrl"))),
            },
            CheckId::ServiceWorker => CheckDetails::ServiceWorker {
                script_url: details.and_then(|d| non_empty_str(d.get("scriptUrl"))),
                scope_url: details.and_then(|d| non_empty_str(d.get("scopeUrl"))),
            },
            _ => CheckDetails::Opaque,
        }
    }
}

/// Truthiness as the audit tool's consumers have always applied it: `null`,
/// `false`, `0` and `""` are false; every other value, including any
/// non-empty string, array or object, is true.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_lenient_coercion() {
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(0.5)));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("true")));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!({})));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn from_lighthouse_result_requires_audits_object() {
        assert!(RawAuditSet::from_lighthouse_result(&json!({})).is_none());
        assert!(RawAuditSet::from_lighthouse_result(&json!({"audits": null})).is_none());
        assert!(RawAuditSet::from_lighthouse_result(&json!({"audits": [1]})).is_none());

        let empty = RawAuditSet::from_lighthouse_result(&json!({"audits": {}})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn malformed_entry_reads_as_absent() {
        let mut raw = RawAuditSet::default();
        raw.insert("viewport", json!("passed"));
        raw.insert("service-worker", json!({"score": 1, "details": "nope"}));

        assert!(!raw.score(CheckId::Viewport));
        assert!(raw.score(CheckId::ServiceWorker));
        assert_eq!(
            raw.details(CheckId::ServiceWorker),
            CheckDetails::ServiceWorker {
                script_url: None,
                scope_url: None
            }
        );
    }

    #[test]
    fn empty_or_non_string_urls_are_dropped() {
        let mut raw = RawAuditSet::default();
        raw.insert(
            "installable-manifest",
            json!({"score": 0, "details": {"debugData": {"manifestUrl": ""}}}),
        );
        raw.insert(
            "service-worker",
            json!({"details": {"scriptUrl": 42, "scopeUrl": "https://x/"}}),
        );

        assert_eq!(
            raw.details(CheckId::InstallableManifest),
            CheckDetails::InstallableManifest { manifest_url: None }
        );
        assert_eq!(
            raw.details(CheckId::ServiceWorker),
            CheckDetails::ServiceWorker {
                script_url: None,
                scope_url: Some("https://x/".into())
            }
        );
        assert_eq!(raw.details(CheckId::Viewport), CheckDetails::Opaque);
    }
}
