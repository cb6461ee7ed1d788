//! Service-worker fetcher and static feature classifier.

use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::collaborators::ServiceWorkerAnalyzer;
use crate::error::FetchResult;
use crate::types::{ServiceWorkerAnalysis, ServiceWorkerFeatures};

use super::{build_client, get_text, resolve_url};

lazy_static! {
    /// `importScripts(...)` call; group 1 is the argument list.
    static ref IMPORT_SCRIPTS: Regex = Regex::new(r"importScripts\s*\(([^)]*)\)").unwrap();
    /// Single- or double-quoted string literal.
    static ref STRING_LITERAL: Regex = Regex::new(r#"['"]([^'"]+)['"]"#).unwrap();

    static ref BACKGROUND_SYNC: Regex = Regex::new(
        r#"addEventListener\(\s*['"]sync['"]|\bonsync\s*=|\.sync\.register\s*\(|BackgroundSyncPlugin|workbox\.backgroundSync"#
    ).unwrap();
    static ref PERIODIC_SYNC: Regex = Regex::new(
        r#"addEventListener\(\s*['"]periodicsync['"]|\bonperiodicsync\s*=|periodicSync\.register\s*\("#
    ).unwrap();
    static ref PUSH: Regex = Regex::new(
        r#"addEventListener\(\s*['"]push['"]|\bonpush\s*=|pushManager\.subscribe\s*\("#
    ).unwrap();
    static ref LOGIC: Regex = Regex::new(
        r#"addEventListener\(\s*['"]fetch['"]|\bonfetch\s*=|\bcaches\.(?:open|match)\s*\(|\bworkbox\b|registerRoute\s*\("#
    ).unwrap();
}

/// Fetches a service-worker script plus its `importScripts` dependencies and
/// classifies the combined source.
#[derive(Debug, Clone)]
pub struct HttpServiceWorkerAnalyzer {
    client: reqwest::Client,
    max_imported_scripts: usize,
}

impl HttpServiceWorkerAnalyzer {
    pub fn new(timeout: Duration, max_imported_scripts: usize) -> FetchResult<Self> {
        Ok(Self::with_client(build_client(timeout)?, max_imported_scripts))
    }

    pub fn with_client(client: reqwest::Client, max_imported_scripts: usize) -> Self {
        Self {
            client,
            max_imported_scripts,
        }
    }

    async fn fetch_imports(&self, script_url: &Url, source: &str) -> Vec<String> {
        let mut sources = Vec::new();
        for reference in imported_scripts(source)
            .into_iter()
            .take(self.max_imported_scripts)
        {
            let url = match resolve_url(&reference, Some(script_url.as_str())) {
                Ok(url) => url,
                Err(e) => {
                    debug!(reference = %reference, error = %e, "skipping unresolvable import");
                    continue;
                }
            };
            match get_text(&self.client, &url).await {
                Ok(text) => sources.push(text),
                Err(e) => debug!(url = %url, error = %e, "skipping failed import"),
            }
        }
        sources
    }
}

#[async_trait]
impl ServiceWorkerAnalyzer for HttpServiceWorkerAnalyzer {
    async fn analyze(&self, script_url: &str) -> FetchResult<ServiceWorkerAnalysis> {
        let url = resolve_url(script_url, None)?;
        let primary = get_text(&self.client, &url).await?;
        let imports = self.fetch_imports(&url, &primary).await;

        let mut raw = Vec::with_capacity(imports.len() + 1);
        raw.push(primary);
        raw.extend(imports);

        let features = classify_script(&raw);
        debug!(url = %url, files = raw.len(), ?features, "service worker analyzed");
        Ok(ServiceWorkerAnalysis { features, raw })
    }
}

/// String arguments of every `importScripts(...)` call, in source order.
fn imported_scripts(source: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for call in IMPORT_SCRIPTS.captures_iter(source) {
        for literal in STRING_LITERAL.captures_iter(&call[1]) {
            let reference = literal[1].trim().to_string();
            if !reference.is_empty() && !found.contains(&reference) {
                found.push(reference);
            }
        }
    }
    found
}

/// Statically classify service-worker source files.
pub fn classify_script(sources: &[String]) -> ServiceWorkerFeatures {
    let detect = |re: &Regex| sources.iter().any(|s| re.is_match(s));
    ServiceWorkerFeatures {
        detected_background_sync: detect(&*BACKGROUND_SYNC),
        detected_periodic_background_sync: detect(&*PERIODIC_SYNC),
        detected_push_registration: detect(&*PUSH),
        detected_signs_of_logic: detect(&*LOGIC),
        detected_empty: sources.iter().all(|s| s.trim().is_empty()),
    }
}
