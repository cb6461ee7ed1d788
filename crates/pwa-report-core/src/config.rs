//! Runtime configuration for the default collaborators.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the Lighthouse invoker and the HTTP collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Lighthouse executable.
    #[serde(default = "default_lighthouse_bin")]
    pub lighthouse_bin: PathBuf,

    /// Chrome executable, exported to Lighthouse as `CHROME_PATH`.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    /// Scratch directory, exported to Lighthouse as `TEMP`.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Upper bound for one audit run, in seconds.
    #[serde(default = "default_audit_timeout")]
    pub audit_timeout_secs: u64,

    /// Request timeout for enrichment fetches, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Maximum number of `importScripts` dependencies fetched per service worker.
    #[serde(default = "default_max_imported_scripts")]
    pub max_imported_scripts: usize,
}

fn default_lighthouse_bin() -> PathBuf {
    PathBuf::from("lighthouse")
}

fn default_audit_timeout() -> u64 {
    180
}

fn default_http_timeout() -> u64 {
    30
}

fn default_max_imported_scripts() -> usize {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lighthouse_bin: default_lighthouse_bin(),
            chrome_path: None,
            temp_dir: None,
            audit_timeout_secs: default_audit_timeout(),
            http_timeout_secs: default_http_timeout(),
            max_imported_scripts: default_max_imported_scripts(),
        }
    }
}

impl ReportConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `PWA_REPORT_LIGHTHOUSE_BIN` | Lighthouse executable |
    /// | `PWA_REPORT_CHROME_PATH` | Chrome executable (falls back to `CHROME_PATH`) |
    /// | `PWA_REPORT_TEMP_DIR` | Scratch directory |
    /// | `PWA_REPORT_AUDIT_TIMEOUT` | Audit timeout in seconds |
    /// | `PWA_REPORT_HTTP_TIMEOUT` | Enrichment request timeout in seconds |
    /// | `PWA_REPORT_MAX_IMPORTED_SCRIPTS` | Imported scripts followed per service worker |
    pub fn from_env() -> Self {
        Self {
            lighthouse_bin: std::env::var_os("PWA_REPORT_LIGHTHOUSE_BIN")
                .map(PathBuf::from)
                .unwrap_or_else(default_lighthouse_bin),
            chrome_path: std::env::var_os("PWA_REPORT_CHROME_PATH")
                .or_else(|| std::env::var_os("CHROME_PATH"))
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            temp_dir: std::env::var_os("PWA_REPORT_TEMP_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            audit_timeout_secs: parse_env("PWA_REPORT_AUDIT_TIMEOUT")
                .unwrap_or_else(default_audit_timeout),
            http_timeout_secs: parse_env("PWA_REPORT_HTTP_TIMEOUT")
                .unwrap_or_else(default_http_timeout),
            max_imported_scripts: parse_env("PWA_REPORT_MAX_IMPORTED_SCRIPTS")
                .unwrap_or_else(default_max_imported_scripts),
        }
    }

    /// Set the Lighthouse executable.
    pub fn with_lighthouse_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.lighthouse_bin = bin.into();
        self
    }

    /// Set the Chrome executable.
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Set the audit timeout.
    pub fn with_audit_timeout_secs(mut self, secs: u64) -> Self {
        self.audit_timeout_secs = secs;
        self
    }

    /// Set the enrichment request timeout.
    pub fn with_http_timeout_secs(mut self, secs: u64) -> Self {
        self.http_timeout_secs = secs;
        self
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
