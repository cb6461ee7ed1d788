//! Lighthouse CLI invoker.
//!
//! Runs Lighthouse as a child process restricted to the PWA checks, with
//! throttling disabled and a headless Chrome flag set, and reads the JSON
//! result from stdout. The child is killed when the audit timeout expires.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::collaborators::AuditInvoker;
use crate::config::ReportConfig;
use crate::error::{AuditError, AuditResult};
use crate::raw::{CheckId, RawAuditSet};

const CHROME_FLAGS: &[&str] = &[
    "--headless=new",
    "--no-sandbox",
    "--no-pings",
    "--enable-automation",
    "--allow-pre-commit-input",
    "--deny-permission-prompts",
    "--disable-breakpad",
    "--disable-dev-shm-usage",
    "--disable-domain-reliability",
    "--disable-hang-monitor",
    "--disable-ipc-flooding-protection",
    "--disable-popup-blocking",
    "--disable-prompt-on-repost",
    "--disable-renderer-backgrounding",
    "--disable-gpu",
    "--block-new-web-contents",
];

const THROTTLING_FLAGS: &[&str] = &[
    "--throttling-method=simulate",
    "--throttling.rttMs=0",
    "--throttling.throughputKbps=0",
    "--throttling.requestLatencyMs=0",
    "--throttling.downloadThroughputKbps=0",
    "--throttling.uploadThroughputKbps=0",
    "--throttling.cpuSlowdownMultiplier=0",
];

/// Longest stderr excerpt carried in a process error.
const STDERR_EXCERPT: usize = 500;

#[derive(Debug, Clone)]
pub struct LighthouseInvoker {
    bin: PathBuf,
    chrome_path: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
    timeout: Duration,
}

impl LighthouseInvoker {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            bin: config.lighthouse_bin.clone(),
            chrome_path: config.chrome_path.clone(),
            temp_dir: config.temp_dir.clone(),
            timeout: Duration::from_secs(config.audit_timeout_secs),
        }
    }

    fn command(&self, url: &str, desktop: bool) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(lighthouse_args(url, desktop))
            .env("PATCHED", "true")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(chrome) = &self.chrome_path {
            cmd.env("CHROME_PATH", chrome);
        }
        if let Some(temp) = &self.temp_dir {
            cmd.env("TEMP", temp);
        }
        cmd
    }
}

#[async_trait]
impl AuditInvoker for LighthouseInvoker {
    async fn invoke(&self, url: &str, desktop: bool) -> AuditResult<RawAuditSet> {
        debug!(bin = %self.bin.display(), url, desktop, "starting lighthouse");

        let child = self
            .command(url, desktop)
            .spawn()
            .map_err(|e| AuditError::Launch {
                message: format!("{}: {}", self.bin.display(), e),
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| AuditError::Launch {
                message: format!("failed to collect lighthouse output: {}", e),
            })?,
            Err(_) => {
                return Err(AuditError::Timeout {
                    after: self.timeout,
                })
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AuditError::Process {
                status: output.status.code(),
                stderr: stderr.trim().chars().take(STDERR_EXCERPT).collect(),
            });
        }

        let audits = parse_lighthouse_output(&output.stdout)?;
        info!(url, checks = audits.len(), "lighthouse audit finished");
        Ok(audits)
    }

    fn invoker_name(&self) -> &'static str {
        "lighthouse"
    }
}

/// Command-line arguments for one Lighthouse run.
pub fn lighthouse_args(url: &str, desktop: bool) -> Vec<OsString> {
    let only_audits = CheckId::ALL
        .iter()
        .map(|id| id.key())
        .collect::<Vec<_>>()
        .join(",");

    let mut args: Vec<OsString> = THROTTLING_FLAGS.iter().map(|f| OsString::from(*f)).collect();
    args.push(url.into());
    args.push("--output".into());
    args.push("json".into());
    if desktop {
        args.push("--preset=desktop".into());
    }
    args.push(format!("--only-audits={only_audits}").into());
    args.push(format!("--chrome-flags={}", CHROME_FLAGS.join(" ")).into());
    args.push("--disable-full-page-screenshot".into());
    args.push("--disable-storage-reset".into());
    args
}

/// Decode Lighthouse's JSON result into the raw audit set.
pub fn parse_lighthouse_output(stdout: &[u8]) -> AuditResult<RawAuditSet> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Err(AuditError::NoAudits);
    }
    let result: serde_json::Value =
        serde_json::from_slice(stdout).map_err(|e| AuditError::Parse {
            message: e.to_string(),
        })?;
    RawAuditSet::from_lighthouse_result(&result).ok_or(AuditError::NoAudits)
}
