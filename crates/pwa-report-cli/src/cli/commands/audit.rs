use anyhow::Context;
use pwa_report_core::{FailureClass, ReportConfig, ReportOutcome, ReportRequest, ReportService};
use tracing::debug;

use crate::cli::args::AuditArgs;
use crate::exit_codes::{AUDIT_FAILED, AUDIT_TIMEOUT, SUCCESS};

pub(crate) async fn run(args: AuditArgs) -> anyhow::Result<i32> {
    let config = config_from_args(&args);
    debug!(?config, "resolved configuration");

    let service =
        ReportService::from_config(&config).context("failed to set up report collaborators")?;
    let request = ReportRequest::new(args.site.clone()).with_desktop(args.desktop);
    let outcome = service.handle(&request).await;

    let body = if args.pretty {
        serde_json::to_string_pretty(&outcome.response)
    } else {
        serde_json::to_string(&outcome.response)
    };
    let body = body.context("failed to serialize report")?;
    println!("{body}");

    debug!(
        status = outcome.status,
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        "request finished"
    );
    Ok(exit_code(&outcome))
}

/// Environment first, flags on top.
fn config_from_args(args: &AuditArgs) -> ReportConfig {
    let mut config = ReportConfig::from_env();
    if let Some(bin) = &args.lighthouse_bin {
        config = config.with_lighthouse_bin(bin);
    }
    if let Some(chrome) = &args.chrome_path {
        config = config.with_chrome_path(chrome);
    }
    if let Some(secs) = args.audit_timeout {
        config = config.with_audit_timeout_secs(secs);
    }
    if let Some(secs) = args.http_timeout {
        config = config.with_http_timeout_secs(secs);
    }
    config
}

fn exit_code(outcome: &ReportOutcome) -> i32 {
    match outcome.failure {
        None => SUCCESS,
        Some(FailureClass::Timeout) => AUDIT_TIMEOUT,
        Some(FailureClass::Generic) => AUDIT_FAILED,
    }
}
