use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pwa-report",
    version,
    about = "PWA audit reports: Lighthouse PWA checks enriched with service worker and manifest analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Audit a site and print the report envelope as JSON
    Audit(AuditArgs),
    Version,
}

#[derive(Parser, Debug, Clone)]
pub struct AuditArgs {
    /// Page to audit
    #[arg(long)]
    pub site: String,

    /// Use the desktop form factor instead of mobile
    #[arg(long)]
    pub desktop: bool,

    /// Pretty-print the JSON envelope
    #[arg(long)]
    pub pretty: bool,

    /// Lighthouse executable
    #[arg(long)]
    pub lighthouse_bin: Option<PathBuf>,

    /// Chrome executable handed to Lighthouse
    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    /// Audit timeout in seconds
    #[arg(long)]
    pub audit_timeout: Option<u64>,

    /// Timeout for manifest and service-worker requests, in seconds
    #[arg(long)]
    pub http_timeout: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_audit_flags() {
        let cli = Cli::try_parse_from([
            "pwa-report",
            "audit",
            "--site",
            "https://example.com",
            "--desktop",
            "--audit-timeout",
            "60",
        ])
        .unwrap();
        match cli.cmd {
            Command::Audit(args) => {
                assert_eq!(args.site, "https://example.com");
                assert!(args.desktop);
                assert!(!args.pretty);
                assert_eq!(args.audit_timeout, Some(60));
            }
            Command::Version => panic!("expected audit"),
        }
    }

    #[test]
    #[serial_test::serial]
    fn malformed_timeout_env_does_not_reject_arguments() {
        std::env::set_var("PWA_REPORT_AUDIT_TIMEOUT", "not-a-number");
        std::env::set_var("PWA_REPORT_HTTP_TIMEOUT", " 60 ");
        let parsed = Cli::try_parse_from(["pwa-report", "audit", "--site", "https://x/"]);
        std::env::remove_var("PWA_REPORT_AUDIT_TIMEOUT");
        std::env::remove_var("PWA_REPORT_HTTP_TIMEOUT");

        match parsed.unwrap().cmd {
            Command::Audit(args) => {
                assert_eq!(args.audit_timeout, None);
                assert_eq!(args.http_timeout, None);
            }
            Command::Version => panic!("expected audit"),
        }
    }

    #[test]
    fn site_is_required() {
        assert!(Cli::try_parse_from(["pwa-report", "audit"]).is_err());
    }
}
