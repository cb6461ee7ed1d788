//! Error types for the report pipeline.

use std::time::Duration;

/// Fatal failures of the audit invocation. Any of these aborts the request
/// before enrichment begins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditError {
    /// The audit tool did not finish in time.
    #[error("audit timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    /// The audit tool could not be started.
    #[error("failed to launch audit tool: {message}")]
    Launch { message: String },

    /// The audit tool exited unsuccessfully.
    #[error("audit tool exited with status {}: {stderr}", .status.map_or_else(|| "unknown".to_string(), |s| s.to_string()))]
    Process { status: Option<i32>, stderr: String },

    /// The audit tool's output was not a JSON document.
    #[error("invalid audit output: {message}")]
    Parse { message: String },

    /// The audit output carried no check data.
    #[error("Lighthouse audit failed")]
    NoAudits,

    /// Failure reported by a third-party invoker under its own error tag.
    #[error("{name}: {message}")]
    Collaborator { name: String, message: String },
}

impl AuditError {
    /// Identifying tag of the error, e.g. `TimeoutError`.
    pub fn name(&self) -> &str {
        match self {
            Self::Timeout { .. } => "TimeoutError",
            Self::Launch { .. } => "LaunchError",
            Self::Process { .. } => "ProcessError",
            Self::Parse { .. } => "ParseError",
            Self::NoAudits => "Error",
            Self::Collaborator { name, .. } => name.as_str(),
        }
    }
}

/// Result type for audit invocation.
pub type AuditResult<T> = Result<T, AuditError>;

/// Enrichment failures. Contained at the branch boundary, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// URL could not be parsed or resolved.
    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Non-success HTTP status.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Transport-level failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// Body could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Body was empty.
    #[error("empty response from {url}")]
    Empty { url: String },

    /// The enrichment task panicked or was cancelled.
    #[error("enrichment task aborted: {message}")]
    Panicked { message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for enrichment collaborators.
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_carries_timeout_tag() {
        let err = AuditError::Timeout {
            after: Duration::from_secs(180),
        };
        assert_eq!(err.name(), "TimeoutError");
        assert_eq!(err.to_string(), "audit timed out after 180s");
    }

    #[test]
    fn collaborator_tag_is_passed_through() {
        let err = AuditError::Collaborator {
            name: "ProtocolError".into(),
            message: "target closed".into(),
        };
        assert_eq!(err.name(), "ProtocolError");
        assert_eq!(err.to_string(), "ProtocolError: target closed");
    }

    #[test]
    fn process_error_without_status() {
        let err = AuditError::Process {
            status: None,
            stderr: "killed".into(),
        };
        assert_eq!(err.to_string(), "audit tool exited with status unknown: killed");
    }
}
