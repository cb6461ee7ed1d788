//! Failure classification and the response envelope.

use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::types::Report;

/// Transport status for a produced report.
pub const STATUS_SUCCESS: u16 = 200;
/// Transport status for any fatal pipeline failure.
pub const STATUS_FAILURE: u16 = 500;

const TIMEOUT_TAG: &str = "TimeoutError";

/// Operational class of a fatal failure. Does not change the response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    Timeout,
    Generic,
}

/// Classify a fatal failure by its identifying tag.
pub fn classify(err: &AuditError) -> FailureClass {
    if err.name().contains(TIMEOUT_TAG) {
        FailureClass::Timeout
    } else {
        FailureClass::Generic
    }
}

/// What the response layer sends back: `{"data": ...}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportResponse {
    Data(Report),
    Error(String),
}

impl ReportResponse {
    pub fn from_result(result: Result<Report, AuditError>) -> Self {
        match result {
            Ok(report) => Self::Data(report),
            Err(e) => Self::Error(e.to_string()),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Data(_) => STATUS_SUCCESS,
            Self::Error(_) => STATUS_FAILURE,
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::Data(report) => Some(report),
            Self::Error(_) => None,
        }
    }
}
