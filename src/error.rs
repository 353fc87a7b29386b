//! Error types for the report cache and the live update client.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Shared, cloneable error cause. Every caller joined on one request
/// receives the same cause.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Errors returned when resolving a report.
#[derive(Debug, Clone, Error)]
pub enum ReportError {
  /// The report name is not in the registry. Programmer error, never retried.
  #[error("unknown report type '{0}'")]
  Configuration(String),

  #[error("invalid date range {start}..{end}")]
  InvalidRange { start: String, end: String },

  #[error("failed to fetch report {report}: {cause}")]
  Fetch {
    report: String,
    #[source]
    cause: Cause,
  },

  #[error("report {report} did not respond within {timeout:?}")]
  Timeout { report: String, timeout: Duration },

  /// The background fetch task went away without settling.
  #[error("fetch for report {report} was aborted")]
  Aborted { report: String },
}

impl ReportError {
  pub fn fetch<E>(report: impl Into<String>, cause: E) -> Self
  where
    E: StdError + Send + Sync + 'static,
  {
    ReportError::Fetch {
      report: report.into(),
      cause: Arc::new(cause),
    }
  }

  /// Whether this error indicates a bug in the caller rather than a
  /// transient condition.
  pub fn is_fatal(&self) -> bool {
    matches!(self, ReportError::Configuration(_))
  }
}

/// Errors raised by the portal HTTP client.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("invalid URL: {0}")]
  Url(#[from] url::ParseError),

  #[error("API reported failure: {0}")]
  Rejected(String),

  #[error("response is missing the data field")]
  MissingData,
}

/// Errors raised by the live update client.
#[derive(Debug, Clone, Error)]
pub enum LiveError {
  /// No usable credential. Surfaced to the caller, never retried.
  #[error("missing or empty credential for the live channel")]
  Auth,

  /// Transient transport failure; drives reconnection.
  #[error("live connection failed: {0}")]
  Connection(String),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fetch_error_keeps_cause() {
    let err = ReportError::fetch("sales_summary", ApiError::MissingData);
    let source = err.source().expect("cause should be exposed as source");
    assert_eq!(source.to_string(), "response is missing the data field");
    assert!(!err.is_fatal());
  }

  #[test]
  fn test_configuration_error_is_fatal() {
    assert!(ReportError::Configuration("nope".into()).is_fatal());
  }
}
