//! Serde-deserializable types matching portal API responses.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use serde::Deserialize;

use super::types::{LiveSession, Report};
use crate::error::ApiError;

/// Envelope every report endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct ApiReportResponse {
  #[serde(default)]
  pub success: bool,
  pub data: Option<serde_json::Value>,
  pub summary: Option<serde_json::Value>,
  pub message: Option<String>,
}

impl ApiReportResponse {
  /// Anything other than `success: true` with a data field is a failure.
  pub fn into_report(self) -> Result<Report, ApiError> {
    if !self.success {
      return Err(ApiError::Rejected(
        self
          .message
          .unwrap_or_else(|| "request was not successful".to_string()),
      ));
    }
    let data = self.data.ok_or(ApiError::MissingData)?;
    Ok(Report {
      data,
      summary: self.summary,
    })
  }
}

// ============================================================================
// Live sessions endpoint response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiLiveSessionsResponse {
  #[serde(default)]
  pub success: bool,
  #[serde(default)]
  pub data: Vec<LiveSession>,
  pub message: Option<String>,
}

impl ApiLiveSessionsResponse {
  pub fn into_sessions(self) -> Result<Vec<LiveSession>, ApiError> {
    if !self.success {
      return Err(ApiError::Rejected(
        self
          .message
          .unwrap_or_else(|| "request was not successful".to_string()),
      ));
    }
    Ok(self.data)
  }
}
