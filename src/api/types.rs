use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Date format used on the wire for report ranges.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date range a report is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateRange {
  start: NaiveDate,
  end: NaiveDate,
}

impl DateRange {
  pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
    if start > end {
      return Err(ReportError::InvalidRange {
        start: start.format(DATE_FORMAT).to_string(),
        end: end.format(DATE_FORMAT).to_string(),
      });
    }
    Ok(Self { start, end })
  }

  /// Parse a range from two `YYYY-MM-DD` strings.
  pub fn parse(start: &str, end: &str) -> Result<Self, ReportError> {
    let invalid = || ReportError::InvalidRange {
      start: start.to_string(),
      end: end.to_string(),
    };
    let start_date = NaiveDate::parse_from_str(start, DATE_FORMAT).map_err(|_| invalid())?;
    let end_date = NaiveDate::parse_from_str(end, DATE_FORMAT).map_err(|_| invalid())?;
    Self::new(start_date, end_date)
  }

  pub fn start(&self) -> NaiveDate {
    self.start
  }

  pub fn end(&self) -> NaiveDate {
    self.end
  }
}

impl fmt::Display for DateRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}..{}",
      self.start.format(DATE_FORMAT),
      self.end.format(DATE_FORMAT)
    )
  }
}

/// Bucket size for time-series reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
  #[default]
  Day,
  Week,
  Month,
}

impl GroupBy {
  pub fn as_str(&self) -> &'static str {
    match self {
      GroupBy::Day => "day",
      GroupBy::Week => "week",
      GroupBy::Month => "month",
    }
  }
}

impl fmt::Display for GroupBy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for GroupBy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "day" => Ok(GroupBy::Day),
      "week" => Ok(GroupBy::Week),
      "month" => Ok(GroupBy::Month),
      other => Err(format!("invalid grouping '{}', expected day, week or month", other)),
    }
  }
}

/// Registry of the reports the portal API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportKind {
  BidPerformance,
  CustomerEngagement,
  InventoryTurnover,
  SalesSummary,
  LeadConversion,
  PricingTrends,
  ReverseBidActivity,
  DealerRanking,
}

impl ReportKind {
  /// Every supported report, in dashboard order.
  pub const ALL: [ReportKind; 8] = [
    ReportKind::BidPerformance,
    ReportKind::CustomerEngagement,
    ReportKind::InventoryTurnover,
    ReportKind::SalesSummary,
    ReportKind::LeadConversion,
    ReportKind::PricingTrends,
    ReportKind::ReverseBidActivity,
    ReportKind::DealerRanking,
  ];

  /// Name used in API paths and in batch result maps
  pub fn name(&self) -> &'static str {
    match self {
      ReportKind::BidPerformance => "bid_performance",
      ReportKind::CustomerEngagement => "customer_engagement",
      ReportKind::InventoryTurnover => "inventory_turnover",
      ReportKind::SalesSummary => "sales_summary",
      ReportKind::LeadConversion => "lead_conversion",
      ReportKind::PricingTrends => "pricing_trends",
      ReportKind::ReverseBidActivity => "reverse_bid_activity",
      ReportKind::DealerRanking => "dealer_ranking",
    }
  }
}

impl fmt::Display for ReportKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for ReportKind {
  type Err = ReportError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ReportKind::ALL
      .into_iter()
      .find(|kind| kind.name() == s)
      .ok_or_else(|| ReportError::Configuration(s.to_string()))
  }
}

/// Parameters sent with every report request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportQuery {
  pub range: DateRange,
  pub group_by: GroupBy,
}

/// Composite key identifying one report request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportKey {
  pub kind: ReportKind,
  pub range: DateRange,
  pub group_by: GroupBy,
}

impl ReportKey {
  pub fn new(kind: ReportKind, query: ReportQuery) -> Self {
    Self {
      kind,
      range: query.range,
      group_by: query.group_by,
    }
  }

  pub fn query(&self) -> ReportQuery {
    ReportQuery {
      range: self.range,
      group_by: self.group_by,
    }
  }
}

impl fmt::Display for ReportKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}:{}:{}:{}",
      self.kind,
      self.range.start.format(DATE_FORMAT),
      self.range.end.format(DATE_FORMAT),
      self.group_by
    )
  }
}

/// Report body returned by the API. Opaque to the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
  pub data: serde_json::Value,
  pub summary: Option<serde_json::Value>,
}

/// Shared handle to a report; every cache reader gets the same allocation.
pub type ReportPayload = Arc<Report>;

/// A live reverse-bidding session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSession {
  pub id: u64,
  #[serde(default)]
  pub vehicle: String,
  #[serde(default)]
  pub status: String,
  #[serde(default)]
  pub bid_count: u32,
  pub best_bid: Option<f64>,
  pub closes_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_range() {
    let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
    assert_eq!(range.to_string(), "2024-01-01..2024-01-31");
  }

  #[test]
  fn test_reversed_range_is_rejected() {
    let err = DateRange::parse("2024-02-01", "2024-01-01").unwrap_err();
    assert!(matches!(err, ReportError::InvalidRange { .. }));
  }

  #[test]
  fn test_malformed_date_is_rejected() {
    assert!(DateRange::parse("2024-13-01", "2024-12-31").is_err());
    assert!(DateRange::parse("yesterday", "2024-12-31").is_err());
  }

  #[test]
  fn test_report_registry_lookup() {
    assert_eq!(
      "pricing_trends".parse::<ReportKind>().unwrap(),
      ReportKind::PricingTrends
    );
    for kind in ReportKind::ALL {
      assert_eq!(kind.name().parse::<ReportKind>().unwrap(), kind);
    }
  }

  #[test]
  fn test_unknown_report_is_configuration_error() {
    let err = "bad-report-name".parse::<ReportKind>().unwrap_err();
    assert!(matches!(err, ReportError::Configuration(ref name) if name == "bad-report-name"));
  }

  #[test]
  fn test_key_display() {
    let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
    let key = ReportKey {
      kind: ReportKind::SalesSummary,
      range,
      group_by: GroupBy::Week,
    };
    assert_eq!(key.to_string(), "sales_summary:2024-01-01:2024-01-31:week");
  }

  #[test]
  fn test_group_by_parse() {
    assert_eq!("Month".parse::<GroupBy>().unwrap(), GroupBy::Month);
    assert!("year".parse::<GroupBy>().is_err());
  }
}
