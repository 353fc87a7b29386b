//! Core types shared by the cache layer and its storage backends.

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::api::types::ReportPayload;

/// A stored report together with when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
  pub payload: ReportPayload,
  /// Monotonic fetch time, used for TTL checks
  pub fetched_at: Instant,
  /// Wall-clock fetch time, reported to callers
  pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
  pub fn new(payload: ReportPayload) -> Self {
    Self {
      payload,
      fetched_at: Instant::now(),
      cached_at: Utc::now(),
    }
  }

  /// Whether this entry may still be served at `now`.
  pub fn is_fresh(&self, ttl: std::time::Duration, now: Instant) -> bool {
    now.saturating_duration_since(self.fetched_at) < ttl
  }
}

/// Result from a cache operation, including data and metadata about the source.
#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
  /// When the data was fetched (if served from cache)
  pub cached_at: Option<DateTime<Utc>>,
}

impl<T> CacheResult<T> {
  /// Create a new cache result from fresh network data.
  pub fn from_network(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Network,
      cached_at: None,
    }
  }

  /// Create a new cache result from cached data.
  pub fn from_cache(data: T, cached_at: DateTime<Utc>) -> Self {
    Self {
      data,
      source: CacheSource::Cache,
      cached_at: Some(cached_at),
    }
  }

  /// Create a new cache result for a caller that joined an in-flight request.
  pub fn joined(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Joined,
      cached_at: None,
    }
  }
}

/// Indicates where a resolved report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// This caller issued the network fetch
  Network,
  /// Served from a fresh cache entry
  Cache,
  /// Shared the result of a fetch another caller issued
  Joined,
}

/// Per-report loading flag driven by batch resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
  #[default]
  Idle,
  Loading,
}
