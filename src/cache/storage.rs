//! Cache storage trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use super::traits::CacheEntry;
use crate::api::types::{DateRange, ReportKey};

/// Trait for cache storage backends.
///
/// Every method is a single synchronous step; callers never hold a backend
/// lock across an await point.
pub trait CacheStorage: Send + Sync {
  /// Get the entry stored for a key, fresh or not.
  fn get(&self, key: &ReportKey) -> Option<CacheEntry>;

  /// Store an entry, replacing any previous one.
  fn put(&self, key: ReportKey, entry: CacheEntry);

  /// Remove every entry whose key covers exactly `range`.
  fn remove_range(&self, range: &DateRange) -> usize;

  /// Drop entries older than `ttl`.
  fn purge_expired(&self, ttl: Duration, now: Instant) -> usize;

  /// Drop everything.
  fn clear(&self);

  fn len(&self) -> usize;
}

/// Storage implementation that doesn't cache anything.
/// Used when caching is disabled - request dedup still applies.
pub struct NoopStorage;

impl CacheStorage for NoopStorage {
  fn get(&self, _key: &ReportKey) -> Option<CacheEntry> {
    None // Always miss
  }

  fn put(&self, _key: ReportKey, _entry: CacheEntry) {}

  fn remove_range(&self, _range: &DateRange) -> usize {
    0
  }

  fn purge_expired(&self, _ttl: Duration, _now: Instant) -> usize {
    0
  }

  fn clear(&self) {}

  fn len(&self) -> usize {
    0
  }
}

/// Session-scoped in-memory storage. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<ReportKey, CacheEntry>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<ReportKey, CacheEntry>> {
    // A panic while holding the lock leaves the map itself consistent.
    self
      .entries
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl CacheStorage for MemoryStorage {
  fn get(&self, key: &ReportKey) -> Option<CacheEntry> {
    self.entries().get(key).cloned()
  }

  fn put(&self, key: ReportKey, entry: CacheEntry) {
    self.entries().insert(key, entry);
  }

  fn remove_range(&self, range: &DateRange) -> usize {
    let mut entries = self.entries();
    let before = entries.len();
    entries.retain(|key, _| key.range != *range);
    before - entries.len()
  }

  fn purge_expired(&self, ttl: Duration, now: Instant) -> usize {
    let mut entries = self.entries();
    let before = entries.len();
    entries.retain(|_, entry| entry.is_fresh(ttl, now));
    before - entries.len()
  }

  fn clear(&self) {
    self.entries().clear();
  }

  fn len(&self) -> usize {
    self.entries().len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::types::{GroupBy, Report, ReportKind};
  use std::sync::Arc;

  fn key(kind: ReportKind, start: &str, end: &str, group_by: GroupBy) -> ReportKey {
    ReportKey {
      kind,
      range: DateRange::parse(start, end).unwrap(),
      group_by,
    }
  }

  fn entry() -> CacheEntry {
    CacheEntry::new(Arc::new(Report {
      data: serde_json::json!([]),
      summary: None,
    }))
  }

  #[test]
  fn test_remove_range_only_matches_exact_range() {
    let storage = MemoryStorage::new();
    let jan = key(ReportKind::SalesSummary, "2024-01-01", "2024-01-31", GroupBy::Day);
    let jan_weekly = key(ReportKind::PricingTrends, "2024-01-01", "2024-01-31", GroupBy::Week);
    let jan_partial = key(ReportKind::SalesSummary, "2024-01-01", "2024-01-15", GroupBy::Day);
    let feb = key(ReportKind::SalesSummary, "2024-02-01", "2024-02-29", GroupBy::Day);
    for k in [jan, jan_weekly, jan_partial, feb] {
      storage.put(k, entry());
    }

    let removed = storage.remove_range(&jan.range);

    assert_eq!(removed, 2);
    assert!(storage.get(&jan).is_none());
    assert!(storage.get(&jan_weekly).is_none());
    assert!(storage.get(&jan_partial).is_some());
    assert!(storage.get(&feb).is_some());
  }

  #[tokio::test(start_paused = true)]
  async fn test_purge_expired() {
    let storage = MemoryStorage::new();
    let old = key(ReportKind::DealerRanking, "2024-01-01", "2024-01-31", GroupBy::Day);
    storage.put(old, entry());

    tokio::time::advance(Duration::from_secs(120)).await;
    let new = key(ReportKind::DealerRanking, "2024-02-01", "2024-02-29", GroupBy::Day);
    storage.put(new, entry());

    let removed = storage.purge_expired(Duration::from_secs(60), Instant::now());
    assert_eq!(removed, 1);
    assert!(storage.get(&new).is_some());
  }

  #[test]
  fn test_noop_storage_always_misses() {
    let storage = NoopStorage;
    let k = key(ReportKind::SalesSummary, "2024-01-01", "2024-01-31", GroupBy::Day);
    storage.put(k, entry());
    assert!(storage.get(&k).is_none());
    assert_eq!(storage.len(), 0);
  }
}
