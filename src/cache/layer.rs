//! Cache layer that memoizes report fetches and collapses duplicate requests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::storage::CacheStorage;
use super::traits::{CacheEntry, CacheResult, CacheSource, LoadState};
use crate::api::types::{DateRange, Report, ReportKey, ReportKind, ReportPayload, ReportQuery};
use crate::error::ReportError;

/// Default freshness window for cached reports.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default upper bound on a single report fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

type SharedFetch = Shared<BoxFuture<'static, Result<ReportPayload, ReportError>>>;

/// An in-flight fetch. `id` tells a settling fetch whether it is still the
/// registered one or was detached by an invalidation.
struct Pending {
  id: u64,
  fetch: SharedFetch,
}

enum Lookup {
  Hit(CacheEntry),
  Pending(SharedFetch),
  Started(SharedFetch),
}

/// Session-scoped report cache with request de-duplication.
///
/// Construct one per application session and hand clones to every view;
/// clones share the same tables. All table access is a single synchronous
/// step, so no lock is ever held across an await.
pub struct ReportCache {
  storage: Arc<dyn CacheStorage>,
  pending: Arc<Mutex<HashMap<ReportKey, Pending>>>,
  /// Report name -> id of the batch that marked it loading
  loading: Arc<Mutex<BTreeMap<String, u64>>>,
  next_id: Arc<AtomicU64>,
  ttl: Duration,
  fetch_timeout: Duration,
}

impl ReportCache {
  /// Create a new cache with the given storage backend.
  pub fn new(storage: impl CacheStorage + 'static) -> Self {
    Self {
      storage: Arc::new(storage),
      pending: Arc::new(Mutex::new(HashMap::new())),
      loading: Arc::new(Mutex::new(BTreeMap::new())),
      next_id: Arc::new(AtomicU64::new(0)),
      ttl: DEFAULT_TTL,
      fetch_timeout: DEFAULT_FETCH_TIMEOUT,
    }
  }

  /// Set how long a fetched report is served from cache.
  pub fn with_ttl(mut self, ttl: Duration) -> Self {
    self.ttl = ttl;
    self
  }

  /// Set the upper bound on a single fetch.
  pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
    self.fetch_timeout = timeout;
    self
  }

  /// Resolve one report.
  ///
  /// 1. Unknown report names fail with `Configuration` before any fetch
  /// 2. A fresh cache entry is returned without touching the network
  /// 3. An in-flight request for the same key is joined
  /// 4. Otherwise `fetcher` is spawned and registered as the in-flight request
  ///
  /// The fetch runs on its own task, so dropping this future never cancels
  /// the request for other callers sharing it.
  pub async fn resolve<F, Fut>(
    &self,
    name: &str,
    query: ReportQuery,
    fetcher: F,
  ) -> Result<CacheResult<ReportPayload>, ReportError>
  where
    F: FnOnce(ReportKind, ReportQuery) -> Fut,
    Fut: Future<Output = Result<Report, ReportError>> + Send + 'static,
  {
    let kind: ReportKind = name.parse()?;
    let key = ReportKey::new(kind, query);

    let (fetch, source) = match self.lookup_or_start(key, fetcher) {
      Lookup::Hit(entry) => {
        debug!(%key, "report cache hit");
        return Ok(CacheResult::from_cache(entry.payload, entry.cached_at));
      }
      Lookup::Pending(fetch) => {
        debug!(%key, "joining in-flight report request");
        (fetch, CacheSource::Joined)
      }
      Lookup::Started(fetch) => {
        debug!(%key, "fetching report");
        (fetch, CacheSource::Network)
      }
    };

    let payload = fetch.await?;
    Ok(match source {
      CacheSource::Joined => CacheResult::joined(payload),
      _ => CacheResult::from_network(payload),
    })
  }

  /// Resolve every report in `names` concurrently.
  ///
  /// Each outcome is captured independently: one failing report never
  /// prevents the others from returning. Every name is marked loading before
  /// dispatch and cleared as its own request settles. Repeated names are
  /// resolved once.
  pub async fn resolve_batch<S, F, Fut>(
    &self,
    names: &[S],
    query: ReportQuery,
    fetcher: F,
  ) -> BTreeMap<String, Result<ReportPayload, ReportError>>
  where
    S: AsRef<str>,
    F: Fn(ReportKind, ReportQuery) -> Fut,
    Fut: Future<Output = Result<Report, ReportError>> + Send + 'static,
  {
    let batch_id = self.next_id.fetch_add(1, Ordering::Relaxed);
    let mut seen = BTreeSet::new();
    let guards: Vec<LoadingGuard> = names
      .iter()
      .map(|name| name.as_ref())
      .filter(|name: &&str| seen.insert(*name))
      .map(|name| LoadingGuard::start(self, name, batch_id))
      .collect();

    let fetcher = &fetcher;
    let resolves = guards.into_iter().map(|guard| async move {
      let outcome = self
        .resolve(&guard.name, query, fetcher)
        .await
        .map(|result| {
          debug!(
            report = %guard.name,
            source = ?result.source,
            cached_at = ?result.cached_at,
            "report resolved"
          );
          result.data
        });
      if let Err(e) = &outcome {
        warn!(report = %guard.name, range = %query.range, error = %e, "report failed");
      }
      let name = guard.name.clone();
      drop(guard);
      (name, outcome)
    });

    join_all(resolves).await.into_iter().collect()
  }

  /// Drop every cached report covering exactly `range`, for any report and
  /// grouping. In-flight requests for that range are detached so the next
  /// resolve fetches again. Returns the number of entries removed.
  pub fn invalidate(&self, range: &DateRange) -> usize {
    let mut pending = self.pending();
    pending.retain(|key, _| key.range != *range);
    let removed = self.storage.remove_range(range);
    debug!(%range, removed, "invalidated cached reports");
    removed
  }

  /// Drop all cached reports and detach in-flight requests. Called on logout.
  #[allow(dead_code)]
  pub fn clear(&self) {
    let mut pending = self.pending();
    pending.clear();
    self.storage.clear();
  }

  /// Whether `name` is part of a batch that has not settled yet.
  pub fn load_state(&self, name: &str) -> LoadState {
    if self.loading().contains_key(name) {
      LoadState::Loading
    } else {
      LoadState::Idle
    }
  }

  /// Number of stored entries, fresh or expired.
  #[allow(dead_code)]
  pub fn len(&self) -> usize {
    self.storage.len()
  }

  #[allow(dead_code)]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Check the cache, then the pending table, then start a fetch. The
  /// pending lock is held for the whole step so two callers can never both
  /// start a fetch for the same key.
  fn lookup_or_start<F, Fut>(&self, key: ReportKey, fetcher: F) -> Lookup
  where
    F: FnOnce(ReportKind, ReportQuery) -> Fut,
    Fut: Future<Output = Result<Report, ReportError>> + Send + 'static,
  {
    let mut pending = self.pending();

    if let Some(entry) = self.storage.get(&key) {
      if entry.is_fresh(self.ttl, Instant::now()) {
        return Lookup::Hit(entry);
      }
    }

    if let Some(existing) = pending.get(&key) {
      return Lookup::Pending(existing.fetch.clone());
    }

    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
    let task = tokio::spawn(self.clone().run_fetch(key, id, fetcher(key.kind, key.query())));
    let report = key.kind.name();
    let fetch = async move {
      match task.await {
        Ok(outcome) => outcome,
        Err(_) => Err(ReportError::Aborted {
          report: report.to_string(),
        }),
      }
    }
    .boxed()
    .shared();

    pending.insert(
      key,
      Pending {
        id,
        fetch: fetch.clone(),
      },
    );
    Lookup::Started(fetch)
  }

  /// Run one fetch to completion and settle the tables.
  async fn run_fetch<Fut>(self, key: ReportKey, id: u64, fetch: Fut) -> Result<ReportPayload, ReportError>
  where
    Fut: Future<Output = Result<Report, ReportError>>,
  {
    let outcome = match tokio::time::timeout(self.fetch_timeout, fetch).await {
      Ok(Ok(report)) => Ok(Arc::new(report)),
      Ok(Err(e)) => Err(e),
      Err(_) => Err(ReportError::Timeout {
        report: key.kind.name().to_string(),
        timeout: self.fetch_timeout,
      }),
    };

    self.settle(key, id, &outcome);
    outcome
  }

  fn settle(&self, key: ReportKey, id: u64, outcome: &Result<ReportPayload, ReportError>) {
    let mut pending = self.pending();

    // A detached fetch still answers its own callers but must not touch
    // the tables: the range was invalidated while it was in flight.
    let registered = pending.get(&key).is_some_and(|p| p.id == id);
    if !registered {
      debug!(%key, "discarding result of detached report request");
      return;
    }
    pending.remove(&key);

    match outcome {
      Ok(payload) => {
        let now = Instant::now();
        let purged = self.storage.purge_expired(self.ttl, now);
        if purged > 0 {
          debug!(purged, "purged expired reports");
        }
        self.storage.put(key, CacheEntry::new(Arc::clone(payload)));
      }
      Err(e) => {
        debug!(%key, error = %e, "report request failed, nothing cached");
      }
    }
  }

  fn pending(&self) -> MutexGuard<'_, HashMap<ReportKey, Pending>> {
    self
      .pending
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  fn loading(&self) -> MutexGuard<'_, BTreeMap<String, u64>> {
    self
      .loading
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl Clone for ReportCache {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
      pending: Arc::clone(&self.pending),
      loading: Arc::clone(&self.loading),
      next_id: Arc::clone(&self.next_id),
      ttl: self.ttl,
      fetch_timeout: self.fetch_timeout,
    }
  }
}

/// Marks one report as loading for the lifetime of the guard. Only clears
/// the mark if no newer batch has claimed the same name since.
struct LoadingGuard {
  loading: Arc<Mutex<BTreeMap<String, u64>>>,
  name: String,
  batch_id: u64,
}

impl LoadingGuard {
  fn start(cache: &ReportCache, name: &str, batch_id: u64) -> Self {
    cache.loading().insert(name.to_string(), batch_id);
    Self {
      loading: Arc::clone(&cache.loading),
      name: name.to_string(),
      batch_id,
    }
  }
}

impl Drop for LoadingGuard {
  fn drop(&mut self) {
    let mut loading = self
      .loading
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner());
    if loading.get(&self.name) == Some(&self.batch_id) {
      loading.remove(&self.name);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::types::GroupBy;
  use crate::cache::storage::{MemoryStorage, NoopStorage};
  use crate::error::ApiError;
  use std::sync::atomic::AtomicUsize;
  use tokio::sync::Notify;

  fn query(start: &str, end: &str) -> ReportQuery {
    ReportQuery {
      range: DateRange::parse(start, end).unwrap(),
      group_by: GroupBy::Day,
    }
  }

  fn january() -> ReportQuery {
    query("2024-01-01", "2024-01-31")
  }

  fn report(value: serde_json::Value) -> Report {
    Report {
      data: value,
      summary: None,
    }
  }

  /// Fetcher that counts calls and answers with the report name and call number.
  fn counting(
    calls: &Arc<AtomicUsize>,
  ) -> impl Fn(ReportKind, ReportQuery) -> BoxFuture<'static, Result<Report, ReportError>> {
    let calls = Arc::clone(calls);
    move |kind, _query| {
      let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
      async move { Ok(report(serde_json::json!({ "report": kind.name(), "call": n }))) }.boxed()
    }
  }

  #[tokio::test]
  async fn test_concurrent_resolves_share_one_fetch() {
    let cache = ReportCache::new(MemoryStorage::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Notify::new());

    let fetcher = {
      let calls = Arc::clone(&calls);
      let gate = Arc::clone(&gate);
      move |_kind: ReportKind, _query: ReportQuery| {
        calls.fetch_add(1, Ordering::SeqCst);
        let gate = Arc::clone(&gate);
        async move {
          gate.notified().await;
          Ok(report(serde_json::json!({ "total": 42 })))
        }
      }
    };

    let first = cache.resolve("sales_summary", january(), &fetcher);
    let second = cache.resolve("sales_summary", january(), &fetcher);
    let release = async {
      tokio::task::yield_now().await;
      gate.notify_one();
    };

    let (first, second, ()) = tokio::join!(first, second, release);
    let first = first.unwrap();
    let second = second.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.source, CacheSource::Network);
    assert_eq!(second.source, CacheSource::Joined);
    assert!(Arc::ptr_eq(&first.data, &second.data));
  }

  #[tokio::test(start_paused = true)]
  async fn test_ttl_window() {
    let cache = ReportCache::new(MemoryStorage::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = counting(&calls);

    let fresh = cache.resolve("bid_performance", january(), &fetcher).await.unwrap();
    assert_eq!(fresh.source, CacheSource::Network);

    tokio::time::advance(Duration::from_secs(4 * 60)).await;
    let hit = cache.resolve("bid_performance", january(), &fetcher).await.unwrap();
    assert_eq!(hit.source, CacheSource::Cache);
    assert!(hit.cached_at.is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_secs(61)).await;
    let refetched = cache.resolve("bid_performance", january(), &fetcher).await.unwrap();
    assert_eq!(refetched.source, CacheSource::Network);
    assert_eq!(refetched.data.data["call"], 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn test_unknown_report_never_fetches() {
    let cache = ReportCache::new(MemoryStorage::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let err = cache
      .resolve("bad-report-name", january(), counting(&calls))
      .await
      .unwrap_err();

    assert!(matches!(err, ReportError::Configuration(_)));
    assert!(err.is_fatal());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn test_invalidate_removes_only_matching_range() {
    let cache = ReportCache::new(MemoryStorage::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = counting(&calls);
    let february = query("2024-02-01", "2024-02-29");

    cache.resolve("sales_summary", january(), &fetcher).await.unwrap();
    cache.resolve("pricing_trends", january(), &fetcher).await.unwrap();
    cache.resolve("sales_summary", february, &fetcher).await.unwrap();
    assert_eq!(cache.len(), 3);

    assert_eq!(cache.invalidate(&january().range), 2);
    assert_eq!(cache.len(), 1);

    let feb = cache.resolve("sales_summary", february, &fetcher).await.unwrap();
    assert_eq!(feb.source, CacheSource::Cache);

    let jan = cache.resolve("sales_summary", january(), &fetcher).await.unwrap();
    assert_eq!(jan.source, CacheSource::Network);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
  }

  #[tokio::test]
  async fn test_invalidate_detaches_in_flight_request() {
    let cache = ReportCache::new(MemoryStorage::new());
    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let slow = {
      let gate = Arc::clone(&gate);
      let calls = Arc::clone(&calls);
      move |_kind: ReportKind, _query: ReportQuery| {
        calls.fetch_add(1, Ordering::SeqCst);
        let gate = Arc::clone(&gate);
        async move {
          gate.notified().await;
          Ok(report(serde_json::json!("stale")))
        }
      }
    };

    let stale = tokio::spawn({
      let cache = cache.clone();
      let slow = slow.clone();
      async move { cache.resolve("sales_summary", january(), slow).await }
    });
    tokio::task::yield_now().await;

    cache.invalidate(&january().range);
    let fresh = cache
      .resolve("sales_summary", january(), |_kind, _query| async {
        Ok(report(serde_json::json!("fresh")))
      })
      .await
      .unwrap();
    assert_eq!(fresh.source, CacheSource::Network);

    gate.notify_one();
    let stale = stale.await.unwrap().unwrap();
    assert_eq!(stale.data.data, serde_json::json!("stale"));

    let cached = cache
      .resolve("sales_summary", january(), slow)
      .await
      .unwrap();
    assert_eq!(cached.source, CacheSource::Cache);
    assert_eq!(cached.data.data, serde_json::json!("fresh"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_failure_is_shared_and_not_cached() {
    let cache = ReportCache::new(MemoryStorage::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let failing = {
      let calls = Arc::clone(&calls);
      move |kind: ReportKind, _query: ReportQuery| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
          tokio::task::yield_now().await;
          Err::<Report, _>(ReportError::fetch(kind.name(), ApiError::Rejected("boom".into())))
        }
      }
    };

    let (a, b) = tokio::join!(
      cache.resolve("lead_conversion", january(), &failing),
      cache.resolve("lead_conversion", january(), &failing),
    );
    assert!(matches!(a, Err(ReportError::Fetch { .. })));
    assert!(matches!(b, Err(ReportError::Fetch { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cache.is_empty());

    // Pending entry was cleared, so the next call fetches again
    let _ = cache.resolve("lead_conversion", january(), &failing).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test(start_paused = true)]
  async fn test_hung_fetch_times_out() {
    let cache = ReportCache::new(MemoryStorage::new()).with_fetch_timeout(Duration::from_secs(5));

    let err = cache
      .resolve("dealer_ranking", january(), |_kind, _query| {
        futures::future::pending::<Result<Report, ReportError>>()
      })
      .await
      .unwrap_err();
    assert!(matches!(err, ReportError::Timeout { .. }));

    let calls = Arc::new(AtomicUsize::new(0));
    let retry = cache
      .resolve("dealer_ranking", january(), counting(&calls))
      .await
      .unwrap();
    assert_eq!(retry.source, CacheSource::Network);
  }

  #[tokio::test]
  async fn test_batch_isolates_failures() {
    let cache = ReportCache::new(MemoryStorage::new());
    let names: Vec<&str> = ReportKind::ALL.iter().map(|k| k.name()).collect();

    let results = cache
      .resolve_batch(&names, january(), |kind, _query| async move {
        if kind == ReportKind::InventoryTurnover {
          Err(ReportError::fetch(kind.name(), ApiError::Rejected("upstream down".into())))
        } else {
          Ok(report(serde_json::json!(kind.name())))
        }
      })
      .await;

    assert_eq!(results.len(), 8);
    for (name, outcome) in &results {
      if name == "inventory_turnover" {
        assert!(matches!(outcome, Err(ReportError::Fetch { .. })));
      } else {
        assert_eq!(outcome.as_ref().unwrap().data, serde_json::json!(name));
      }
    }
  }

  #[tokio::test]
  async fn test_batch_reports_unknown_names_per_key() {
    let cache = ReportCache::new(MemoryStorage::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let results = cache
      .resolve_batch(&["sales_summary", "nope"], january(), counting(&calls))
      .await;

    assert!(results["sales_summary"].is_ok());
    assert!(matches!(results["nope"], Err(ReportError::Configuration(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_batch_resolves_repeated_names_once() {
    let cache = ReportCache::new(MemoryStorage::new());
    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let batch = tokio::spawn({
      let cache = cache.clone();
      let gate = Arc::clone(&gate);
      let calls = Arc::clone(&calls);
      async move {
        cache
          .resolve_batch(
            &["sales_summary", "sales_summary"],
            january(),
            move |_kind: ReportKind, _query: ReportQuery| {
              calls.fetch_add(1, Ordering::SeqCst);
              let gate = Arc::clone(&gate);
              async move {
                gate.notified().await;
                Ok(report(serde_json::json!(1)))
              }
            },
          )
          .await
      }
    });
    tokio::task::yield_now().await;

    assert_eq!(cache.load_state("sales_summary"), LoadState::Loading);
    gate.notify_one();
    let results = batch.await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results["sales_summary"].is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.load_state("sales_summary"), LoadState::Idle);
  }

  #[tokio::test]
  async fn test_batch_load_states() {
    let cache = ReportCache::new(MemoryStorage::new());
    let gate = Arc::new(Notify::new());

    let batch = tokio::spawn({
      let cache = cache.clone();
      let gate = Arc::clone(&gate);
      async move {
        cache
          .resolve_batch(&["sales_summary"], january(), move |_kind: ReportKind, _query: ReportQuery| {
            let gate = Arc::clone(&gate);
            async move {
              gate.notified().await;
              Ok(report(serde_json::json!(1)))
            }
          })
          .await
      }
    });
    tokio::task::yield_now().await;

    assert_eq!(cache.load_state("sales_summary"), LoadState::Loading);
    gate.notify_one();
    batch.await.unwrap();
    assert_eq!(cache.load_state("sales_summary"), LoadState::Idle);
  }

  #[tokio::test]
  async fn test_dropped_caller_does_not_cancel_shared_fetch() {
    let cache = ReportCache::new(MemoryStorage::new());
    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = {
      let gate = Arc::clone(&gate);
      let calls = Arc::clone(&calls);
      move |_kind: ReportKind, _query: ReportQuery| {
        calls.fetch_add(1, Ordering::SeqCst);
        let gate = Arc::clone(&gate);
        async move {
          gate.notified().await;
          Ok(report(serde_json::json!("done")))
        }
      }
    };

    let abandoned = tokio::spawn({
      let cache = cache.clone();
      let fetcher = fetcher.clone();
      async move { cache.resolve("sales_summary", january(), fetcher).await }
    });
    tokio::task::yield_now().await;
    abandoned.abort();

    let waiter = tokio::spawn({
      let cache = cache.clone();
      let fetcher = fetcher.clone();
      async move { cache.resolve("sales_summary", january(), fetcher).await }
    });
    tokio::task::yield_now().await;
    gate.notify_one();

    let result = waiter.await.unwrap().unwrap();
    assert_eq!(result.source, CacheSource::Joined);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_disabled_storage_still_dedups() {
    let cache = ReportCache::new(NoopStorage);
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = counting(&calls);

    let (a, b) = tokio::join!(
      cache.resolve("sales_summary", january(), &fetcher),
      cache.resolve("sales_summary", january(), &fetcher),
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    cache.resolve("sales_summary", january(), &fetcher).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }
}
