//! Cached portal client that wraps PortalClient with transparent caching.

use std::collections::BTreeMap;

use color_eyre::Result;

use crate::cache::{LoadState, MemoryStorage, NoopStorage, ReportCache};
use crate::config::Config;
use crate::error::ReportError;

use super::client::PortalClient;
use super::types::{DateRange, GroupBy, LiveSession, ReportPayload, ReportQuery};

/// Outcome of every report in a batch, keyed by report name.
pub type BatchResults = BTreeMap<String, Result<ReportPayload, ReportError>>;

/// Portal client with report caching and request de-duplication.
///
/// This wraps the underlying PortalClient and provides the same API,
/// but reports are served through one session-wide `ReportCache`.
#[derive(Clone)]
pub struct CachedPortalClient {
  inner: PortalClient,
  cache: ReportCache,
}

impl CachedPortalClient {
  /// Create a new cached portal client.
  pub fn new(config: &Config) -> Result<Self> {
    let inner = PortalClient::new(config)?;
    let cache = if config.cache.enabled {
      ReportCache::new(MemoryStorage::new())
    } else {
      ReportCache::new(NoopStorage)
    };
    let cache = cache
      .with_ttl(config.cache.ttl())
      .with_fetch_timeout(config.cache.fetch_timeout());

    Ok(Self::from_parts(inner, cache))
  }

  pub fn from_parts(inner: PortalClient, cache: ReportCache) -> Self {
    Self { inner, cache }
  }

  /// Resolve a set of reports for one range; failures are reported per name.
  pub async fn resolve_batch<S: AsRef<str>>(
    &self,
    names: &[S],
    range: DateRange,
    group_by: GroupBy,
  ) -> BatchResults {
    let query = ReportQuery { range, group_by };
    self
      .cache
      .resolve_batch(names, query, |kind, query| {
        let inner = self.inner.clone();
        async move {
          inner
            .fetch_report(kind, query)
            .await
            .map_err(|e| ReportError::fetch(kind.name(), e))
        }
      })
      .await
  }

  /// Force the next resolve for `range` to hit the network.
  pub fn invalidate(&self, range: &DateRange) -> usize {
    self.cache.invalidate(range)
  }

  pub fn load_state(&self, name: &str) -> LoadState {
    self.cache.load_state(name)
  }

  /// Live sessions (not cached - the live view keeps its own store).
  pub async fn get_live_sessions(&self) -> Result<Vec<LiveSession>> {
    Ok(self.inner.get_live_sessions().await?)
  }

  pub fn client(&self) -> &PortalClient {
    &self.inner
  }
}
