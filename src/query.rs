//! Dashboard loading with supersession.
//!
//! A `DashboardQuery` loads a batch of reports for the selected date range.
//! Selecting another range before the batch settles cancels it: the stale
//! batch can never overwrite state scoped to the newer range.
//!
//! # Example
//!
//! ```ignore
//! let client = cached_client.clone();
//! let mut dashboard = DashboardQuery::new(move |range| {
//!     let client = client.clone();
//!     async move { client.resolve_batch(&names, range, GroupBy::Day).await }
//! });
//!
//! dashboard.load(january);
//! dashboard.load(february); // January's batch is cancelled
//!
//! // In event loop tick
//! if dashboard.poll() {
//!     // State changed, trigger re-render
//! }
//! ```
//!
//! Cancelling only stops this view from acting on the stale batch. Report
//! requests already in flight keep running in the cache for anyone else
//! sharing them.

use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::cached_client::BatchResults;
use crate::api::types::DateRange;

/// The state of the dashboard
#[derive(Debug)]
pub enum DashboardState {
  /// Nothing requested yet
  Idle,
  /// Waiting on the batch for `range`
  Loading { range: DateRange },
  /// Every report for `range` has settled
  Ready {
    range: DateRange,
    results: BatchResults,
  },
}

/// A factory function that creates batch futures for a range
type LoaderFn = Box<dyn Fn(DateRange) -> BoxFuture<'static, BatchResults> + Send + Sync>;

/// A settled batch, tagged with the load that produced it
struct Settled {
  generation: u64,
  range: DateRange,
  results: BatchResults,
}

pub struct DashboardQuery {
  state: DashboardState,
  loader: LoaderFn,
  receiver: Option<mpsc::UnboundedReceiver<Settled>>,
  generation: u64,
  cancel: Option<CancellationToken>,
}

impl DashboardQuery {
  pub fn new<F, Fut>(loader: F) -> Self
  where
    F: Fn(DateRange) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = BatchResults> + Send + 'static,
  {
    Self {
      state: DashboardState::Idle,
      loader: Box::new(move |range| loader(range).boxed()),
      receiver: None,
      generation: 0,
      cancel: None,
    }
  }

  /// Start loading `range`, superseding any batch still in flight.
  pub fn load(&mut self, range: DateRange) {
    if let Some(previous) = self.cancel.take() {
      debug!(%range, "superseding in-flight dashboard batch");
      previous.cancel();
    }

    self.generation += 1;
    let generation = self.generation;
    let token = CancellationToken::new();
    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);
    self.cancel = Some(token.clone());
    self.state = DashboardState::Loading { range };

    let batch = (self.loader)(range);
    tokio::spawn(async move {
      tokio::select! {
        _ = token.cancelled() => {}
        results = batch => {
          // Ignore send errors - receiver may have been replaced
          let _ = tx.send(Settled { generation, range, results });
        }
      }
    });
  }

  /// Apply a settled batch if one arrived. Returns `true` if the state changed.
  #[allow(dead_code)]
  pub fn poll(&mut self) -> bool {
    let receiver = match &mut self.receiver {
      Some(rx) => rx,
      None => return false,
    };

    match receiver.try_recv() {
      Ok(settled) => self.apply(settled),
      Err(_) => false,
    }
  }

  /// Wait for the current batch to settle and apply it.
  pub async fn settled(&mut self) -> bool {
    let receiver = match &mut self.receiver {
      Some(rx) => rx,
      None => return false,
    };

    match receiver.recv().await {
      Some(settled) => self.apply(settled),
      None => false,
    }
  }

  #[allow(dead_code)]
  pub fn state(&self) -> &DashboardState {
    &self.state
  }

  #[allow(dead_code)]
  pub fn is_loading(&self) -> bool {
    matches!(self.state, DashboardState::Loading { .. })
  }

  /// The range currently shown or being loaded
  #[allow(dead_code)]
  pub fn range(&self) -> Option<DateRange> {
    match &self.state {
      DashboardState::Idle => None,
      DashboardState::Loading { range } | DashboardState::Ready { range, .. } => Some(*range),
    }
  }

  pub fn results(&self) -> Option<&BatchResults> {
    match &self.state {
      DashboardState::Ready { results, .. } => Some(results),
      _ => None,
    }
  }

  /// Names of reports that failed in the settled batch
  pub fn failed(&self) -> Vec<&str> {
    self
      .results()
      .map(|results| {
        results
          .iter()
          .filter(|(_, outcome)| outcome.is_err())
          .map(|(name, _)| name.as_str())
          .collect()
      })
      .unwrap_or_default()
  }

  fn apply(&mut self, settled: Settled) -> bool {
    if settled.generation != self.generation {
      debug!(range = %settled.range, "dropping superseded dashboard batch");
      return false;
    }
    self.receiver = None;
    self.cancel = None;
    self.state = DashboardState::Ready {
      range: settled.range,
      results: settled.results,
    };
    true
  }
}

impl std::fmt::Debug for DashboardQuery {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DashboardQuery")
      .field("state", &self.state)
      .field("generation", &self.generation)
      .finish_non_exhaustive()
  }
}
