use std::sync::Arc;

use color_eyre::{eyre::eyre, Result};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::cached_client::CachedPortalClient;
use crate::api::types::{DateRange, GroupBy, ReportPayload};
use crate::config::Config;
use crate::error::ReportError;
use crate::event::{Event, EventHandler};
use crate::live::{ConnectionState, HttpTransport, LiveClient, LiveEffect, LiveSessionStore};
use crate::query::DashboardQuery;

/// Arguments of the `reports` command
#[derive(Debug, Clone)]
pub struct ReportsRequest {
  /// First day, `YYYY-MM-DD`
  pub from: String,
  /// Last day, `YYYY-MM-DD`
  pub to: String,
  pub group_by: Option<GroupBy>,
  /// Report names; empty means the configured dashboard set
  pub reports: Vec<String>,
  /// Drop cached reports for the range first
  pub refresh: bool,
}

/// Tracks the resynchronizing fetch so that requests arriving while one is
/// in flight collapse into a single follow-up.
#[derive(Debug, Default)]
struct SyncTracker {
  in_flight: bool,
  queued: bool,
}

impl SyncTracker {
  /// Returns true when a fetch should start now.
  fn request(&mut self) -> bool {
    if self.in_flight {
      self.queued = true;
      false
    } else {
      self.in_flight = true;
      true
    }
  }

  /// The fetch in flight settled. Returns true when a follow-up should start.
  fn finish(&mut self) -> bool {
    if self.queued {
      self.queued = false;
      true
    } else {
      self.in_flight = false;
      false
    }
  }

  /// Local state changed while a fetch is in flight, so its snapshot may
  /// predate the change. Schedules a follow-up.
  fn invalidate(&mut self) {
    if self.in_flight {
      self.queued = true;
    }
  }
}

/// Main application state
pub struct App {
  /// Application configuration
  config: Config,

  /// Portal client shared by the report and live commands
  client: CachedPortalClient,

  /// Local view of the live sessions
  store: LiveSessionStore,

  sync: SyncTracker,

  /// Event sender for async tasks
  event_tx: mpsc::UnboundedSender<Event>,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let client = CachedPortalClient::new(&config)?;
    let (tx, _rx) = mpsc::unbounded_channel();

    Ok(Self {
      config,
      client,
      store: LiveSessionStore::new(),
      sync: SyncTracker::default(),
      event_tx: tx,
    })
  }

  /// Resolve one dashboard batch and print each outcome as a JSON line.
  pub async fn reports(&self, request: ReportsRequest) -> Result<()> {
    let range = DateRange::parse(&request.from, &request.to)?;
    let group_by = request.group_by.unwrap_or(self.config.dashboard.group_by);
    let names: Arc<Vec<String>> = Arc::new(if request.reports.is_empty() {
      self.config.dashboard.reports.clone()
    } else {
      request.reports
    });

    if request.refresh {
      let dropped = self.client.invalidate(&range);
      info!(%range, dropped, "refreshing reports");
    }

    let client = self.client.clone();
    let batch_names = Arc::clone(&names);
    let mut dashboard = DashboardQuery::new(move |range| {
      let client = client.clone();
      let names = Arc::clone(&batch_names);
      async move { client.resolve_batch(names.as_slice(), range, group_by).await }
    });

    dashboard.load(range);
    for name in names.iter() {
      debug!(report = %name, state = ?self.client.load_state(name), "requested");
    }

    if !dashboard.settled().await {
      return Err(eyre!("dashboard batch for {} did not settle", range));
    }

    let failed = dashboard.failed();
    if !failed.is_empty() {
      warn!(%range, ?failed, "some reports failed");
    }

    if let Some(results) = dashboard.results() {
      for (name, outcome) in results {
        if let Err(e) = outcome {
          if e.is_fatal() {
            error!(report = %name, "programmer error: {}", e);
          }
        }
        println!("{}", report_line(name, outcome));
      }
    }

    Ok(())
  }

  /// Follow the live sessions until Ctrl-C.
  pub async fn live(&mut self) -> Result<()> {
    let transport = HttpTransport::new(self.client.client().clone());
    let live = LiveClient::new(
      self.client.client().token(),
      self.config.live.reconnect_policy(),
      transport,
    )?;

    let effects = live.subscribe();
    let handle = live.start();
    let mut events = EventHandler::new(effects, handle.watch_state());
    self.event_tx = events.sender();

    // Initial snapshot; push events only describe changes
    self.request_sync();

    loop {
      tokio::select! {
        _ = tokio::signal::ctrl_c() => {
          info!("interrupted");
          break;
        }
        event = events.next() => match event {
          Some(event) => self.handle_event(event),
          None => break,
        },
      }
    }

    info!(state = %handle.state(), sessions = self.store.len(), "closing live connection");
    handle.close().await;
    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Live(effect) => self.handle_effect(effect),
      Event::State(state) => match state {
        ConnectionState::PollingFallback => warn!(
          "live channel unavailable, polling every {:?}",
          self.config.live.reconnect_policy().poll_interval
        ),
        state => info!(
          %state,
          last_activity = ?self.store.last_activity(),
          "live connection"
        ),
      },
      Event::Lagged(missed) => {
        warn!(missed, "fell behind on live effects, resyncing");
        self.request_sync();
      }
      Event::SessionsLoaded(sessions) => {
        self.store.replace_all(sessions);
        info!(sessions = self.store.len(), "live sessions synced");
        for session in self.store.sessions() {
          println!("{}", json!(session));
        }
        self.finish_sync();
      }
      Event::Error(msg) => {
        warn!(synced_at = ?self.store.synced_at(), "live session sync failed: {}", msg);
        self.finish_sync();
      }
    }
  }

  fn handle_effect(&mut self, effect: LiveEffect) {
    if let LiveEffect::RemoveSession(id) = effect {
      if let Some(session) = self.store.get(id) {
        info!(id, vehicle = %session.vehicle, "session closed");
      }
      self.sync.invalidate();
    }
    if self.store.apply(effect).is_some() {
      self.request_sync();
    }
  }

  fn request_sync(&mut self) {
    if self.sync.request() {
      self.spawn_sync();
    } else {
      debug!("resync already in flight, coalescing");
    }
  }

  fn finish_sync(&mut self) {
    if self.sync.finish() {
      self.spawn_sync();
    }
  }

  fn spawn_sync(&self) {
    let client = self.client.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match client.get_live_sessions().await {
        Ok(sessions) => {
          let _ = tx.send(Event::SessionsLoaded(sessions));
        }
        Err(e) => {
          let _ = tx.send(Event::Error(e.to_string()));
        }
      }
    });
  }
}

/// One output line of the `reports` command
fn report_line(name: &str, outcome: &Result<ReportPayload, ReportError>) -> serde_json::Value {
  match outcome {
    Ok(report) => json!({
      "report": name,
      "data": report.data,
      "summary": report.summary,
    }),
    Err(e) => json!({
      "report": name,
      "error": e.to_string(),
    }),
  }
}
