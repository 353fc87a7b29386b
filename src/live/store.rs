//! Local state of the live sessions view.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::events::LiveEffect;
use crate::api::types::LiveSession;

/// A resynchronizing fetch the store needs before it is accurate again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncRequest;

#[derive(Debug, Default)]
pub struct LiveSessionStore {
  sessions: Vec<LiveSession>,
  /// Sessions closed locally that a snapshot may still list
  closed: HashSet<u64>,
  last_activity: Option<DateTime<Utc>>,
  synced_at: Option<DateTime<Utc>>,
}

impl LiveSessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Apply one effect. Returns a sync request when the effect cannot be
  /// applied locally.
  pub fn apply(&mut self, effect: LiveEffect) -> Option<SyncRequest> {
    self.last_activity = Some(Utc::now());
    match effect {
      LiveEffect::RemoveSession(id) => {
        self.sessions.retain(|s| s.id != id);
        self.closed.insert(id);
        None
      }
      LiveEffect::Resync => Some(SyncRequest),
      LiveEffect::Heartbeat => None,
    }
  }

  /// Replace local state with the result of a resynchronizing fetch.
  ///
  /// The snapshot may have been taken before a closure this store already
  /// applied; such sessions stay removed. A closed id is forgotten once a
  /// snapshot no longer lists it.
  pub fn replace_all(&mut self, mut sessions: Vec<LiveSession>) {
    self
      .closed
      .retain(|id| sessions.iter().any(|s| s.id == *id));
    sessions.retain(|s| !self.closed.contains(&s.id));
    self.sessions = sessions;
    self.synced_at = Some(Utc::now());
  }

  pub fn sessions(&self) -> &[LiveSession] {
    &self.sessions
  }

  pub fn get(&self, id: u64) -> Option<&LiveSession> {
    self.sessions.iter().find(|s| s.id == id)
  }

  pub fn len(&self) -> usize {
    self.sessions.len()
  }

  #[allow(dead_code)]
  pub fn is_empty(&self) -> bool {
    self.sessions.is_empty()
  }

  /// Last time any effect (including a heartbeat) reached the store.
  pub fn last_activity(&self) -> Option<DateTime<Utc>> {
    self.last_activity
  }

  pub fn synced_at(&self) -> Option<DateTime<Utc>> {
    self.synced_at
  }
}
