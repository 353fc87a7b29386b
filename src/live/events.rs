//! Typed live events and the event -> effect table.
//!
//! Sync strategy: *coarse invalidation on push event*. Push events are
//! treated as hints, not as state. Apart from `session_closed`, which can be
//! applied exactly, every data-bearing event asks for a full resynchronizing
//! fetch instead of patching local state from a possibly partial payload.

use serde::Deserialize;

use super::sse::SseFrame;

/// Events the live sessions stream carries
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
  Connected,
  SessionStarted,
  SessionClosed { session_id: Option<u64> },
  BidReceived,
  BidRevised,
  Heartbeat,
  Disconnected,
  Unknown(String),
}

/// State mutation a live event asks subscribers to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveEffect {
  /// Re-fetch the full session list
  Resync,
  /// Drop one session from local state
  RemoveSession(u64),
  /// Liveness only, no state change
  Heartbeat,
}

#[derive(Debug, Deserialize)]
struct SessionRef {
  session_id: Option<u64>,
  id: Option<u64>,
}

impl LiveEvent {
  /// Decode a frame. Payloads are JSON objects; one that fails to parse
  /// leaves optional fields empty rather than dropping the event.
  pub fn from_frame(frame: &SseFrame) -> Self {
    match frame.event.as_str() {
      "connected" => LiveEvent::Connected,
      "session_started" => LiveEvent::SessionStarted,
      "session_closed" => {
        let session_id = serde_json::from_str::<SessionRef>(&frame.data)
          .ok()
          .and_then(|r| r.session_id.or(r.id));
        LiveEvent::SessionClosed { session_id }
      }
      "bid_received" => LiveEvent::BidReceived,
      "bid_revised" => LiveEvent::BidRevised,
      "heartbeat" => LiveEvent::Heartbeat,
      "disconnected" => LiveEvent::Disconnected,
      other => LiveEvent::Unknown(other.to_string()),
    }
  }

  /// The effect table. `Connected` and `Disconnected` drive the connection
  /// state machine instead and have no effect of their own; unknown events
  /// are ignored.
  pub fn effect(&self) -> Option<LiveEffect> {
    match self {
      LiveEvent::SessionStarted | LiveEvent::BidReceived | LiveEvent::BidRevised => {
        Some(LiveEffect::Resync)
      }
      LiveEvent::SessionClosed {
        session_id: Some(id),
      } => Some(LiveEffect::RemoveSession(*id)),
      // Without an id the only safe move is a full resync
      LiveEvent::SessionClosed { session_id: None } => Some(LiveEffect::Resync),
      LiveEvent::Heartbeat => Some(LiveEffect::Heartbeat),
      LiveEvent::Connected | LiveEvent::Disconnected | LiveEvent::Unknown(_) => None,
    }
  }
}
