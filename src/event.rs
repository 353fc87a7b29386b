use tokio::sync::{broadcast, mpsc, watch};

use crate::api::types::LiveSession;
use crate::live::{ConnectionState, LiveEffect};

/// Application events
#[derive(Debug)]
pub enum Event {
  /// Effect published by the live client
  Live(LiveEffect),
  /// The live connection changed state
  State(ConnectionState),
  /// The effect subscription fell behind and dropped effects
  Lagged(u64),
  /// A resynchronizing fetch completed
  SessionsLoaded(Vec<LiveSession>),
  /// A background task failed
  Error(String),
}

/// Merges live effects, connection state and task results into one stream
pub struct EventHandler {
  tx: mpsc::UnboundedSender<Event>,
  rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
  pub fn new(
    mut effects: broadcast::Receiver<LiveEffect>,
    mut state: watch::Receiver<ConnectionState>,
  ) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();

    // Forward effects in the order the client published them
    let effect_tx = tx.clone();
    tokio::spawn(async move {
      loop {
        let event = match effects.recv().await {
          Ok(effect) => Event::Live(effect),
          Err(broadcast::error::RecvError::Lagged(missed)) => Event::Lagged(missed),
          Err(broadcast::error::RecvError::Closed) => break,
        };
        if effect_tx.send(event).is_err() {
          break;
        }
      }
    });

    let state_tx = tx.clone();
    tokio::spawn(async move {
      while state.changed().await.is_ok() {
        let current = *state.borrow_and_update();
        if state_tx.send(Event::State(current)).is_err() {
          break;
        }
      }
    });

    Self { tx, rx }
  }

  /// Sender for async tasks reporting back to the app
  pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
    self.tx.clone()
  }

  /// Receive the next event
  pub async fn next(&mut self) -> Option<Event> {
    self.rx.recv().await
  }
}
