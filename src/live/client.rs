//! Live update client: holds the push connection and drives reconnection.
//!
//! The driver is one task processing frames sequentially, so effects reach
//! subscribers in delivery order and no two events are ever handled at once.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt, TryStreamExt};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::events::{LiveEffect, LiveEvent};
use super::sse::{SseDecoder, SseFrame};
use super::state::{ConnectionMachine, ConnectionState, ReconnectPolicy, Transition};
use crate::api::client::PortalClient;
use crate::error::LiveError;

/// Lower bound on the polling fallback period.
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Frames from one connection, in delivery order.
pub type FrameStream = BoxStream<'static, Result<SseFrame, LiveError>>;

/// Opens push connections. One call per connection attempt.
pub trait LiveTransport: Send + Sync + 'static {
  fn connect(&self, token: &str) -> BoxFuture<'static, Result<FrameStream, LiveError>>;
}

/// SSE over HTTP against the portal's live sessions stream.
pub struct HttpTransport {
  client: PortalClient,
}

impl HttpTransport {
  pub fn new(client: PortalClient) -> Self {
    Self { client }
  }
}

impl LiveTransport for HttpTransport {
  fn connect(&self, token: &str) -> BoxFuture<'static, Result<FrameStream, LiveError>> {
    let url: Result<Url, LiveError> = self
      .client
      .live_stream_url(token)
      .map_err(|e| LiveError::Connection(e.to_string()));
    let http = self.client.http().clone();

    async move {
      let response = http
        .get(url?)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| LiveError::Connection(e.to_string()))?;

      let mut decoder = SseDecoder::new();
      let frames = response
        .bytes_stream()
        .map(move |chunk| match chunk {
          Ok(bytes) => Ok(stream::iter(
            decoder
              .feed(&bytes)
              .into_iter()
              .map(Ok::<SseFrame, LiveError>),
          )),
          Err(e) => Err(LiveError::Connection(e.to_string())),
        })
        .try_flatten()
        .boxed();

      Ok(frames)
    }
    .boxed()
  }
}

/// A configured but not yet started live client.
///
/// Subscribe before calling `start` to be sure no effect is missed.
pub struct LiveClient<T: LiveTransport> {
  transport: T,
  token: String,
  policy: ReconnectPolicy,
  effects: broadcast::Sender<LiveEffect>,
}

impl<T: LiveTransport> LiveClient<T> {
  /// Fails with `LiveError::Auth` when there is no usable credential. No
  /// connection is attempted in that case.
  pub fn new(token: Option<&str>, policy: ReconnectPolicy, transport: T) -> Result<Self, LiveError> {
    let token = token
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .ok_or(LiveError::Auth)?;
    let (effects, _) = broadcast::channel(256);

    Ok(Self {
      transport,
      token: token.to_string(),
      policy,
      effects,
    })
  }

  pub fn subscribe(&self) -> broadcast::Receiver<LiveEffect> {
    self.effects.subscribe()
  }

  /// Spawn the connection driver.
  pub fn start(self) -> LiveHandle {
    let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
    let shutdown = CancellationToken::new();

    let driver = Driver {
      transport: self.transport,
      token: self.token,
      machine: ConnectionMachine::new(self.policy),
      effects: self.effects.clone(),
      state: state_tx,
      shutdown: shutdown.clone(),
    };
    let task = tokio::spawn(driver.run());

    LiveHandle {
      effects: self.effects,
      state: state_rx,
      shutdown,
      task: Some(task),
    }
  }
}

/// Handle to a running live client. Dropping it tears the connection down.
pub struct LiveHandle {
  effects: broadcast::Sender<LiveEffect>,
  state: watch::Receiver<ConnectionState>,
  shutdown: CancellationToken,
  task: Option<JoinHandle<()>>,
}

impl LiveHandle {
  /// Receive effects from now on. Drop the receiver to unsubscribe.
  #[allow(dead_code)]
  pub fn subscribe(&self) -> broadcast::Receiver<LiveEffect> {
    self.effects.subscribe()
  }

  pub fn state(&self) -> ConnectionState {
    *self.state.borrow()
  }

  pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
    self.state.clone()
  }

  /// Tear down: cancel timers, close the transport, and wait for the driver
  /// to stop. No effect is published after this returns.
  pub async fn close(mut self) {
    self.shutdown.cancel();
    if let Some(task) = self.task.take() {
      if let Err(e) = task.await {
        warn!("live driver ended abnormally: {}", e);
      }
    }
  }
}

impl Drop for LiveHandle {
  fn drop(&mut self) {
    self.shutdown.cancel();
  }
}

struct Driver<T: LiveTransport> {
  transport: T,
  token: String,
  machine: ConnectionMachine,
  effects: broadcast::Sender<LiveEffect>,
  state: watch::Sender<ConnectionState>,
  shutdown: CancellationToken,
}

impl<T: LiveTransport> Driver<T> {
  async fn run(mut self) {
    let shutdown = self.shutdown.clone();

    loop {
      self.publish();
      let lost = tokio::select! {
        biased;
        _ = shutdown.cancelled() => break,
        lost = self.pump() => lost,
      };
      warn!("live connection lost: {}", lost);

      match self.machine.on_disconnect() {
        Transition::Reconnect { delay } => {
          info!(attempt = self.machine.attempts(), ?delay, "reconnecting");
          self.publish();
          tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
          }
          self.machine.on_retry();
        }
        Transition::FallBackToPolling => {
          info!(
            attempts = self.machine.policy().max_attempts,
            "reconnect budget exhausted, falling back to polling"
          );
          self.publish();
          self.poll(&shutdown).await;
          break;
        }
        Transition::Stay => break,
      }
    }

    self.machine.close();
    self.publish();
    info!("live client closed");
  }

  /// Hold one connection until it ends. Returns why it ended.
  async fn pump(&mut self) -> LiveError {
    let mut frames = match self.transport.connect(&self.token).await {
      Ok(frames) => frames,
      Err(e) => return e,
    };

    while let Some(frame) = frames.next().await {
      let frame = match frame {
        Ok(frame) => frame,
        Err(e) => return e,
      };

      debug!(event = %frame.event, id = ?frame.id, "live frame");
      match LiveEvent::from_frame(&frame) {
        LiveEvent::Connected => {
          let reopened = self.machine.on_open();
          info!("live channel open");
          self.publish();
          if reopened {
            // Anything sent while we were away is covered by a full resync
            self.emit(LiveEffect::Resync);
          }
        }
        LiveEvent::Disconnected => {
          return LiveError::Connection("server announced disconnect".to_string());
        }
        LiveEvent::Unknown(name) => debug!(%name, "ignoring unrecognized event"),
        event => {
          if self.machine.state() != ConnectionState::Open {
            debug!(?event, "ignoring event before the channel is open");
            continue;
          }
          if let Some(effect) = event.effect() {
            self.emit(effect);
          }
        }
      }
    }

    LiveError::Connection("stream ended".to_string())
  }

  /// Degraded mode: resync on a fixed interval until shut down. The push
  /// channel is not retried from here.
  async fn poll(&self, shutdown: &CancellationToken) {
    let period = self.machine.policy().poll_interval.max(MIN_POLL_INTERVAL);
    let mut interval = tokio::time::interval(period);
    loop {
      tokio::select! {
        biased;
        _ = shutdown.cancelled() => return,
        _ = interval.tick() => self.emit(LiveEffect::Resync),
      }
    }
  }

  fn emit(&self, effect: LiveEffect) {
    // No subscribers is not an error; the view may not be mounted yet.
    let _ = self.effects.send(effect);
  }

  fn publish(&self) {
    let state = self.machine.state();
    debug!(%state, "live state");
    self.state.send_replace(state);
  }
}
