//! Connection states and the reconnect/backoff transition function.

use std::fmt;
use std::time::Duration;

/// Lifecycle of the live channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
  Connecting,
  Open,
  Disconnected,
  /// Waiting `delay` before reconnect attempt number `attempt` (1-based)
  Reconnecting { attempt: u32, delay: Duration },
  /// Push channel given up; state is kept fresh by polling
  PollingFallback,
  Closed,
}

impl ConnectionState {
  /// Whether the state machine has stopped trying to hold a push connection.
  pub fn is_terminal(&self) -> bool {
    matches!(self, ConnectionState::PollingFallback | ConnectionState::Closed)
  }
}

impl fmt::Display for ConnectionState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConnectionState::Connecting => f.write_str("connecting"),
      ConnectionState::Open => f.write_str("open"),
      ConnectionState::Disconnected => f.write_str("disconnected"),
      ConnectionState::Reconnecting { attempt, delay } => {
        write!(f, "reconnecting (attempt {} in {:?})", attempt, delay)
      }
      ConnectionState::PollingFallback => f.write_str("polling"),
      ConnectionState::Closed => f.write_str("closed"),
    }
  }
}

/// Exponential backoff configuration for reconnection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
  /// Delay before the first reconnect attempt.
  pub base_delay: Duration,
  /// Maximum delay between attempts.
  pub max_delay: Duration,
  /// Attempts before falling back to polling.
  pub max_attempts: u32,
  /// Resync interval once in polling fallback.
  pub poll_interval: Duration,
}

impl Default for ReconnectPolicy {
  fn default() -> Self {
    Self {
      base_delay: Duration::from_millis(1000),
      max_delay: Duration::from_millis(10_000),
      max_attempts: 5,
      poll_interval: Duration::from_secs(10),
    }
  }
}

impl ReconnectPolicy {
  /// Calculate the delay for a given attempt number (0-indexed).
  pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    self
      .base_delay
      .checked_mul(factor)
      .map_or(self.max_delay, |delay| delay.min(self.max_delay))
  }
}

/// What the driver should do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
  /// Sleep `delay`, then issue a new connection attempt
  Reconnect { delay: Duration },
  /// Stop reconnecting and start polling
  FallBackToPolling,
  /// Nothing to schedule
  Stay,
}

/// Pure reconnect state machine. The async driver in `client.rs` feeds it
/// transport outcomes and carries out the returned transitions.
#[derive(Debug, Clone)]
pub struct ConnectionMachine {
  policy: ReconnectPolicy,
  state: ConnectionState,
  attempts: u32,
  /// Set once the channel has been open, so a later open is a reconnect
  was_open: bool,
}

impl ConnectionMachine {
  pub fn new(policy: ReconnectPolicy) -> Self {
    Self {
      policy,
      state: ConnectionState::Connecting,
      attempts: 0,
      was_open: false,
    }
  }

  pub fn state(&self) -> ConnectionState {
    self.state
  }

  pub fn attempts(&self) -> u32 {
    self.attempts
  }

  pub fn policy(&self) -> &ReconnectPolicy {
    &self.policy
  }

  /// The server confirmed the stream. Returns true when this open follows
  /// a disconnect, meaning missed events must be covered by a resync.
  pub fn on_open(&mut self) -> bool {
    if self.state.is_terminal() {
      return false;
    }
    let reopened = self.was_open || self.attempts > 0;
    self.state = ConnectionState::Open;
    self.attempts = 0;
    self.was_open = true;
    reopened
  }

  /// The transport closed or failed, whether it was open or still connecting.
  pub fn on_disconnect(&mut self) -> Transition {
    if self.state.is_terminal() {
      return Transition::Stay;
    }
    self.state = ConnectionState::Disconnected;

    if self.attempts >= self.policy.max_attempts {
      self.state = ConnectionState::PollingFallback;
      return Transition::FallBackToPolling;
    }

    let delay = self.policy.delay_for_attempt(self.attempts);
    self.attempts += 1;
    self.state = ConnectionState::Reconnecting {
      attempt: self.attempts,
      delay,
    };
    Transition::Reconnect { delay }
  }

  /// The backoff delay elapsed; a new attempt is being issued.
  pub fn on_retry(&mut self) {
    if matches!(self.state, ConnectionState::Reconnecting { .. }) {
      self.state = ConnectionState::Connecting;
    }
  }

  /// Explicit teardown. Final.
  pub fn close(&mut self) {
    self.state = ConnectionState::Closed;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_policy() {
    let policy = ReconnectPolicy::default();
    assert_eq!(policy.base_delay, Duration::from_millis(1000));
    assert_eq!(policy.max_delay, Duration::from_millis(10_000));
    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.poll_interval, Duration::from_secs(10));
  }

  #[test]
  fn test_delay_capped_at_max() {
    let policy = ReconnectPolicy::default();
    assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(1000));
    assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(8000));
    assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(10_000));
    assert_eq!(policy.delay_for_attempt(40), Duration::from_millis(10_000));
  }

  #[test]
  fn test_five_failures_then_polling() {
    let mut machine = ConnectionMachine::new(ReconnectPolicy::default());
    assert!(!machine.on_open());

    let mut delays = Vec::new();
    loop {
      match machine.on_disconnect() {
        Transition::Reconnect { delay } => {
          delays.push(delay.as_millis());
          machine.on_retry();
          assert_eq!(machine.state(), ConnectionState::Connecting);
        }
        Transition::FallBackToPolling => break,
        Transition::Stay => panic!("unexpected stay"),
      }
    }

    assert_eq!(delays, vec![1000, 2000, 4000, 8000, 10_000]);
    assert_eq!(machine.state(), ConnectionState::PollingFallback);

    // Terminal for the push channel
    assert_eq!(machine.on_disconnect(), Transition::Stay);
    assert!(!machine.on_open());
    assert_eq!(machine.state(), ConnectionState::PollingFallback);
  }

  #[test]
  fn test_open_resets_attempts() {
    let mut machine = ConnectionMachine::new(ReconnectPolicy::default());
    machine.on_open();
    machine.on_disconnect();
    machine.on_retry();
    machine.on_disconnect();
    machine.on_retry();
    assert_eq!(machine.attempts(), 2);

    assert!(machine.on_open(), "open after a disconnect is a reconnect");
    assert_eq!(machine.attempts(), 0);
    assert_eq!(
      machine.on_disconnect(),
      Transition::Reconnect {
        delay: Duration::from_millis(1000)
      }
    );
  }

  #[test]
  fn test_initial_connect_failure_counts_as_attempt() {
    let mut machine = ConnectionMachine::new(ReconnectPolicy::default());
    assert_eq!(
      machine.on_disconnect(),
      Transition::Reconnect {
        delay: Duration::from_millis(1000)
      }
    );
    machine.on_retry();
    assert!(machine.on_open());
  }

  #[test]
  fn test_close_is_final() {
    let mut machine = ConnectionMachine::new(ReconnectPolicy::default());
    machine.on_open();
    machine.close();
    assert_eq!(machine.on_disconnect(), Transition::Stay);
    assert!(!machine.on_open());
    assert_eq!(machine.state(), ConnectionState::Closed);
  }
}
