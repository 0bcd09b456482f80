//! Connection state machine for the live update channel.
//!
//! [`LiveChannel`] owns the connection state and decides, synchronously,
//! whether a transport event should change it. It performs no I/O: the
//! async driver in `connection` reports what the socket did and acts on
//! the returned [`ConnectAttempt`] / [`ReconnectTimer`] values.
//!
//! Every close of the active connection schedules exactly one reconnect
//! timer. A timer is honoured only if, when it fires, the channel is still
//! disconnected and no later close has superseded it.

use std::time::Duration;

use tracing::{debug, info};

/// Connection state shown by the status indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    /// Returns a display string for the state.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Connected => "Connected",
        }
    }
}

/// Token for one connection attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectAttempt {
    pub id: u64,
}

/// A reconnect scheduled by a close event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconnectTimer {
    /// Close epoch that scheduled this timer.
    pub epoch: u64,
    /// How long to wait before firing.
    pub delay: Duration,
}

/// State machine behind the live update channel.
#[derive(Debug)]
pub struct LiveChannel {
    state: ConnectionState,
    reconnect_delay: Duration,
    /// Connection currently connecting or connected.
    active: Option<u64>,
    next_id: u64,
    close_epoch: u64,
}

impl LiveChannel {
    /// Creates a disconnected channel with a fixed reconnect delay.
    #[must_use]
    pub fn new(reconnect_delay: Duration) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            reconnect_delay,
            active: None,
            next_id: 0,
            close_epoch: 0,
        }
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Starts a new connection attempt.
    ///
    /// Any previous connection stops being the active one; its late close
    /// or open events are ignored.
    pub fn connect(&mut self) -> ConnectAttempt {
        self.next_id += 1;
        let attempt = ConnectAttempt { id: self.next_id };
        if let Some(previous) = self.active.replace(attempt.id) {
            debug!(previous, connection = attempt.id, "Superseding previous connection");
        }
        self.state = ConnectionState::Connecting;
        attempt
    }

    /// Records that `attempt` finished its handshake.
    ///
    /// Returns `false` if the attempt has been superseded, in which case the
    /// caller should drop the socket.
    pub fn on_open(&mut self, attempt: ConnectAttempt) -> bool {
        if self.active != Some(attempt.id) {
            debug!(connection = attempt.id, "Ignoring open of superseded connection");
            return false;
        }
        self.state = ConnectionState::Connected;
        info!(connection = attempt.id, "Live channel connected");
        true
    }

    /// Records that `attempt` closed (or failed to open).
    ///
    /// Returns the single reconnect timer this close schedules, or `None`
    /// when the closing connection had already been superseded.
    pub fn on_close(&mut self, attempt: ConnectAttempt) -> Option<ReconnectTimer> {
        if self.active != Some(attempt.id) {
            debug!(connection = attempt.id, "Ignoring close of superseded connection");
            return None;
        }
        self.active = None;
        self.state = ConnectionState::Disconnected;
        self.close_epoch += 1;

        info!(
            connection = attempt.id,
            delay_ms = self.reconnect_delay.as_millis() as u64,
            "Live channel closed, reconnect scheduled"
        );
        Some(ReconnectTimer {
            epoch: self.close_epoch,
            delay: self.reconnect_delay,
        })
    }

    /// Fires a reconnect timer.
    ///
    /// Checks the state at fire time: returns a new attempt only when the
    /// channel is disconnected and `timer` is the most recent one scheduled.
    pub fn on_reconnect_timer(&mut self, timer: ReconnectTimer) -> Option<ConnectAttempt> {
        if self.state != ConnectionState::Disconnected {
            debug!(epoch = timer.epoch, state = self.state.label(), "Reconnect timer is stale");
            return None;
        }
        if timer.epoch != self.close_epoch {
            debug!(epoch = timer.epoch, latest = self.close_epoch, "Reconnect timer superseded");
            return None;
        }
        Some(self.connect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(5000);

    #[test]
    fn starts_disconnected() {
        assert_eq!(LiveChannel::new(DELAY).state(), ConnectionState::Disconnected);
    }

    #[test]
    fn open_transitions_to_connected() {
        let mut channel = LiveChannel::new(DELAY);
        let attempt = channel.connect();
        assert_eq!(channel.state(), ConnectionState::Connecting);
        assert!(channel.on_open(attempt));
        assert_eq!(channel.state(), ConnectionState::Connected);
    }

    #[test]
    fn close_schedules_exactly_one_reconnect() {
        let mut channel = LiveChannel::new(DELAY);
        let attempt = channel.connect();
        channel.on_open(attempt);

        let timer = channel.on_close(attempt).unwrap();
        assert_eq!(timer.delay, DELAY);
        assert_eq!(channel.state(), ConnectionState::Disconnected);

        // A repeated close for the same connection schedules nothing more.
        assert!(channel.on_close(attempt).is_none());
    }

    #[test]
    fn timer_fires_reconnect_when_still_disconnected() {
        let mut channel = LiveChannel::new(DELAY);
        let attempt = channel.connect();
        let timer = channel.on_close(attempt).unwrap();

        let retry = channel.on_reconnect_timer(timer).unwrap();
        assert_ne!(retry, attempt);
        assert_eq!(channel.state(), ConnectionState::Connecting);
    }

    #[test]
    fn timer_is_noop_after_newer_connection_succeeds() {
        let mut channel = LiveChannel::new(DELAY);
        let first = channel.connect();
        channel.on_open(first);
        let timer = channel.on_close(first).unwrap();

        let second = channel.connect();
        assert!(channel.on_open(second));

        assert!(channel.on_reconnect_timer(timer).is_none());
        assert_eq!(channel.state(), ConnectionState::Connected);
    }

    #[test]
    fn timer_is_noop_while_attempt_pending() {
        let mut channel = LiveChannel::new(DELAY);
        let first = channel.connect();
        let timer = channel.on_close(first).unwrap();
        channel.connect();

        assert!(channel.on_reconnect_timer(timer).is_none());
    }

    #[test]
    fn only_latest_of_three_close_timers_reconnects() {
        let mut channel = LiveChannel::new(DELAY);
        let mut timers = Vec::new();
        for _ in 0..3 {
            let attempt = channel.connect();
            channel.on_open(attempt);
            timers.push(channel.on_close(attempt).unwrap());
        }
        assert!(timers.iter().all(|t| t.delay == DELAY));

        assert!(channel.on_reconnect_timer(timers[0]).is_none());
        assert!(channel.on_reconnect_timer(timers[1]).is_none());
        assert!(channel.on_reconnect_timer(timers[2]).is_some());
        assert_eq!(channel.state(), ConnectionState::Connecting);
    }

    #[test]
    fn late_close_of_superseded_connection_is_ignored() {
        let mut channel = LiveChannel::new(DELAY);
        let old = channel.connect();
        channel.on_open(old);

        let new = channel.connect();
        channel.on_open(new);

        assert!(channel.on_close(old).is_none());
        assert_eq!(channel.state(), ConnectionState::Connected);
    }

    #[test]
    fn late_open_of_superseded_connection_is_rejected() {
        let mut channel = LiveChannel::new(DELAY);
        let old = channel.connect();
        let new = channel.connect();

        assert!(!channel.on_open(old));
        assert_eq!(channel.state(), ConnectionState::Connecting);
        assert!(channel.on_open(new));
    }
}
