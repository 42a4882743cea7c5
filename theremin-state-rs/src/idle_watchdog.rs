//! Idle watchdog: decides when the reference melody should auto-play.
//!
//! [`IdleWatchdog`] is a pure two-state machine over a caller-supplied
//! monotonic millisecond clock. It owns no timer; the firmware task feeds
//! it `embassy_time::Instant::now().as_millis()` and sleeps until
//! [`deadline_ms()`](IdleWatchdog::deadline_ms).
//!
//! ```text
//!            arm(now)                      poll(now) past deadline
//!   ┌──────┐ ──────► ┌───────────────────┐ ──────────────────────► ┌────────┐
//!   │ new  │         │ Armed { deadline } │                         │ Firing │
//!   └──────┘         └───────────────────┘ ◄────────────────────── └────────┘
//!                      ▲      │ arm(now)          finish(now)
//!                      └──────┘ (resets deadline)
//! ```

/// Default inactivity interval before the melody plays: 30 s.
pub const DEFAULT_IDLE_INTERVAL_MS: u64 = 30_000;

/// Watchdog timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchdogConfig {
    /// Inactivity interval in milliseconds. Default: 30 000.
    pub interval_ms: u64,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_IDLE_INTERVAL_MS,
        }
    }
}

/// Current watchdog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogState {
    /// Counting toward `deadline_ms`.
    Armed { deadline_ms: u64 },
    /// Expired; the melody is playing.
    Firing,
}

/// Armed/firing inactivity timer.
///
/// # Examples
///
/// ```
/// use theremin::idle_watchdog::{IdleWatchdog, WatchdogConfig};
///
/// let mut wd = IdleWatchdog::new(WatchdogConfig { interval_ms: 100 }, 0);
/// assert!(!wd.poll(99));
/// assert!(wd.poll(100));   // fires exactly once
/// assert!(!wd.poll(500));
/// wd.finish(500);          // melody done, re-armed
/// assert_eq!(wd.deadline_ms(), Some(600));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdleWatchdog {
    config: WatchdogConfig,
    state: WatchdogState,
}

impl IdleWatchdog {
    /// Create a watchdog already armed at `now_ms`.
    pub fn new(config: WatchdogConfig, now_ms: u64) -> Self {
        Self {
            config,
            state: WatchdogState::Armed {
                deadline_ms: now_ms.saturating_add(config.interval_ms),
            },
        }
    }

    pub fn state(&self) -> WatchdogState {
        self.state
    }

    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    /// Restart the full interval from `now_ms`.
    ///
    /// Idempotent: re-arming an armed watchdog only moves its deadline, it
    /// never produces an extra expiry. Ignored while [`Firing`](WatchdogState::Firing);
    /// [`finish()`](Self::finish) re-arms once the melody is over.
    ///
    /// Returns `true` if the deadline was reset.
    pub fn arm(&mut self, now_ms: u64) -> bool {
        match self.state {
            WatchdogState::Armed { .. } => {
                self.state = WatchdogState::Armed {
                    deadline_ms: now_ms.saturating_add(self.config.interval_ms),
                };
                true
            }
            WatchdogState::Firing => false,
        }
    }

    /// Check for expiry at `now_ms`.
    ///
    /// Returns `true` exactly once per expiry, at which point the watchdog
    /// enters [`Firing`](WatchdogState::Firing).
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.state {
            WatchdogState::Armed { deadline_ms } if now_ms >= deadline_ms => {
                self.state = WatchdogState::Firing;
                true
            }
            _ => false,
        }
    }

    /// Leave [`Firing`](WatchdogState::Firing) and re-arm from `now_ms`.
    ///
    /// Also valid while armed, where it behaves like [`arm()`](Self::arm):
    /// the watchdog must never be left disarmed.
    pub fn finish(&mut self, now_ms: u64) {
        self.state = WatchdogState::Armed {
            deadline_ms: now_ms.saturating_add(self.config.interval_ms),
        };
    }

    /// Absolute deadline, or `None` while firing.
    pub fn deadline_ms(&self) -> Option<u64> {
        match self.state {
            WatchdogState::Armed { deadline_ms } => Some(deadline_ms),
            WatchdogState::Firing => None,
        }
    }

    /// Time left before expiry, or `None` while firing.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.deadline_ms().map(|d| d.saturating_sub(now_ms))
    }
}
