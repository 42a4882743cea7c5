//! Error types for the ranging driver.

use core::fmt;

use embedded_hal::digital::ErrorKind;

/// Which echo wait ran out of ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoPhase {
    /// Echo was still high from a previous cycle and never dropped.
    StaleHigh,
    /// Echo never rose after the trigger pulse.
    Rise,
    /// Echo rose but never fell.
    Fall,
}

/// Errors that can occur while ranging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangerError {
    /// Trigger or echo pin access failed.
    Pin(ErrorKind),

    /// The sensor did not respond within the tick budget.
    Timeout(EchoPhase),
}

impl RangerError {
    /// `true` for a sensor non-response, as opposed to a pin failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RangerError::Timeout(_))
    }
}

impl fmt::Display for RangerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RangerError::Pin(kind) => write!(f, "Pin error: {:?}", kind),
            RangerError::Timeout(EchoPhase::StaleHigh) => write!(f, "Timeout waiting for stale echo to end"),
            RangerError::Timeout(EchoPhase::Rise) => write!(f, "Timeout waiting for echo to go high"),
            RangerError::Timeout(EchoPhase::Fall) => write!(f, "Timeout waiting for echo to go low"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RangerError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RangerError::Pin(_) => defmt::write!(f, "Pin error"),
            RangerError::Timeout(phase) => defmt::write!(f, "Echo timeout ({})", phase),
        }
    }
}
