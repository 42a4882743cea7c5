//! Low-level echo line primitives.
//!
//! Each wait polls the echo input in a tight loop and counts iterations
//! ("ticks"). The tick count doubles as the time base for the pulse-width
//! measurement, so the loops must stay free of anything but the pin read
//! and the counter.
//!
//! This module is crate-private. Consumers interact with [`Ranger`]
//! in `ranger.rs` instead.
//!
//! [`Ranger`]: crate::Ranger

use embedded_hal::digital::{Error, InputPin};

use crate::error::{EchoPhase, RangerError};

/// Echo input plus the tick budget applied to every wait.
pub(crate) struct EchoLine<ECHO> {
    echo: ECHO,
    timeout_ticks: u32,
}

impl<ECHO> EchoLine<ECHO>
where
    ECHO: InputPin,
{
    pub fn new(echo: ECHO, timeout_ticks: u32) -> Self {
        Self { echo, timeout_ticks }
    }

    pub fn set_timeout_ticks(&mut self, timeout_ticks: u32) {
        self.timeout_ticks = timeout_ticks;
    }

    #[cfg(test)]
    pub fn inner(&self) -> &ECHO {
        &self.echo
    }

    fn is_high(&mut self) -> Result<bool, RangerError> {
        self.echo.is_high().map_err(|e| RangerError::Pin(e.kind()))
    }

    /// Wait for any echo left over from a previous cycle to end.
    pub fn drain_stale_high(&mut self) -> Result<(), RangerError> {
        let mut ticks = 0u32;
        while self.is_high()? {
            ticks += 1;
            if ticks >= self.timeout_ticks {
                return Err(RangerError::Timeout(EchoPhase::StaleHigh));
            }
        }
        Ok(())
    }

    /// Wait for the echo to rise (start of the pulse).
    pub fn wait_for_rise(&mut self) -> Result<(), RangerError> {
        let mut ticks = 0u32;
        while !self.is_high()? {
            ticks += 1;
            if ticks >= self.timeout_ticks {
                return Err(RangerError::Timeout(EchoPhase::Rise));
            }
        }
        Ok(())
    }

    /// Count ticks until the echo falls (end of the pulse).
    ///
    /// Must be called right after [`wait_for_rise()`](Self::wait_for_rise).
    /// Only the reads made here count; the read that observed the rising
    /// edge is part of the loop entry cost in `offset_cycles`.
    pub fn count_high_ticks(&mut self) -> Result<u32, RangerError> {
        let mut ticks = 0u32;
        while self.is_high()? {
            ticks += 1;
            if ticks >= self.timeout_ticks {
                return Err(RangerError::Timeout(EchoPhase::Fall));
            }
        }
        Ok(ticks)
    }
}
