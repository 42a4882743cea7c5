//! Bit-banged shift register primitives.
//!
//! A bit is presented on the data line and clocked in on the rising edge of
//! the clock line. After eight bits, a latch pulse copies the shift stages to
//! the outputs in one step, so the display never shows a half-shifted
//! pattern.
//!
//! This module is crate-private. Consumers interact with
//! [`ShiftRegisterDisplay`](crate::ShiftRegisterDisplay) instead.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::error::DisplayError;

/// The three lines of a serial-in, parallel-out shift register.
pub(crate) struct ShiftRegister<DATA, CLK, LATCH> {
    data: DATA,
    clock: CLK,
    latch: LATCH,
}

impl<DATA, CLK, LATCH, E> ShiftRegister<DATA, CLK, LATCH>
where
    DATA: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
{
    pub fn new(data: DATA, clock: CLK, latch: LATCH) -> Self {
        Self { data, clock, latch }
    }

    pub fn release(self) -> (DATA, CLK, LATCH) {
        (self.data, self.clock, self.latch)
    }

    /// Shift `bits` in, element 0 first, then latch them to the outputs.
    ///
    /// Both the clock and the latch are held high for `pulse_us`.
    pub fn write<D: DelayNs>(
        &mut self,
        bits: &[bool; 8],
        delay: &mut D,
        pulse_us: u32,
    ) -> Result<(), DisplayError<E>> {
        for &bit in bits {
            self.data.set_state(PinState::from(bit))?;
            self.clock.set_high()?;
            delay.delay_us(pulse_us);
            self.clock.set_low()?;
        }

        self.latch.set_high()?;
        delay.delay_us(pulse_us);
        self.latch.set_low()?;

        Ok(())
    }
}
