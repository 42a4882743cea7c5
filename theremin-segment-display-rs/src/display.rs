//! Shift-register backed [`DisplaySink`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::driver::ShiftRegister;
use crate::error::DisplayError;
use crate::pattern::SegmentPattern;
use crate::sink::DisplaySink;

/// Default clock and latch pulse width: 500 µs.
pub const DEFAULT_PULSE_US: u32 = 500;

/// Shift register timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftRegisterConfig {
    /// High time of every clock and latch pulse. Default: 500 µs.
    pub pulse_us: u32,
}

impl Default for ShiftRegisterConfig {
    fn default() -> Self {
        Self {
            pulse_us: DEFAULT_PULSE_US,
        }
    }
}

/// 8-segment display behind a serial-in, parallel-out shift register.
///
/// # Example
///
/// ```ignore
/// use theremin_segment_display::{DisplaySink, SegmentPattern, ShiftRegisterConfig, ShiftRegisterDisplay};
///
/// let mut display = ShiftRegisterDisplay::new(data, clock, latch, delay, ShiftRegisterConfig::default());
/// display.init()?;                       // blank
/// display.show(SegmentPattern::A)?;
/// ```
pub struct ShiftRegisterDisplay<DATA, CLK, LATCH, DELAY> {
    register: ShiftRegister<DATA, CLK, LATCH>,
    delay: DELAY,
    config: ShiftRegisterConfig,
    shown: Option<SegmentPattern>,
}

impl<DATA, CLK, LATCH, DELAY, E> ShiftRegisterDisplay<DATA, CLK, LATCH, DELAY>
where
    DATA: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Create a new display. No pin traffic until [`init()`](Self::init).
    pub fn new(data: DATA, clock: CLK, latch: LATCH, delay: DELAY, config: ShiftRegisterConfig) -> Self {
        Self {
            register: ShiftRegister::new(data, clock, latch),
            delay,
            config,
            shown: None,
        }
    }

    /// Blank the display.
    pub fn init(&mut self) -> Result<(), DisplayError<E>> {
        self.show(SegmentPattern::BLANK)
    }

    /// Last pattern successfully latched, `None` before the first update.
    pub fn shown(&self) -> Option<SegmentPattern> {
        self.shown
    }

    pub fn config(&self) -> &ShiftRegisterConfig {
        &self.config
    }

    /// Give the pins and the delay back.
    pub fn release(self) -> (DATA, CLK, LATCH, DELAY) {
        let (data, clock, latch) = self.register.release();
        (data, clock, latch, self.delay)
    }
}

impl<DATA, CLK, LATCH, DELAY, E> DisplaySink for ShiftRegisterDisplay<DATA, CLK, LATCH, DELAY>
where
    DATA: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
    DELAY: DelayNs,
{
    type Error = DisplayError<E>;

    fn show(&mut self, pattern: SegmentPattern) -> Result<(), Self::Error> {
        self.register
            .write(&pattern.0, &mut self.delay, self.config.pulse_us)?;
        self.shown = Some(pattern);
        Ok(())
    }
}
