//! Audio output port and its adapters.
//!
//! [`AudioOutput`] is the only thing the synthesizer knows about the
//! speaker. Two adapters are provided:
//!
//! - [`PwmAudio`] drives any `embedded-hal` [`SetDutyCycle`] channel, for
//!   targets without a DAC.
//! - [`SharedAudio`] puts one output behind a blocking mutex so a
//!   preempting context (the melody player) and the foreground loop can
//!   each own a synthesizer over the same speaker.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::pwm::SetDutyCycle;

use crate::waveform::OUTPUT_FULL_SCALE;

/// Sink for 12-bit amplitude samples.
pub trait AudioOutput {
    type Error;

    /// Write one sample. Values above the sink's full scale are clamped.
    fn write(&mut self, sample: u16) -> Result<(), Self::Error>;
}

impl<T: AudioOutput + ?Sized> AudioOutput for &mut T {
    type Error = T::Error;

    fn write(&mut self, sample: u16) -> Result<(), Self::Error> {
        (**self).write(sample)
    }
}

// ── PWM adapter ──────────────────────────────────────────────────────────

/// Plays samples as the duty cycle of a PWM channel.
///
/// The sample is interpreted as a fraction of `full_scale`, so the PWM
/// counter top does not need to match the 12-bit sample range.
pub struct PwmAudio<P> {
    pwm: P,
    full_scale: u16,
}

impl<P: SetDutyCycle> PwmAudio<P> {
    /// Wrap a PWM channel using the 12-bit full scale.
    pub fn new(pwm: P) -> Self {
        Self::with_full_scale(pwm, OUTPUT_FULL_SCALE)
    }

    pub fn with_full_scale(pwm: P, full_scale: u16) -> Self {
        Self {
            pwm,
            full_scale: full_scale.max(1),
        }
    }

    /// Give the PWM channel back.
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> AudioOutput for PwmAudio<P> {
    type Error = P::Error;

    fn write(&mut self, sample: u16) -> Result<(), Self::Error> {
        self.pwm
            .set_duty_cycle_fraction(sample.min(self.full_scale), self.full_scale)
    }
}

// ── Shared adapter ───────────────────────────────────────────────────────

/// One audio output shared between execution contexts.
///
/// `&SharedAudio` implements [`AudioOutput`]; each write takes the lock
/// for a single sample only, so a higher-priority writer can interleave
/// with a lower-priority one mid-note.
pub struct SharedAudio<M: RawMutex, OUT> {
    inner: Mutex<M, RefCell<OUT>>,
}

impl<M: RawMutex, OUT> SharedAudio<M, OUT> {
    pub const fn new(output: OUT) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(output)),
        }
    }
}

impl<M: RawMutex, OUT: AudioOutput> AudioOutput for &SharedAudio<M, OUT> {
    type Error = OUT::Error;

    fn write(&mut self, sample: u16) -> Result<(), Self::Error> {
        self.inner.lock(|cell| cell.borrow_mut().write(sample))
    }
}
