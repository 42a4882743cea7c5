//! High-level ranging interface.
//!
//! [`Ranger`] owns the trigger output, the echo input and a blocking delay.
//! One call to [`measure_distance()`](Ranger::measure_distance) runs a full
//! ranging cycle and returns a slope-corrected distance in centimeters.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error, InputPin, OutputPin};

use crate::calibration::{
    CYCLES_PER_TICK, CYCLE_PERIOD_US, DEFAULT_TIMEOUT_TICKS, OFFSET_CYCLES, SLOPE_CORRECTION,
    SPEED_OF_SOUND_CM_PER_US, TRIGGER_PULSE_US, TRIGGER_SETTLE_US,
};
use crate::driver::EchoLine;
use crate::error::RangerError;

/// Ranging calibration and timeout policy.
///
/// [`RangerConfig::default()`] reproduces the calibrated values in
/// [`calibration`](crate::calibration). Override individual fields with
/// struct-update syntax when porting to a different core clock.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangerConfig {
    /// Poll ticks allowed for each echo wait before giving up. Default: 60 000.
    pub timeout_ticks: u32,
    /// Core clock cycles per poll tick. Default: 12.
    pub cycles_per_tick: u32,
    /// Fixed loop entry/exit overhead in cycles. Default: 15.
    pub offset_cycles: u32,
    /// Core clock period in microseconds. Default: 0.0625.
    pub cycle_period_us: f32,
    /// Proportional distance correction. Default: 0.1.
    pub slope_correction: f32,
}

impl Default for RangerConfig {
    fn default() -> Self {
        Self {
            timeout_ticks: DEFAULT_TIMEOUT_TICKS,
            cycles_per_tick: CYCLES_PER_TICK,
            offset_cycles: OFFSET_CYCLES,
            cycle_period_us: CYCLE_PERIOD_US,
            slope_correction: SLOPE_CORRECTION,
        }
    }
}

impl RangerConfig {
    /// Convert an echo tick count into a pulse width in microseconds.
    ///
    /// Formula: `(ticks × cycles_per_tick + offset_cycles) × cycle_period_us`.
    pub fn pulse_width_us(&self, ticks: u32) -> f32 {
        let cycles = ticks as u64 * self.cycles_per_tick as u64 + self.offset_cycles as u64;
        cycles as f32 * self.cycle_period_us
    }

    /// Convert a round-trip pulse width into a corrected one-way distance.
    ///
    /// Formula: `d = width × 0.034 / 2`, then `d + slope_correction × d`.
    pub fn distance_cm(&self, pulse_width_us: f32) -> f32 {
        let distance = pulse_width_us * SPEED_OF_SOUND_CM_PER_US / 2.0;
        distance + distance * self.slope_correction
    }
}

/// Trigger/echo ultrasonic rangefinder.
///
/// # Timing
///
/// Each measurement blocks the caller: 12 µs of trigger pulse, then up to
/// three echo waits of at most `timeout_ticks` polls each. Nothing else on
/// the core should run during the pulse-width count, or the tick time base
/// stretches and the distance reads long.
///
/// # Example
///
/// ```ignore
/// use ranger_driver::{Ranger, RangerConfig};
///
/// let mut ranger = Ranger::new(trigger, echo, delay, RangerConfig::default());
/// let cm = ranger.measure_distance()?;
/// ```
pub struct Ranger<TRIG, ECHO, DELAY> {
    trigger: TRIG,
    echo: EchoLine<ECHO>,
    delay: DELAY,
    config: RangerConfig,
}

impl<TRIG, ECHO, DELAY> Ranger<TRIG, ECHO, DELAY>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    DELAY: DelayNs,
{
    /// Create a new ranger.
    ///
    /// No pin traffic is generated until the first measurement.
    pub fn new(trigger: TRIG, echo: ECHO, delay: DELAY, config: RangerConfig) -> Self {
        Self {
            trigger,
            echo: EchoLine::new(echo, config.timeout_ticks),
            delay,
            config,
        }
    }

    pub fn config(&self) -> &RangerConfig {
        &self.config
    }

    /// Change the tick budget for subsequent measurements.
    pub fn set_timeout_ticks(&mut self, timeout_ticks: u32) {
        self.config.timeout_ticks = timeout_ticks;
        self.echo.set_timeout_ticks(timeout_ticks);
    }

    /// Run one ranging cycle and return the distance in centimeters.
    ///
    /// # Errors
    /// * [`RangerError::Timeout`] if any echo wait exhausts its tick budget
    /// * [`RangerError::Pin`] on a trigger or echo pin failure
    pub fn measure_distance(&mut self) -> Result<f32, RangerError> {
        let ticks = self.measure_ticks()?;
        let width_us = self.config.pulse_width_us(ticks);
        Ok(self.config.distance_cm(width_us))
    }

    /// Run one ranging cycle and return the raw echo tick count.
    pub fn measure_ticks(&mut self) -> Result<u32, RangerError> {
        self.fire_trigger()?;

        let result = self.read_echo();

        #[cfg(feature = "defmt")]
        if let Err(RangerError::Timeout(phase)) = result {
            defmt::warn!("Ranging timeout in phase {}", phase);
        }

        result
    }

    fn read_echo(&mut self) -> Result<u32, RangerError> {
        self.echo.drain_stale_high()?;
        self.echo.wait_for_rise()?;
        self.echo.count_high_ticks()
    }

    /// Low for the settle time, high for the pulse width, then low again.
    fn fire_trigger(&mut self) -> Result<(), RangerError> {
        self.trigger.set_low().map_err(|e| RangerError::Pin(e.kind()))?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trigger.set_high().map_err(|e| RangerError::Pin(e.kind()))?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(|e| RangerError::Pin(e.kind()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::error::EchoPhase;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::vec::Vec;

    // ── Mocks ────────────────────────────────────────────────────────

    #[derive(Default)]
    struct TriggerMock {
        levels: Vec<bool>,
    }

    impl ErrorType for TriggerMock {
        type Error = ErrorKind;
    }

    impl OutputPin for TriggerMock {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.levels.push(false);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.levels.push(true);
            Ok(())
        }
    }

    /// Echo line driven by read count: `stale` high reads, `gap` low
    /// reads, `high` high reads, then low forever.
    struct ScriptedEcho {
        stale: u32,
        gap: u32,
        high: u32,
        reads: u32,
    }

    impl ScriptedEcho {
        fn pulse(high: u32) -> Self {
            Self { stale: 0, gap: 5, high, reads: 0 }
        }
    }

    impl ErrorType for ScriptedEcho {
        type Error = ErrorKind;
    }

    impl InputPin for ScriptedEcho {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            let i = self.reads;
            self.reads += 1;
            Ok(if i < self.stale {
                true
            } else if i < self.stale + self.gap {
                false
            } else {
                i < self.stale + self.gap + self.high
            })
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|h| !h)
        }
    }

    struct FailingPin;

    impl ErrorType for FailingPin {
        type Error = ErrorKind;
    }

    impl InputPin for FailingPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    impl OutputPin for FailingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[derive(Default)]
    struct DelayMock {
        calls_ns: Vec<u32>,
    }

    impl DelayNs for DelayMock {
        fn delay_ns(&mut self, ns: u32) {
            self.calls_ns.push(ns);
        }
    }

    fn ranger(echo: ScriptedEcho) -> Ranger<TriggerMock, ScriptedEcho, DelayMock> {
        Ranger::new(TriggerMock::default(), echo, DelayMock::default(), RangerConfig::default())
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    // ── Conversions ──────────────────────────────────────────────────

    #[test]
    fn pulse_width_applies_scale_and_offset() {
        let c = RangerConfig::default();
        assert!(approx(c.pulse_width_us(0), 0.9375));
        assert!(approx(c.pulse_width_us(1000), 750.9375));
    }

    #[test]
    fn distance_applies_slope_correction() {
        let c = RangerConfig::default();
        // 1000 µs → 17 cm raw → 18.7 cm corrected.
        assert!(approx(c.distance_cm(1000.0), 18.7));
        assert!(approx(c.distance_cm(0.0), 0.0));
    }

    #[test]
    fn slope_correction_can_be_disabled() {
        let c = RangerConfig {
            slope_correction: 0.0,
            ..RangerConfig::default()
        };
        assert!(approx(c.distance_cm(1000.0), 17.0));
    }

    // ── Measurement cycle ────────────────────────────────────────────

    #[test]
    fn trigger_sequence_is_low_high_low() {
        let mut r = ranger(ScriptedEcho::pulse(10));
        r.measure_ticks().unwrap();
        assert_eq!(r.trigger.levels, [false, true, false]);
        assert_eq!(r.delay.calls_ns, [2_000, 10_000]);
    }

    #[test]
    fn counts_pulse_width_ticks() {
        let mut r = ranger(ScriptedEcho::pulse(855));
        assert_eq!(r.measure_ticks().unwrap(), 854);
    }

    #[test]
    fn rising_edge_read_is_not_counted() {
        // One read sees the rise, nine more see the line still high.
        let mut r = ranger(ScriptedEcho::pulse(10));
        assert_eq!(r.measure_ticks().unwrap(), 9);
        assert_eq!(r.echo_reads(), 5 + 10 + 1);
    }

    #[test]
    fn drains_stale_pulse_first() {
        let echo = ScriptedEcho { stale: 300, gap: 20, high: 41, reads: 0 };
        let mut r = ranger(echo);
        assert_eq!(r.measure_ticks().unwrap(), 40);
    }

    #[test]
    fn measures_twelve_centimeters() {
        // (854 × 12 + 15) × 0.0625 µs = 641.4375 µs → 10.904 cm → 11.995 cm
        let mut r = ranger(ScriptedEcho::pulse(855));
        let cm = r.measure_distance().unwrap();
        assert!((cm - 11.995).abs() < 0.01, "got {}", cm);
    }

    // ── Timeouts ─────────────────────────────────────────────────────

    #[test]
    fn no_echo_times_out_on_rise() {
        let echo = ScriptedEcho { stale: 0, gap: u32::MAX, high: 0, reads: 0 };
        let mut r = ranger(echo);
        r.set_timeout_ticks(100);
        assert_eq!(r.measure_distance(), Err(RangerError::Timeout(EchoPhase::Rise)));
        assert!(r.echo_reads() <= 101);
    }

    #[test]
    fn stuck_high_times_out_on_stale() {
        let echo = ScriptedEcho { stale: u32::MAX, gap: 0, high: 0, reads: 0 };
        let mut r = ranger(echo);
        r.set_timeout_ticks(100);
        assert_eq!(r.measure_distance(), Err(RangerError::Timeout(EchoPhase::StaleHigh)));
    }

    #[test]
    fn endless_pulse_times_out_on_fall() {
        let echo = ScriptedEcho { stale: 0, gap: 3, high: u32::MAX - 3, reads: 0 };
        let mut r = ranger(echo);
        r.set_timeout_ticks(100);
        let err = r.measure_distance().unwrap_err();
        assert_eq!(err, RangerError::Timeout(EchoPhase::Fall));
        assert!(err.is_timeout());
    }

    #[test]
    fn pulse_just_inside_budget_succeeds() {
        let mut r = ranger(ScriptedEcho::pulse(100));
        r.set_timeout_ticks(100);
        assert_eq!(r.measure_ticks().unwrap(), 99);
    }

    // ── Pin errors ───────────────────────────────────────────────────

    #[test]
    fn echo_pin_error_propagates() {
        let mut r = Ranger::new(TriggerMock::default(), FailingPin, DelayMock::default(), RangerConfig::default());
        let err = r.measure_distance().unwrap_err();
        assert_eq!(err, RangerError::Pin(ErrorKind::Other));
        assert!(!err.is_timeout());
    }

    #[test]
    fn trigger_pin_error_propagates() {
        let mut r = Ranger::new(FailingPin, ScriptedEcho::pulse(10), DelayMock::default(), RangerConfig::default());
        assert_eq!(r.measure_distance(), Err(RangerError::Pin(ErrorKind::Other)));
    }

    impl<TRIG> Ranger<TRIG, ScriptedEcho, DelayMock> {
        fn echo_reads(&self) -> u32 {
            self.echo.inner().reads
        }
    }
}
