//! Ranging calibration constants.
//!
//! These values encode empirical measurements taken on the prototype board and
//! must not be "simplified". The tick constants describe the cost of one
//! iteration of the echo polling loop; they change whenever that loop or
//! the core clock changes.

/// Trigger held low before the pulse, in microseconds.
pub const TRIGGER_SETTLE_US: u32 = 2;

/// Trigger pulse width, in microseconds.
pub const TRIGGER_PULSE_US: u32 = 10;

/// Core clock cycles spent per echo poll tick.
pub const CYCLES_PER_TICK: u32 = 12;

/// Fixed cycles spent entering and leaving the polling loop.
pub const OFFSET_CYCLES: u32 = 15;

/// Duration of one core clock cycle in microseconds (16 MHz).
pub const CYCLE_PERIOD_US: f32 = 0.0625;

/// Speed of sound in centimeters per microsecond.
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.034;

/// Proportional slope correction applied to every distance.
///
/// The sensor under-reads increasingly with range; adding 10 % of the raw
/// distance lines it back up with a tape measure over the playable range.
pub const SLOPE_CORRECTION: f32 = 0.1;

/// Default tick budget for each echo wait.
///
/// 60 000 ticks × 0.75 µs ≈ 45 ms, longer than the 38 ms pulse the sensor
/// emits when nothing reflects.
pub const DEFAULT_TIMEOUT_TICKS: u32 = 60_000;
