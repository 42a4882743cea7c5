//! Blocking driver for trigger/echo ultrasonic rangefinders (HC-SR04 and
//! compatibles).
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`driver`** (crate-private): Echo-line primitives: drain a stale
//!   pulse, wait for the rising edge, count poll ticks while the line is
//!   high. Every wait is bounded by a tick budget.
//! - **[`Ranger`]** (public): Fires the trigger pulse, runs the echo
//!   primitives, and turns the tick count into a calibrated distance.
//!
//! # Quick start
//!
//! ```ignore
//! use ranger_driver::{Ranger, RangerConfig};
//!
//! // Any `embedded-hal` 1.0 output pin, input pin and blocking delay.
//! let mut ranger = Ranger::new(trigger, echo, delay, RangerConfig::default());
//!
//! match ranger.measure_distance() {
//!     Ok(cm) => { /* quantize */ }
//!     Err(e) => { /* sensor disconnected or no echo */ }
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`**: Enable [`defmt::Format`] implementations on error types
//!   and log timeouts.

#![no_std]

pub use calibration::{
    CYCLES_PER_TICK, CYCLE_PERIOD_US, DEFAULT_TIMEOUT_TICKS, OFFSET_CYCLES, SLOPE_CORRECTION,
    SPEED_OF_SOUND_CM_PER_US, TRIGGER_PULSE_US, TRIGGER_SETTLE_US,
};
pub use error::{EchoPhase, RangerError};
pub use ranger::{Ranger, RangerConfig};

mod calibration;
mod driver;
mod error;
mod ranger;
