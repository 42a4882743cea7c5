//! Foreground interaction cycle for the ultrasonic theremin.
//!
//! [`Controller`] ties the library crates together: it reads the octave
//! buttons, ranges the hand, quantizes the distance, shows and reports the
//! note, and plays it through the synthesizer, all through the
//! [`SharedPlayback`](theremin::playback::SharedPlayback) handle the melody
//! player also uses.
//!
//! The hardware it needs is expressed as small ports so the cycle runs in
//! host tests:
//!
//! | Port | Provided by |
//! |---|---|
//! | [`OctaveSelector`] | [`OctavePanel`] over `embedded-hal` pins |
//! | [`DistanceSensor`] | [`ranger_driver::Ranger`] |
//! | [`DisplaySink`](theremin_segment_display::DisplaySink) | [`ShiftRegisterDisplay`](theremin_segment_display::ShiftRegisterDisplay) |
//! | [`SerialSink`] | a UART wrapper in the firmware |
//! | [`AudioOutput`](theremin_tone::AudioOutput) | [`PwmAudio`](theremin_tone::PwmAudio) |
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`].
//! - **`task`**: the Embassy task bodies in [`task`] (foreground loop, idle
//!   watchdog, melody).

#![no_std]

pub mod controller;
pub mod error;
pub mod panel;
pub mod sensor;
pub mod serial;
#[cfg(feature = "task")]
pub mod task;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use controller::{Controller, ControllerConfig, CycleOutcome, CycleResult};
pub use error::ControllerError;
pub use panel::{OctavePanel, OctaveSelector};
pub use sensor::DistanceSensor;
pub use serial::{send_note, SerialSink};
#[cfg(feature = "task")]
pub use task::{foreground_task, idle_watchdog_task, melody_task, TaskSignals};
