//! 8-segment note display for the ultrasonic theremin.
//!
//! # Architecture
//!
//! The crate is split into three layers:
//!
//! - **[`SegmentPattern`]**: the fixed, active-low segment pattern for each
//!   [`Note`](theremin::playback::Note), plus the blank pattern.
//! - **`driver`** (crate-private): bit-banged serial-in/parallel-out shift
//!   register primitives (data, clock and latch lines).
//! - **[`ShiftRegisterDisplay`]** (public): implements [`DisplaySink`] on top
//!   of the driver, blanking the display on [`init()`](ShiftRegisterDisplay::init).
//!
//! Anything else that can show a pattern can implement [`DisplaySink`]; the
//! controller only depends on the trait.
//!
//! # Quick start
//!
//! ```ignore
//! use theremin::playback::Note;
//! use theremin_segment_display::{DisplaySink, ShiftRegisterConfig, ShiftRegisterDisplay};
//!
//! // Any three `embedded-hal` output pins and a blocking delay.
//! let mut display = ShiftRegisterDisplay::new(data, clock, latch, delay, ShiftRegisterConfig::default());
//! display.init()?;
//! display.show_note(Note::A)?;
//! ```
//!
//! # Features
//!
//! - **`defmt`**: Enable [`defmt::Format`] implementations on the pattern
//!   and error types.

#![no_std]

pub use display::{ShiftRegisterConfig, ShiftRegisterDisplay, DEFAULT_PULSE_US};
pub use error::DisplayError;
pub use pattern::SegmentPattern;
pub use sink::DisplaySink;

mod display;
mod driver;
mod error;
mod pattern;
mod sink;
