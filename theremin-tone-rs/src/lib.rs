//! Table-driven tone synthesis for the ultrasonic theremin.
//!
//! This crate provides [`ToneSynthesizer`], which plays a
//! [`Note`](theremin::playback::Note) by walking a one-period sine table into
//! an [`AudioOutput`], and [`MelodyPlayer`], which sequences the whole scale
//! through a synthesizer while holding the shared playback override.
//!
//! # Quick Start
//!
//! ```ignore
//! use theremin::playback::{Note, Octave, VolumeLevel};
//! use theremin_tone::{PwmAudio, ToneConfig, ToneSynthesizer};
//!
//! // Any `embedded-hal` PWM channel and blocking delay.
//! let mut synth = ToneSynthesizer::new(PwmAudio::new(pwm), delay, ToneConfig::default());
//! synth.play(Note::C, Octave::One, VolumeLevel::High, 1000)?;
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`] and `defmt::Format`
//!   on the config and error types.

#![no_std]

pub mod error;
pub mod melody;
pub mod output;
pub mod synth;
pub mod waveform;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use error::MelodyError;
pub use melody::{MelodyConfig, MelodyPlayer};
pub use output::{AudioOutput, PwmAudio, SharedAudio};
pub use synth::{ToneConfig, ToneSynthesizer};
