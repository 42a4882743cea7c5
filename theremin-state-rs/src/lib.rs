//! Core state for the ultrasonic theremin.
//!
//! - [`playback`] holds the musical vocabulary ([`Note`](playback::Note),
//!   [`Octave`](playback::Octave), [`VolumeLevel`](playback::VolumeLevel)),
//!   the distance → note quantizer, and the [`SharedPlayback`](playback::SharedPlayback)
//!   handle through which the foreground loop, the volume sampler and the
//!   melody player communicate.
//! - [`idle_watchdog`] is the armed/firing state machine that decides when
//!   the reference melody should auto-play.
//!
//! Both modules are `no_std`, heap-free and independent of any particular
//! HAL, so they run unchanged in host tests and on the target.

#![no_std]

pub mod idle_watchdog;
pub mod playback;
