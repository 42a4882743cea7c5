//! Playback vocabulary and the shared state handle.
//!
//! This module provides the types the rest of the system agrees on: which
//! [`Note`] is sounding, in which [`Octave`], at what [`VolumeLevel`]. It
//! also owns the [`SharedPlayback`] handle, the only place these values live
//! while the system runs.
//!
//! # Producers and consumers
//!
//! ```text
//! foreground loop ──set_playback()──┐
//! volume sampler  ──set_volume()────┼──► SharedPlayback ──► tone synthesis
//! melody player   ──begin_override()┘         ▲
//!                   end_override() ───────────┘
//! ```
//!
//! Every access goes through a blocking mutex, so a writer running at
//! interrupt priority can never observe a half-updated [`PlaybackState`].
//!
//! # Quantization
//!
//! [`note_for()`] maps a distance in centimeters onto the eight-note scale
//! using contiguous half-open bands of [`BAND_WIDTH_CM`], starting at
//! [`MIN_DISTANCE_CM`]:
//!
//! ```text
//!  cm:  10   15   20   25   30   35   40   45   50
//!       [ C )[ D )[ E )[ F )[ G )[ A )[ B )[ c )
//! ```
//!
//! Anything outside `[MIN_DISTANCE_CM, MAX_DISTANCE_CM)` is
//! [`Note::Silence`].

mod error;
mod note;
mod octave;
mod shared;
mod state;
mod volume;

pub use error::PlaybackError;
pub use note::{note_for, Note};
pub use octave::Octave;
pub use shared::SharedPlayback;
pub use state::PlaybackState;
pub use volume::{VolumeLevel, VolumeSampler};

/// Number of notes in the playable scale.
pub const SCALE_LEN: usize = 8;

/// The playable scale, lowest pitch first.
pub const SCALE: [Note; SCALE_LEN] = [
    Note::C,
    Note::D,
    Note::E,
    Note::F,
    Note::G,
    Note::A,
    Note::B,
    Note::HighC,
];

/// Lower edge of the nearest band (inclusive), in centimeters.
pub const MIN_DISTANCE_CM: f32 = 10.0;

/// Width of each quantization band, in centimeters.
pub const BAND_WIDTH_CM: f32 = 5.0;

/// Upper edge of the farthest band (exclusive), in centimeters.
pub const MAX_DISTANCE_CM: f32 = MIN_DISTANCE_CM + BAND_WIDTH_CM * SCALE_LEN as f32;

/// Exclusive upper edge of each band, ascending, indexed like [`SCALE`].
///
/// **Invariant:** consecutive entries differ by exactly [`BAND_WIDTH_CM`]
/// and the last entry equals [`MAX_DISTANCE_CM`].
pub const BAND_UPPER_CM: [f32; SCALE_LEN] = [15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0];

/// Raw ADC readings strictly below this select [`VolumeLevel::High`].
pub const VOLUME_HIGH_BELOW: u16 = 500;

/// Raw ADC readings strictly above this select [`VolumeLevel::Mute`].
pub const VOLUME_MUTE_ABOVE: u16 = 3500;
