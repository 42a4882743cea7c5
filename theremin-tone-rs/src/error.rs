//! Error types for melody playback.

use core::fmt;

use theremin::playback::PlaybackError;

/// Errors that can occur while the reference melody plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MelodyError<E> {
    /// The shared playback state refused the override (another melody is
    /// already running, or the override was released underneath us).
    Playback(PlaybackError),

    /// Underlying audio output error.
    Output(E),
}

impl<E: fmt::Debug> fmt::Display for MelodyError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MelodyError::Playback(e) => write!(f, "Playback state error: {}", e),
            MelodyError::Output(e) => write!(f, "Audio output error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for MelodyError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            MelodyError::Playback(e) => defmt::write!(f, "Playback state error: {}", e),
            MelodyError::Output(e) => defmt::write!(f, "Audio output error: {}", e),
        }
    }
}
