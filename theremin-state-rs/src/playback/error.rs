/// Errors that can occur when working with playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackError {
    /// The melody player currently owns the playback state.
    OverrideActive,
    /// [`end_override()`](super::SharedPlayback::end_override) was called
    /// without a matching `begin_override()`.
    OverrideInactive,
}

impl core::fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlaybackError::OverrideActive => write!(f, "Playback state is overridden by the melody"),
            PlaybackError::OverrideInactive => write!(f, "No melody override is active"),
        }
    }
}
