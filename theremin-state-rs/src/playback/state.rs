use super::note::Note;
use super::octave::Octave;

/// The note currently sounding and the octave it sounds in.
///
/// Note and octave are only meaningful together. `octave == None` is the
/// inactive state (no octave button held); it always pairs with
/// [`Note::Silence`] when produced by [`PlaybackState::INACTIVE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackState {
    pub note: Note,
    pub octave: Option<Octave>,
}

impl PlaybackState {
    /// Nothing selected, nothing sounding.
    pub const INACTIVE: PlaybackState = PlaybackState {
        note: Note::Silence,
        octave: None,
    };

    pub const fn new(note: Note, octave: Option<Octave>) -> Self {
        Self { note, octave }
    }

    /// `true` when this state would produce sound at a non-mute volume.
    pub fn is_audible(&self) -> bool {
        !self.note.is_silence() && self.octave.is_some()
    }
}
