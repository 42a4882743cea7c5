//! Display port used by the controller.

use theremin::playback::Note;

use crate::pattern::SegmentPattern;

/// Anything that can show one [`SegmentPattern`] at a time.
pub trait DisplaySink {
    type Error;

    /// Replace the displayed pattern.
    fn show(&mut self, pattern: SegmentPattern) -> Result<(), Self::Error>;

    fn show_note(&mut self, note: Note) -> Result<(), Self::Error> {
        self.show(SegmentPattern::for_note(note))
    }

    fn blank(&mut self) -> Result<(), Self::Error> {
        self.show(SegmentPattern::BLANK)
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    type Error = T::Error;

    fn show(&mut self, pattern: SegmentPattern) -> Result<(), Self::Error> {
        (**self).show(pattern)
    }
}
