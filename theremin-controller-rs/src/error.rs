//! Error types for the interaction cycle.

use core::fmt;

use embedded_hal::digital::ErrorKind;
use ranger_driver::RangerError;

/// Errors that end a foreground cycle early.
///
/// Ranging timeouts never show up here: the controller turns them into
/// silence. Every variant is recoverable by running the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError<DE, AE> {
    /// Octave button or indicator LED pin error.
    Panel(ErrorKind),

    /// Rangefinder pin failure.
    Ranger(RangerError),

    /// Segment display failure.
    Display(DE),

    /// Audio output failure while the note played.
    Audio(AE),
}

impl<DE, AE> From<RangerError> for ControllerError<DE, AE> {
    fn from(error: RangerError) -> Self {
        ControllerError::Ranger(error)
    }
}

impl<DE: fmt::Debug, AE: fmt::Debug> fmt::Display for ControllerError<DE, AE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ControllerError::Panel(kind) => write!(f, "Octave panel pin error: {:?}", kind),
            ControllerError::Ranger(e) => write!(f, "Ranger error: {}", e),
            ControllerError::Display(e) => write!(f, "Display error: {:?}", e),
            ControllerError::Audio(e) => write!(f, "Audio output error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<DE: defmt::Format, AE: defmt::Format> defmt::Format for ControllerError<DE, AE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ControllerError::Panel(_) => defmt::write!(f, "Octave panel pin error"),
            ControllerError::Ranger(e) => defmt::write!(f, "Ranger error: {}", e),
            ControllerError::Display(e) => defmt::write!(f, "Display error: {}", e),
            ControllerError::Audio(e) => defmt::write!(f, "Audio output error: {}", e),
        }
    }
}
