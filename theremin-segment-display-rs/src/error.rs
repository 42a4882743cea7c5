//! Error types for the display driver.

use core::fmt;

/// Errors that can occur while driving the shift register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError<E> {
    /// Data, clock or latch pin error.
    Pin(E),
}

impl<E> From<E> for DisplayError<E> {
    fn from(error: E) -> Self {
        DisplayError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for DisplayError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DisplayError::Pin(e) => write!(f, "Shift register pin error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for DisplayError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DisplayError::Pin(e) => defmt::write!(f, "Shift register pin error: {}", e),
        }
    }
}
