/// Selected octave.
///
/// The octave multiplies the base frequency of every [`Note`](super::Note):
/// [`Octave::Two`] halves the per-sample delay and so doubles the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Octave {
    One,
    Two,
}

impl Octave {
    /// Frequency multiplier relative to octave 1.
    pub fn multiplier(self) -> u32 {
        match self {
            Octave::One => 1,
            Octave::Two => 2,
        }
    }

    /// Resolve the two mutually exclusive octave buttons.
    ///
    /// Exactly one pressed button selects its octave. Neither or both
    /// pressed is the inactive state (`None`).
    pub fn from_buttons(button_1_pressed: bool, button_2_pressed: bool) -> Option<Octave> {
        match (button_1_pressed, button_2_pressed) {
            (true, false) => Some(Octave::One),
            (false, true) => Some(Octave::Two),
            _ => None,
        }
    }
}
