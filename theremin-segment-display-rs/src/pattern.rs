//! Segment patterns for every note.

use theremin::playback::Note;

/// Eight segment levels, in the order they are shifted out.
///
/// The display is common-anode, so a segment is **lit when its bit is
/// `false`**. Element 0 is shifted first and ends up in the register's last
/// stage, so the byte literals below read MSB-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(pub [bool; 8]);

const fn pattern(byte: u8) -> SegmentPattern {
    let mut bits = [false; 8];
    let mut i = 0;
    while i < 8 {
        bits[i] = byte & (0x80 >> i) != 0;
        i += 1;
    }
    SegmentPattern(bits)
}

impl SegmentPattern {
    /// Every segment off.
    pub const BLANK: SegmentPattern = pattern(0b1111_1111);

    pub const C: SegmentPattern = pattern(0b1100_0110);
    pub const D: SegmentPattern = pattern(0b1010_0001);
    pub const E: SegmentPattern = pattern(0b1000_0110);
    pub const F: SegmentPattern = pattern(0b1000_1110);
    pub const G: SegmentPattern = pattern(0b1001_0000);
    pub const A: SegmentPattern = pattern(0b1000_1000);
    pub const B: SegmentPattern = pattern(0b1000_0011);
    /// Lowercase `c`, for the octave's top note.
    pub const HIGH_C: SegmentPattern = pattern(0b1010_0111);

    /// Pattern for `note`; [`BLANK`](Self::BLANK) for silence.
    pub const fn for_note(note: Note) -> SegmentPattern {
        match note {
            Note::C => Self::C,
            Note::D => Self::D,
            Note::E => Self::E,
            Note::F => Self::F,
            Note::G => Self::G,
            Note::A => Self::A,
            Note::B => Self::B,
            Note::HighC => Self::HIGH_C,
            Note::Silence => Self::BLANK,
        }
    }

    pub fn bits(&self) -> [bool; 8] {
        self.0
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

impl Default for SegmentPattern {
    fn default() -> Self {
        Self::BLANK
    }
}
