use super::{BAND_UPPER_CM, MIN_DISTANCE_CM, SCALE};

/// One note of the diatonic scale, or silence.
///
/// The eight audible variants are ordered lowest pitch first, matching
/// [`SCALE`]. [`Note::Silence`] is the "no note" sentinel: it never produces
/// audio regardless of octave or volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Note {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
    /// The C one octave above [`Note::C`].
    HighC,
    #[default]
    Silence,
}

impl Note {
    /// Returns `true` for the [`Silence`](Note::Silence) sentinel.
    pub fn is_silence(self) -> bool {
        matches!(self, Note::Silence)
    }

    /// Position of this note within [`SCALE`], or `None` for silence.
    pub fn scale_index(self) -> Option<usize> {
        SCALE.iter().position(|&n| n == self)
    }

    /// ASCII character used for this note on the serial line.
    ///
    /// Upper-case letters for the lower octave, `c` for [`Note::HighC`],
    /// `None` for silence.
    pub fn as_ascii(self) -> Option<u8> {
        match self {
            Note::C => Some(b'C'),
            Note::D => Some(b'D'),
            Note::E => Some(b'E'),
            Note::F => Some(b'F'),
            Note::G => Some(b'G'),
            Note::A => Some(b'A'),
            Note::B => Some(b'B'),
            Note::HighC => Some(b'c'),
            Note::Silence => None,
        }
    }
}

/// Quantize a distance in centimeters into a [`Note`].
///
/// Bands are checked in ascending order and the first band whose exclusive
/// upper edge lies above `distance_cm` wins. Distances below
/// [`MIN_DISTANCE_CM`], at or above [`MAX_DISTANCE_CM`](super::MAX_DISTANCE_CM),
/// and non-finite values (NaN, ±∞) all yield [`Note::Silence`].
///
/// # Examples
///
/// ```
/// use theremin::playback::{note_for, Note};
///
/// assert_eq!(note_for(12.0), Note::C);
/// assert_eq!(note_for(15.0), Note::D);
/// assert_eq!(note_for(49.9), Note::HighC);
/// assert_eq!(note_for(51.0), Note::Silence);
/// ```
pub fn note_for(distance_cm: f32) -> Note {
    // NaN fails every comparison, so it must be rejected explicitly.
    if !distance_cm.is_finite() || distance_cm < MIN_DISTANCE_CM {
        return Note::Silence;
    }

    for (note, &upper) in SCALE.iter().zip(BAND_UPPER_CM.iter()) {
        if distance_cm < upper {
            return *note;
        }
    }

    Note::Silence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{BAND_WIDTH_CM, MAX_DISTANCE_CM, SCALE_LEN};

    // ── Band edges ───────────────────────────────────────────────────

    #[test]
    fn nearest_band_is_first_scale_note() {
        assert_eq!(note_for(10.0), Note::C);
        assert_eq!(note_for(12.0), Note::C);
        assert_eq!(note_for(14.9), Note::C);
    }

    #[test]
    fn farthest_band_is_last_scale_note() {
        assert_eq!(note_for(45.0), Note::HighC);
        assert_eq!(note_for(49.9), Note::HighC);
    }

    #[test]
    fn out_of_range_is_silence() {
        assert_eq!(note_for(50.0), Note::Silence);
        assert_eq!(note_for(51.0), Note::Silence);
        assert_eq!(note_for(9.99), Note::Silence);
        assert_eq!(note_for(0.0), Note::Silence);
        assert_eq!(note_for(-3.0), Note::Silence);
        assert_eq!(note_for(400.0), Note::Silence);
    }

    #[test]
    fn non_finite_is_silence() {
        assert_eq!(note_for(f32::NAN), Note::Silence);
        assert_eq!(note_for(f32::INFINITY), Note::Silence);
        assert_eq!(note_for(f32::NEG_INFINITY), Note::Silence);
    }

    #[test]
    fn lower_edges_are_inclusive() {
        for (i, &note) in SCALE.iter().enumerate() {
            let lower = MIN_DISTANCE_CM + BAND_WIDTH_CM * i as f32;
            assert_eq!(note_for(lower), note, "lower edge of band {}", i);
        }
    }

    #[test]
    fn upper_edges_are_exclusive() {
        for (i, &upper) in BAND_UPPER_CM.iter().enumerate() {
            let expected = if i + 1 < SCALE_LEN { SCALE[i + 1] } else { Note::Silence };
            assert_eq!(note_for(upper), expected, "upper edge of band {}", i);
        }
    }

    #[test]
    fn band_table_is_contiguous() {
        let mut lower = MIN_DISTANCE_CM;
        for &upper in &BAND_UPPER_CM {
            assert_eq!(upper - lower, BAND_WIDTH_CM);
            lower = upper;
        }
        assert_eq!(lower, MAX_DISTANCE_CM);
    }

    #[test]
    fn every_in_range_distance_maps_to_an_audible_note() {
        // 0.1 cm sweep over the whole domain.
        let mut tenths = (MIN_DISTANCE_CM * 10.0) as u32;
        while (tenths as f32) < MAX_DISTANCE_CM * 10.0 {
            let d = tenths as f32 / 10.0;
            assert!(!note_for(d).is_silence(), "{} cm mapped to silence", d);
            tenths += 1;
        }
    }

    #[test]
    fn mapping_is_monotonic() {
        let mut last_index = 0;
        let mut tenths = (MIN_DISTANCE_CM * 10.0) as u32;
        while (tenths as f32) < MAX_DISTANCE_CM * 10.0 {
            let index = note_for(tenths as f32 / 10.0).scale_index().unwrap();
            assert!(index >= last_index);
            last_index = index;
            tenths += 1;
        }
    }

    // ── Note helpers ─────────────────────────────────────────────────

    #[test]
    fn scale_index_follows_scale_order() {
        for (i, note) in SCALE.into_iter().enumerate() {
            assert_eq!(note.scale_index(), Some(i));
        }
        assert_eq!(Note::Silence.scale_index(), None);
    }

    #[test]
    fn ascii_characters() {
        let chars: [u8; SCALE_LEN] = [b'C', b'D', b'E', b'F', b'G', b'A', b'B', b'c'];
        for (note, expected) in SCALE.iter().zip(chars.iter()) {
            assert_eq!(note.as_ascii(), Some(*expected));
        }
        assert_eq!(Note::Silence.as_ascii(), None);
    }

    #[test]
    fn default_is_silence() {
        assert!(Note::default().is_silence());
    }
}
