//! Waveform table and synthesis calibration constants.
//!
//! Every note is produced from the same one-period sine table. Pitch comes
//! from the per-sample delay, never from resampling the table:
//!
//! ```text
//! f = REFERENCE_CLOCK_HZ × octave / (TABLE_SIZE × cycle_count)
//! ```
//!
//! The cycle counts and the delay correction are bench-calibrated values.
//! Change them only together with a fresh tuning pass.

use theremin::playback::{Note, SCALE_LEN};

/// Number of samples in one waveform period.
pub const TABLE_SIZE: usize = 100;

/// Clock the cycle counts below are expressed in: 16 MHz.
pub const REFERENCE_CLOCK_HZ: u32 = 16_000_000;

/// Reference-clock cycles spent per sample on the write and loop overhead.
/// Subtracted from every per-sample delay.
pub const SAMPLE_DELAY_CORRECTION_CYCLES: u32 = 50;

/// Offset added to every sample to centre it in the output's valid range.
pub const OUTPUT_OFFSET: u16 = 205;

/// Full-scale value of the 12-bit audio output.
pub const OUTPUT_FULL_SCALE: u16 = 4095;

/// Reference-clock cycles per table step at octave 1, indexed like
/// [`SCALE`](theremin::playback::SCALE): C D E F G A B c.
pub const NOTE_CYCLES: [u32; SCALE_LEN] = [1224, 1090, 971, 917, 817, 728, 648, 612];

/// One period of a 12-bit sine centred on 1842, spanning 0..=3685.
#[rustfmt::skip]
pub const SINE_TABLE: [u16; TABLE_SIZE] = [
    1843, 1958, 2073, 2188, 2301, 2412, 2521, 2627,
    2730, 2830, 2925, 3017, 3104, 3186, 3262, 3333,
    3398, 3457, 3510, 3556, 3595, 3627, 3652, 3670,
    3681, 3685, 3681, 3670, 3652, 3627, 3595, 3556,
    3510, 3457, 3398, 3333, 3262, 3186, 3104, 3017,
    2925, 2830, 2730, 2627, 2521, 2412, 2301, 2188,
    2073, 1958, 1843, 1727, 1612, 1497, 1384, 1273,
    1164, 1058,  955,  855,  760,  668,  581,  499,
     423,  352,  287,  228,  175,  129,   90,   58,
      33,   15,    4,    0,    4,   15,   33,   58,
      90,  129,  175,  228,  287,  352,  423,  499,
     581,  668,  760,  855,  955, 1058, 1164, 1273,
    1384, 1497, 1612, 1727,
];

/// Cycle count for `note` at octave 1, or `None` for silence.
pub fn cycle_count(note: Note) -> Option<u32> {
    note.scale_index().map(|i| NOTE_CYCLES[i])
}
