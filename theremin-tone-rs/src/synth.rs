//! Blocking table-driven tone synthesizer.

use embedded_hal::delay::DelayNs;
use theremin::playback::{Note, Octave, VolumeLevel};

use crate::output::AudioOutput;
use crate::waveform::{
    cycle_count, OUTPUT_OFFSET, REFERENCE_CLOCK_HZ, SAMPLE_DELAY_CORRECTION_CYCLES, SINE_TABLE,
    TABLE_SIZE,
};

// ── ToneConfig ───────────────────────────────────────────────────────────

/// Synthesis timing and output scaling.
///
/// [`ToneConfig::default()`] reproduces the calibrated values in
/// [`waveform`](crate::waveform). The per-note cycle counts stay expressed
/// in `reference_clock_hz` cycles whatever the target's core clock is; they
/// are converted to nanoseconds before reaching the delay provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneConfig {
    /// Clock the cycle counts are expressed in. Default: 16 MHz.
    pub reference_clock_hz: u32,
    /// Cycles subtracted from every per-sample delay. Default: 50.
    pub delay_correction_cycles: u32,
    /// Offset added to every scaled sample. Default: 205.
    pub output_offset: u16,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            reference_clock_hz: REFERENCE_CLOCK_HZ,
            delay_correction_cycles: SAMPLE_DELAY_CORRECTION_CYCLES,
            output_offset: OUTPUT_OFFSET,
        }
    }
}

impl ToneConfig {
    /// Number of full table passes needed to sound for `duration_ms`.
    ///
    /// Formula: `octave × clock × duration_ms / (TABLE_SIZE × cycle_count × 1000)`,
    /// at least 1 for any non-zero duration.
    pub fn repeat_count(&self, cycle_count: u32, octave: Octave, duration_ms: u32) -> u32 {
        if duration_ms == 0 {
            return 0;
        }
        let numerator = octave.multiplier() as u64 * self.reference_clock_hz as u64 * duration_ms as u64;
        let denominator = TABLE_SIZE as u64 * cycle_count as u64 * 1000;
        let repeats = numerator.checked_div(denominator).unwrap_or(0).max(1);
        u32::try_from(repeats).unwrap_or(u32::MAX)
    }

    /// Delay after each sample, in reference-clock cycles.
    ///
    /// Formula: `cycle_count / octave − delay_correction_cycles`.
    pub fn sample_delay_cycles(&self, cycle_count: u32, octave: Octave) -> u32 {
        (cycle_count / octave.multiplier()).saturating_sub(self.delay_correction_cycles)
    }

    /// [`sample_delay_cycles()`](Self::sample_delay_cycles) converted to nanoseconds.
    pub fn sample_delay_ns(&self, cycle_count: u32, octave: Octave) -> u32 {
        let cycles = self.sample_delay_cycles(cycle_count, octave) as u64;
        let ns = (cycles * 1_000_000_000)
            .checked_div(self.reference_clock_hz as u64)
            .unwrap_or(0);
        u32::try_from(ns).unwrap_or(u32::MAX)
    }

    /// Nominal pitch of a cycle count at `octave`, ignoring the delay correction.
    pub fn frequency_hz(&self, cycle_count: u32, octave: Octave) -> f32 {
        if cycle_count == 0 {
            return 0.0;
        }
        self.reference_clock_hz as f32 * octave.multiplier() as f32
            / (TABLE_SIZE as f32 * cycle_count as f32)
    }

    /// Scale a table sample by the volume divisor and apply the offset.
    pub fn scale_sample(&self, raw: u16, divisor: u16) -> u16 {
        (raw / divisor.max(1)).saturating_add(self.output_offset)
    }
}

// ── ToneSynthesizer ──────────────────────────────────────────────────────

/// Plays one note at a time by walking [`SINE_TABLE`] into an
/// [`AudioOutput`].
///
/// # Timing
///
/// [`play()`](Self::play) busy-waits through `DELAY` for its whole
/// duration. Run it from a context that may block, and give the melody
/// player a higher priority than the foreground loop if it must cut in.
///
/// # Example
///
/// ```ignore
/// use theremin::playback::{Note, Octave, VolumeLevel};
/// use theremin_tone::{PwmAudio, ToneConfig, ToneSynthesizer};
///
/// let mut synth = ToneSynthesizer::new(PwmAudio::new(pwm), delay, ToneConfig::default());
/// synth.play(Note::A, Octave::One, VolumeLevel::High, 1000)?;
/// ```
pub struct ToneSynthesizer<OUT, DELAY> {
    output: OUT,
    delay: DELAY,
    config: ToneConfig,
}

impl<OUT, DELAY> ToneSynthesizer<OUT, DELAY>
where
    OUT: AudioOutput,
    DELAY: DelayNs,
{
    pub fn new(output: OUT, delay: DELAY, config: ToneConfig) -> Self {
        Self { output, delay, config }
    }

    pub fn config(&self) -> &ToneConfig {
        &self.config
    }

    /// Give the output and delay back.
    pub fn release(self) -> (OUT, DELAY) {
        (self.output, self.delay)
    }

    /// Sound `note` for roughly `duration_ms`.
    ///
    /// Returns the number of waveform periods written. Nothing at all is
    /// written when `volume` is [`VolumeLevel::Mute`], `note` is
    /// [`Note::Silence`] or `duration_ms` is zero.
    ///
    /// # Errors
    /// The first output error aborts the note and is returned as-is.
    pub fn play(
        &mut self,
        note: Note,
        octave: Octave,
        volume: VolumeLevel,
        duration_ms: u32,
    ) -> Result<u32, OUT::Error> {
        let Some(divisor) = volume.divisor() else {
            return Ok(0);
        };
        let Some(cycles) = cycle_count(note) else {
            return Ok(0);
        };

        let repeats = self.config.repeat_count(cycles, octave, duration_ms);
        let delay_ns = self.config.sample_delay_ns(cycles, octave);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Playing {} in octave {} at {} Hz for {} periods",
            note,
            octave,
            self.config.frequency_hz(cycles, octave),
            repeats
        );

        for _ in 0..repeats {
            for &raw in SINE_TABLE.iter() {
                self.output.write(self.config.scale_sample(raw, divisor))?;
                self.delay.delay_ns(delay_ns);
            }
        }

        Ok(repeats)
    }
}
