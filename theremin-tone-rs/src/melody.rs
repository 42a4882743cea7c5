//! Reference melody: the whole scale, ascending, in a fixed octave.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::delay::DelayNs;
use theremin::playback::{Octave, PlaybackState, SharedPlayback, SCALE};

use crate::error::MelodyError;
use crate::output::AudioOutput;
use crate::synth::ToneSynthesizer;

/// Default length of each melody note: one second.
pub const DEFAULT_NOTE_DURATION_MS: u32 = 1000;

/// Melody octave and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MelodyConfig {
    /// Octave the whole scale plays in. Default: two.
    pub octave: Octave,
    /// Length of each note. Default: 1000 ms.
    pub note_duration_ms: u32,
}

impl Default for MelodyConfig {
    fn default() -> Self {
        Self {
            octave: Octave::Two,
            note_duration_ms: DEFAULT_NOTE_DURATION_MS,
        }
    }
}

/// Plays [`SCALE`] through a [`ToneSynthesizer`] while holding the
/// [`SharedPlayback`] override.
///
/// The pre-melody state is captured by `begin_override()` and put back by
/// `end_override()`, each a single lock acquisition, and foreground writes
/// in between are rejected. The interrupted note and octave therefore come
/// back exactly, whatever the foreground was doing when the melody cut in.
///
/// Volume is re-read before each note, so turning the dial mid-melody takes
/// effect on the next note.
pub struct MelodyPlayer<'a, M: RawMutex> {
    shared: &'a SharedPlayback<M>,
    config: MelodyConfig,
}

impl<'a, M: RawMutex> MelodyPlayer<'a, M> {
    pub fn new(shared: &'a SharedPlayback<M>, config: MelodyConfig) -> Self {
        Self { shared, config }
    }

    pub fn config(&self) -> &MelodyConfig {
        &self.config
    }

    /// Play the scale to completion, then restore the previous state.
    ///
    /// The state is restored even if the output fails part-way.
    ///
    /// # Errors
    /// * [`MelodyError::Playback`] if an override is already active; nothing
    ///   is played in that case
    /// * [`MelodyError::Output`] on the first audio output failure
    pub fn play<OUT, DELAY>(
        &self,
        synth: &mut ToneSynthesizer<OUT, DELAY>,
    ) -> Result<(), MelodyError<OUT::Error>>
    where
        OUT: AudioOutput,
        DELAY: DelayNs,
    {
        let snapshot = self
            .shared
            .begin_override(PlaybackState::new(SCALE[0], Some(self.config.octave)))
            .map_err(MelodyError::Playback)?;

        #[cfg(feature = "defmt")]
        defmt::info!("Melody start, interrupted {}", snapshot);

        let played = self.play_scale(synth);
        let restored = self.shared.end_override(snapshot).map_err(MelodyError::Playback);

        #[cfg(feature = "defmt")]
        defmt::info!("Melody done, restored {}", snapshot);

        played.and(restored)
    }

    fn play_scale<OUT, DELAY>(
        &self,
        synth: &mut ToneSynthesizer<OUT, DELAY>,
    ) -> Result<(), MelodyError<OUT::Error>>
    where
        OUT: AudioOutput,
        DELAY: DelayNs,
    {
        for note in SCALE {
            self.shared.override_note(note).map_err(MelodyError::Playback)?;
            let volume = self.shared.volume();
            synth
                .play(note, self.config.octave, volume, self.config.note_duration_ms)
                .map_err(MelodyError::Output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::synth::ToneConfig;
    use crate::waveform::NOTE_CYCLES;
    use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
    use std::vec::Vec;
    use theremin::playback::{Note, PlaybackError, VolumeLevel};

    // ── Mocks ────────────────────────────────────────────────────────

    #[derive(Default)]
    struct Recorder {
        samples: Vec<u16>,
        fail: bool,
    }

    impl AudioOutput for Recorder {
        type Error = ();

        fn write(&mut self, sample: u16) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.samples.push(sample);
            Ok(())
        }
    }

    /// Records each distinct per-sample delay in order of appearance.
    #[derive(Default)]
    struct DelayMock {
        distinct_ns: Vec<u32>,
    }

    impl DelayNs for DelayMock {
        fn delay_ns(&mut self, ns: u32) {
            if self.distinct_ns.last() != Some(&ns) {
                self.distinct_ns.push(ns);
            }
        }
    }

    fn synth() -> ToneSynthesizer<Recorder, DelayMock> {
        ToneSynthesizer::new(Recorder::default(), DelayMock::default(), ToneConfig::default())
    }

    fn short() -> MelodyConfig {
        MelodyConfig {
            note_duration_ms: 10,
            ..MelodyConfig::default()
        }
    }

    fn all_states() -> Vec<PlaybackState> {
        let mut states = Vec::new();
        for note in SCALE.into_iter().chain([Note::Silence]) {
            for octave in [None, Some(Octave::One), Some(Octave::Two)] {
                states.push(PlaybackState::new(note, octave));
            }
        }
        states
    }

    // ── Sequencing ───────────────────────────────────────────────────

    #[test]
    fn defaults_to_octave_two_one_second_notes() {
        let c = MelodyConfig::default();
        assert_eq!(c.octave, Octave::Two);
        assert_eq!(c.note_duration_ms, 1000);
    }

    #[test]
    fn plays_scale_ascending_in_melody_octave() {
        let shared: SharedPlayback<NoopRawMutex> = SharedPlayback::new();
        let mut s = synth();
        MelodyPlayer::new(&shared, short()).play(&mut s).unwrap();

        let tone = ToneConfig::default();
        let expected: Vec<u32> = NOTE_CYCLES
            .iter()
            .map(|&cycles| tone.sample_delay_ns(cycles, Octave::Two))
            .collect();
        assert_eq!(s.release().1.distinct_ns, expected);
    }

    #[test]
    fn full_melody_lasts_eight_seconds_of_periods() {
        let shared: SharedPlayback<NoopRawMutex> = SharedPlayback::new();
        let mut s = synth();
        MelodyPlayer::new(&shared, MelodyConfig::default()).play(&mut s).unwrap();

        let tone = ToneConfig::default();
        let periods: u32 = NOTE_CYCLES
            .iter()
            .map(|&cycles| tone.repeat_count(cycles, Octave::Two, 1000))
            .sum();
        assert_eq!(s.release().0.samples.len(), periods as usize * 100);
    }

    // ── State restore ────────────────────────────────────────────────

    #[test]
    fn restores_every_state_exactly() {
        for before in all_states() {
            let shared: SharedPlayback<CriticalSectionRawMutex> = SharedPlayback::new();
            shared.set_playback(before).unwrap();

            MelodyPlayer::new(&shared, short()).play(&mut synth()).unwrap();

            assert_eq!(shared.playback(), before);
            assert!(!shared.is_overridden());
        }
    }

    #[test]
    fn restores_state_after_output_failure() {
        let shared: SharedPlayback<NoopRawMutex> = SharedPlayback::new();
        let before = PlaybackState::new(Note::F, Some(Octave::One));
        shared.set_playback(before).unwrap();

        let mut s = ToneSynthesizer::new(
            Recorder { samples: Vec::new(), fail: true },
            DelayMock::default(),
            ToneConfig::default(),
        );
        assert_eq!(
            MelodyPlayer::new(&shared, short()).play(&mut s),
            Err(MelodyError::Output(()))
        );
        assert_eq!(shared.playback(), before);
        assert!(!shared.is_overridden());
    }

    #[test]
    fn refuses_to_nest() {
        let shared: SharedPlayback<NoopRawMutex> = SharedPlayback::new();
        let snapshot = shared.begin_override(PlaybackState::INACTIVE).unwrap();

        let mut s = synth();
        assert_eq!(
            MelodyPlayer::new(&shared, short()).play(&mut s),
            Err(MelodyError::Playback(PlaybackError::OverrideActive))
        );
        assert!(s.release().0.samples.is_empty());

        // The outer override is untouched.
        assert!(shared.is_overridden());
        shared.end_override(snapshot).unwrap();
    }

    // ── Volume ───────────────────────────────────────────────────────

    #[test]
    fn muted_melody_is_silent_but_restores() {
        let shared: SharedPlayback<NoopRawMutex> = SharedPlayback::new();
        shared.set_volume(VolumeLevel::Mute);
        let before = PlaybackState::new(Note::D, Some(Octave::Two));
        shared.set_playback(before).unwrap();

        let mut s = synth();
        MelodyPlayer::new(&shared, short()).play(&mut s).unwrap();

        assert!(s.release().0.samples.is_empty());
        assert_eq!(shared.playback(), before);
    }

    #[test]
    fn uses_current_volume() {
        let shared: SharedPlayback<NoopRawMutex> = SharedPlayback::new();
        shared.set_volume(VolumeLevel::Low);

        let mut s = synth();
        MelodyPlayer::new(&shared, short()).play(&mut s).unwrap();

        assert_eq!(s.release().0.samples.iter().copied().max(), Some(2047));
    }
}
