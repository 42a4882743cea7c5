//! The foreground interaction cycle.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::delay::DelayNs;
use theremin::playback::{note_for, Note, Octave, PlaybackState, SharedPlayback, VolumeLevel};
use theremin_segment_display::DisplaySink;
use theremin_tone::{AudioOutput, ToneSynthesizer};

use crate::error::ControllerError;
use crate::panel::OctaveSelector;
use crate::sensor::DistanceSensor;
use crate::serial::{send_note, SerialSink};

/// Default length of each foreground note: one second.
pub const DEFAULT_NOTE_DURATION_MS: u32 = 1000;

/// Foreground cycle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// How long each measured note sounds. Default: 1000 ms.
    pub note_duration_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            note_duration_ms: DEFAULT_NOTE_DURATION_MS,
        }
    }
}

/// What one call to [`Controller::run_cycle()`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// No octave selected. Nothing was measured or played.
    Inactive,
    /// A note was measured, shown and (volume permitting) played.
    Active {
        note: Note,
        octave: Octave,
        volume: VolumeLevel,
        /// Waveform periods written; 0 for silence or mute.
        periods: u32,
    },
    /// A note was measured and shown, but the melody owned the playback
    /// state, so the state was left alone and nothing was played.
    Deferred { note: Note, octave: Octave },
}

impl CycleOutcome {
    /// `true` if the cycle counts as user interaction for the idle watchdog.
    pub fn should_rearm(&self) -> bool {
        !matches!(self, CycleOutcome::Inactive)
    }
}

/// Result type of [`Controller::run_cycle()`].
pub type CycleResult<DISP, OUT> =
    Result<CycleOutcome, ControllerError<<DISP as DisplaySink>::Error, <OUT as AudioOutput>::Error>>;

/// Owns the foreground peripherals and runs one interaction cycle at a time.
///
/// # Control flow
///
/// 1. Read the octave buttons and mirror the selection on the LEDs.
/// 2. **Inactive**: publish [`PlaybackState::INACTIVE`], blank the display,
///    and stop. No ranging, no sound, no watchdog re-arm.
/// 3. **Active**: measure the distance and quantize it. A ranging timeout
///    is silence, not an error.
/// 4. Publish the new state through [`SharedPlayback`]. If the melody
///    holds the override, the state is left alone and step 6 is skipped.
/// 5. Show the note's segment pattern and send its telemetry line.
/// 6. Play the note at the current volume unless muted, and record it as
///    the previous note.
///
/// The caller re-arms the idle watchdog when
/// [`CycleOutcome::should_rearm()`] is `true`.
pub struct Controller<'a, M: RawMutex, PANEL, SENSOR, DISP, SER, OUT, DELAY> {
    shared: &'a SharedPlayback<M>,
    panel: PANEL,
    sensor: SENSOR,
    display: DISP,
    serial: SER,
    synth: ToneSynthesizer<OUT, DELAY>,
    config: ControllerConfig,
}

impl<'a, M, PANEL, SENSOR, DISP, SER, OUT, DELAY> Controller<'a, M, PANEL, SENSOR, DISP, SER, OUT, DELAY>
where
    M: RawMutex,
    PANEL: OctaveSelector,
    SENSOR: DistanceSensor,
    DISP: DisplaySink,
    SER: SerialSink,
    OUT: AudioOutput,
    DELAY: DelayNs,
{
    pub fn new(
        shared: &'a SharedPlayback<M>,
        panel: PANEL,
        sensor: SENSOR,
        display: DISP,
        serial: SER,
        synth: ToneSynthesizer<OUT, DELAY>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            shared,
            panel,
            sensor,
            display,
            serial,
            synth,
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Run one foreground cycle.
    ///
    /// # Errors
    /// Pin, display and audio failures end the cycle early. The shared
    /// state stays consistent and the next cycle can run normally.
    pub fn run_cycle(&mut self) -> CycleResult<DISP, OUT> {
        let selection = self.panel.read_selection().map_err(ControllerError::Panel)?;
        self.panel.indicate(selection).map_err(ControllerError::Panel)?;

        let Some(octave) = selection else {
            // Rejected while the melody plays; the melody restores its own snapshot.
            let _ = self.shared.set_playback(PlaybackState::INACTIVE);
            self.display.blank().map_err(ControllerError::Display)?;
            return Ok(CycleOutcome::Inactive);
        };

        let note = self.measure_note()?;
        let published = self.shared.set_playback(PlaybackState::new(note, Some(octave))).is_ok();

        self.display.show_note(note).map_err(ControllerError::Display)?;
        send_note(&mut self.serial, note);

        if !published {
            #[cfg(feature = "defmt")]
            defmt::debug!("Melody active, cycle deferred");
            return Ok(CycleOutcome::Deferred { note, octave });
        }

        let volume = self.shared.volume();
        let periods = self
            .synth
            .play(note, octave, volume, self.config.note_duration_ms)
            .map_err(ControllerError::Audio)?;
        self.shared.record_played(note);

        Ok(CycleOutcome::Active {
            note,
            octave,
            volume,
            periods,
        })
    }

    fn measure_note(&mut self) -> Result<Note, ControllerError<DISP::Error, OUT::Error>> {
        match self.sensor.measure_distance() {
            Ok(distance_cm) => Ok(note_for(distance_cm)),
            Err(e) if e.is_timeout() => Ok(Note::Silence),
            Err(e) => Err(e.into()),
        }
    }
}
