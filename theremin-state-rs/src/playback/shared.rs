use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::error::PlaybackError;
use super::note::Note;
use super::state::PlaybackState;
use super::volume::VolumeLevel;

/// Everything guarded by the [`SharedPlayback`] lock.
#[derive(Debug, Clone, Copy)]
struct ControlState {
    playback: PlaybackState,
    volume: VolumeLevel,
    /// Last note a foreground cycle sent to the synthesizer.
    previous_note: Note,
    /// Set between `begin_override()` and `end_override()`.
    overridden: bool,
}

impl ControlState {
    const INITIAL: ControlState = ControlState {
        playback: PlaybackState::INACTIVE,
        volume: VolumeLevel::High,
        previous_note: Note::Silence,
        overridden: false,
    };
}

/// Lock-protected handle to the note, octave and volume.
///
/// This is the single shared-state channel between the foreground loop, the
/// volume sampler and the melody player. Every method takes the lock exactly
/// once, so each read or read-modify-write is atomic with respect to every
/// other context using the same handle.
///
/// The raw mutex type decides what "atomic" means on the target:
/// `CriticalSectionRawMutex` when interrupt handlers touch the handle,
/// `ThreadModeRawMutex` or `NoopRawMutex` when only tasks do.
///
/// # Melody override
///
/// [`begin_override()`](Self::begin_override) swaps in the melody's state
/// and hands back a snapshot of what was there; while the override is
/// active, [`set_playback()`](Self::set_playback) is rejected so the
/// foreground cannot interleave a write between the snapshot and the
/// restore. [`end_override()`](Self::end_override) puts the snapshot back.
///
/// # Examples
///
/// ```
/// use embassy_sync::blocking_mutex::raw::NoopRawMutex;
/// use theremin::playback::{Note, Octave, PlaybackState, SharedPlayback};
///
/// let shared: SharedPlayback<NoopRawMutex> = SharedPlayback::new();
/// shared.set_playback(PlaybackState::new(Note::E, Some(Octave::One))).unwrap();
///
/// let snapshot = shared
///     .begin_override(PlaybackState::new(Note::C, Some(Octave::Two)))
///     .unwrap();
/// shared.override_note(Note::D).unwrap();
/// shared.end_override(snapshot).unwrap();
///
/// assert_eq!(shared.playback(), PlaybackState::new(Note::E, Some(Octave::One)));
/// ```
pub struct SharedPlayback<M: RawMutex> {
    inner: Mutex<M, RefCell<ControlState>>,
}

impl<M: RawMutex> Default for SharedPlayback<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> SharedPlayback<M> {
    /// Inactive playback at full volume. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ControlState::INITIAL)),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut ControlState) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn playback(&self) -> PlaybackState {
        self.with(|s| s.playback)
    }

    pub fn volume(&self) -> VolumeLevel {
        self.with(|s| s.volume)
    }

    /// Playback state and volume read under one lock.
    pub fn snapshot(&self) -> (PlaybackState, VolumeLevel) {
        self.with(|s| (s.playback, s.volume))
    }

    pub fn previous_note(&self) -> Note {
        self.with(|s| s.previous_note)
    }

    pub fn is_overridden(&self) -> bool {
        self.with(|s| s.overridden)
    }

    // ── Foreground writes ────────────────────────────────────────────

    /// Replace the playback state from the foreground loop.
    ///
    /// Returns [`PlaybackError::OverrideActive`] (and leaves the state
    /// untouched) while the melody owns the state.
    pub fn set_playback(&self, state: PlaybackState) -> Result<(), PlaybackError> {
        self.with(|s| {
            if s.overridden {
                return Err(PlaybackError::OverrideActive);
            }
            s.playback = state;
            Ok(())
        })
    }

    /// Remember the note a completed foreground cycle played.
    pub fn record_played(&self, note: Note) {
        self.with(|s| s.previous_note = note);
    }

    // ── Sampler writes ───────────────────────────────────────────────

    /// Store a new volume level, returning the previous one.
    ///
    /// Volume is never overridden by the melody: turning the dial during
    /// auto-play takes effect on the next note.
    pub fn set_volume(&self, level: VolumeLevel) -> VolumeLevel {
        self.with(|s| core::mem::replace(&mut s.volume, level))
    }

    // ── Melody override ──────────────────────────────────────────────

    /// Atomically snapshot the current state and replace it with `state`.
    ///
    /// Returns [`PlaybackError::OverrideActive`] if an override is already
    /// in progress.
    pub fn begin_override(&self, state: PlaybackState) -> Result<PlaybackState, PlaybackError> {
        self.with(|s| {
            if s.overridden {
                return Err(PlaybackError::OverrideActive);
            }
            s.overridden = true;
            Ok(core::mem::replace(&mut s.playback, state))
        })
    }

    /// Change the sounding note while an override is active.
    pub fn override_note(&self, note: Note) -> Result<(), PlaybackError> {
        self.with(|s| {
            if !s.overridden {
                return Err(PlaybackError::OverrideInactive);
            }
            s.playback.note = note;
            Ok(())
        })
    }

    /// Atomically restore `snapshot` and release the override.
    pub fn end_override(&self, snapshot: PlaybackState) -> Result<(), PlaybackError> {
        self.with(|s| {
            if !s.overridden {
                return Err(PlaybackError::OverrideInactive);
            }
            s.playback = snapshot;
            s.overridden = false;
            Ok(())
        })
    }
}
