//! Embassy task bodies.
//!
//! These are regular `async fn`s, **not** Embassy `#[task]`s. Embassy tasks
//! cannot be generic, so the firmware wraps each one in a thin, concrete
//! task:
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn watchdog(signals: &'static TaskSignals<CriticalSectionRawMutex>) {
//!     idle_watchdog_task(signals, WatchdogConfig::default()).await
//! }
//! ```
//!
//! # Signal flow
//!
//! ```text
//!  foreground ──rearm──► watchdog ──melody_request──► melody
//!                           ▲                            │
//!                           └────────melody_done─────────┘
//! ```
//!
//! Run the watchdog and the melody on an executor that preempts the
//! foreground (an `InterruptExecutor`), so the melody cuts into a note that
//! is already playing.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};
use embedded_hal::delay::DelayNs;
use theremin::idle_watchdog::{IdleWatchdog, WatchdogConfig};
use theremin_segment_display::DisplaySink;
use theremin_tone::{AudioOutput, MelodyPlayer, ToneSynthesizer};

use crate::controller::Controller;
use crate::panel::OctaveSelector;
use crate::sensor::DistanceSensor;
use crate::serial::SerialSink;

/// The three signals connecting the foreground, the watchdog and the melody.
pub struct TaskSignals<M: RawMutex> {
    /// Foreground → watchdog: an interaction cycle completed.
    pub rearm: Signal<M, ()>,
    /// Watchdog → melody: the idle interval expired.
    pub melody_request: Signal<M, ()>,
    /// Melody → watchdog: the melody finished and the state is restored.
    pub melody_done: Signal<M, ()>,
}

impl<M: RawMutex> TaskSignals<M> {
    pub const fn new() -> Self {
        Self {
            rearm: Signal::new(),
            melody_request: Signal::new(),
            melody_done: Signal::new(),
        }
    }
}

impl<M: RawMutex> Default for TaskSignals<M> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Foreground ───────────────────────────────────────────────────────────

/// Run interaction cycles forever, re-arming the watchdog after each one
/// that counts as interaction.
///
/// Errors are logged and the next cycle starts normally.
pub async fn foreground_task<M, S, PANEL, SENSOR, DISP, SER, OUT, DELAY>(
    mut controller: Controller<'_, M, PANEL, SENSOR, DISP, SER, OUT, DELAY>,
    signals: &TaskSignals<S>,
) -> !
where
    M: RawMutex,
    S: RawMutex,
    PANEL: OctaveSelector,
    SENSOR: DistanceSensor,
    DISP: DisplaySink,
    SER: SerialSink,
    OUT: AudioOutput,
    DELAY: DelayNs,
{
    loop {
        match controller.run_cycle() {
            Ok(outcome) => {
                if outcome.should_rearm() {
                    signals.rearm.signal(());
                }
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Foreground cycle failed");
            }
        }

        // Let same-priority tasks run between cycles.
        embassy_futures::yield_now().await;
    }
}

// ── Idle watchdog ────────────────────────────────────────────────────────

/// Drive an [`IdleWatchdog`] from `embassy-time`.
///
/// While armed, waits for either the deadline or a re-arm request. On
/// expiry, requests the melody and waits for it to finish before re-arming.
pub async fn idle_watchdog_task<M: RawMutex>(signals: &TaskSignals<M>, config: WatchdogConfig) -> ! {
    let mut watchdog = IdleWatchdog::new(config, Instant::now().as_millis());

    #[cfg(feature = "defmt")]
    defmt::info!("Idle watchdog armed, interval {} ms", config.interval_ms);

    loop {
        let Some(deadline_ms) = watchdog.deadline_ms() else {
            signals.melody_done.wait().await;
            watchdog.finish(Instant::now().as_millis());
            continue;
        };

        match select(Timer::at(Instant::from_millis(deadline_ms)), signals.rearm.wait()).await {
            Either::First(()) => {
                if watchdog.poll(Instant::now().as_millis()) {
                    #[cfg(feature = "defmt")]
                    defmt::info!("Idle interval expired");
                    signals.melody_request.signal(());
                }
            }
            Either::Second(()) => {
                watchdog.arm(Instant::now().as_millis());
                #[cfg(feature = "defmt")]
                defmt::debug!("Idle watchdog re-armed");
            }
        }
    }
}

// ── Melody ───────────────────────────────────────────────────────────────

/// Play the melody each time it is requested.
///
/// [`MelodyPlayer::play()`] blocks for the whole scale; this task's
/// executor is unavailable to other tasks until it returns.
pub async fn melody_task<M, S, OUT, DELAY>(
    player: MelodyPlayer<'_, M>,
    mut synth: ToneSynthesizer<OUT, DELAY>,
    signals: &TaskSignals<S>,
) -> !
where
    M: RawMutex,
    S: RawMutex,
    OUT: AudioOutput,
    DELAY: DelayNs,
{
    loop {
        signals.melody_request.wait().await;

        if let Err(_e) = player.play(&mut synth) {
            #[cfg(feature = "defmt")]
            defmt::error!("Melody playback failed");
        }

        signals.melody_done.signal(());
    }
}
