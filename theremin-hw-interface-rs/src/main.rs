//! theremin-hw-interface
//!
//! Ultrasonic theremin firmware for the Raspberry Pi Pico 2. Wires the
//! library crates into three execution contexts:
//!
//! 1. **Thread mode**: the foreground task. Reads the octave buttons, ranges
//!    the hand, shows the note on the 8-segment display, sends it over the
//!    UART and plays it for one second. Each active cycle re-arms the idle
//!    watchdog.
//! 2. **SWI_IRQ_0** (medium priority): the idle watchdog and the melody
//!    task. After 30 s without interaction the melody preempts the
//!    foreground mid-note, plays the scale in octave 2, restores the
//!    interrupted note and octave, and the foreground resumes.
//! 3. **SWI_IRQ_1** (high priority): the volume task. Samples the volume
//!    potentiometer so the level changes even while the melody plays.
//!
//! The speaker is driven by PWM; both synthesizers share it through a
//! `SharedAudio` that locks per sample.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::uart::{self, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ranger_driver::{Ranger, RangerConfig};
use theremin::idle_watchdog::WatchdogConfig;
use theremin::playback::{SharedPlayback, VolumeSampler};
use theremin_controller::{
    foreground_task, idle_watchdog_task, melody_task, Controller, ControllerConfig, OctavePanel,
    SerialSink, TaskSignals,
};
use theremin_segment_display::{ShiftRegisterConfig, ShiftRegisterDisplay};
use theremin_tone::waveform::OUTPUT_FULL_SCALE;
use theremin_tone::{MelodyConfig, MelodyPlayer, PwmAudio, SharedAudio, ToneConfig, ToneSynthesizer};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

// ---------------------------------------------------------------------------
// Executors
// ---------------------------------------------------------------------------

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_MED: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_MED.on_interrupt()
}

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Note, octave and volume. Written by the foreground, the volume task and
/// the melody, from three priority levels.
static PLAYBACK: SharedPlayback<CriticalSectionRawMutex> = SharedPlayback::new();

/// Re-arm, melody request and melody done.
static SIGNALS: TaskSignals<CriticalSectionRawMutex> = TaskSignals::new();

/// The PWM speaker output, shared by the foreground and melody synthesizers.
static AUDIO: StaticCell<SharedAudio<CriticalSectionRawMutex, PwmAudio<Pwm<'static>>>> =
    StaticCell::new();

/// Period between volume potentiometer conversions.
const VOLUME_SAMPLE_PERIOD_MS: u64 = 20;

/// RP2350 core clock in MHz.
const CORE_CLOCK_MHZ: f32 = 150.0;

/// Ranger calibration for the Pico 2.
///
/// Assumes one echo poll iteration costs the same `cycles_per_tick` and
/// `offset_cycles` as on the calibrated board, and rescales only the cycle
/// period to the 150 MHz core clock. If the poll loop compiles to more
/// cycles per iteration, distances read proportionally short; correct that
/// here by raising `cycles_per_tick`, since the band edges in the note
/// mapper are fixed.
fn ranger_config() -> RangerConfig {
    RangerConfig {
        cycle_period_us: 1.0 / CORE_CLOCK_MHZ,
        ..RangerConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

type Audio = &'static SharedAudio<CriticalSectionRawMutex, PwmAudio<Pwm<'static>>>;

type Panel = OctavePanel<Input<'static>, Input<'static>, Output<'static>, Output<'static>>;

type Sensor = Ranger<Output<'static>, Input<'static>, Delay>;

type Display = ShiftRegisterDisplay<Output<'static>, Output<'static>, Output<'static>, Delay>;

type ForegroundController =
    Controller<'static, CriticalSectionRawMutex, Panel, Sensor, Display, UartSerial, Audio, Delay>;

/// Blocking UART transmitter as a fire-and-forget byte sink.
struct UartSerial(UartTx<'static, UART0, uart::Blocking>);

impl SerialSink for UartSerial {
    fn write_byte(&mut self, byte: u8) {
        let _ = self.0.blocking_write(&[byte]);
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[embassy_executor::task]
async fn foreground(controller: ForegroundController) {
    foreground_task(controller, &SIGNALS).await
}

#[embassy_executor::task]
async fn watchdog(config: WatchdogConfig) {
    idle_watchdog_task(&SIGNALS, config).await
}

#[embassy_executor::task]
async fn melody(synth: ToneSynthesizer<Audio, Delay>, config: MelodyConfig) {
    melody_task(MelodyPlayer::new(&PLAYBACK, config), synth, &SIGNALS).await
}

/// Periodic potentiometer sampling.
///
/// Runs above the melody so the dial stays live during auto-play. The
/// shared lock is held for a single store per conversion.
#[embassy_executor::task]
async fn volume(mut adc: Adc<'static, adc::Async>, mut pot: adc::Channel<'static>) {
    info!("Volume task started");
    let sampler = VolumeSampler::new(&PLAYBACK);

    loop {
        match adc.read(&mut pot).await {
            Ok(raw) => {
                let (level, changed) = sampler.on_sample(raw);
                if changed {
                    info!("Volume {}", level);
                }
            }
            Err(_) => warn!("Volume conversion failed"),
        }

        Timer::after_millis(VOLUME_SAMPLE_PERIOD_MS).await;
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("theremin-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // UART_TX    → GP0   (p.PIN_0)   115200 8N1, note telemetry
    // TRIGGER    → GP2   (p.PIN_2)
    // ECHO       → GP3   (p.PIN_3)
    // SR_DATA    → GP6   (p.PIN_6)
    // SR_CLOCK   → GP7   (p.PIN_7)
    // SR_LATCH   → GP8   (p.PIN_8)
    // OCTAVE_BTN → GP10 / GP11      active-low, pull-up enabled
    // OCTAVE_LED → GP14 / GP15
    // SPEAKER    → GP16  (PWM slice 0, channel A)
    // SPK_EN     → GP17  amplifier enable, held high
    // VOLUME     → GP26  (ADC0)
    // ———————————————————————————————————————————————————————————————————————

    // —— Foreground peripherals —————————————————————————————————————————————

    let panel = OctavePanel::new(
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Output::new(p.PIN_14, Level::Low),
        Output::new(p.PIN_15, Level::Low),
    );

    let ranger = Ranger::new(
        Output::new(p.PIN_2, Level::Low),
        Input::new(p.PIN_3, Pull::None),
        Delay,
        ranger_config(),
    );

    let mut display = ShiftRegisterDisplay::new(
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Delay,
        ShiftRegisterConfig::default(),
    );
    if display.init().is_err() {
        error!("Display init failed");
    }

    let serial = UartSerial(UartTx::new_blocking(p.UART0, p.PIN_0, uart::Config::default()));

    // —— Audio ——————————————————————————————————————————————————————————————

    let mut pwm_config = pwm::Config::default();
    pwm_config.top = OUTPUT_FULL_SCALE;
    let speaker = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config);
    let audio: Audio = AUDIO.init(SharedAudio::new(PwmAudio::new(speaker)));

    // Keep the amplifier enabled for the life of the program.
    let speaker_enable = Output::new(p.PIN_17, Level::High);
    core::mem::forget(speaker_enable);

    let foreground_synth = ToneSynthesizer::new(audio, Delay, ToneConfig::default());
    let melody_synth = ToneSynthesizer::new(audio, Delay, ToneConfig::default());

    // —— Volume ————————————————————————————————————————————————————————————

    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let pot = adc::Channel::new_pin(p.PIN_26, Pull::None);

    // —— Spawn tasks ————————————————————————————————————————————————————————

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    unwrap!(high_spawner.spawn(volume(adc, pot)));

    interrupt::SWI_IRQ_0.set_priority(Priority::P3);
    let med_spawner = EXECUTOR_MED.start(interrupt::SWI_IRQ_0);
    unwrap!(med_spawner.spawn(watchdog(WatchdogConfig::default())));
    unwrap!(med_spawner.spawn(melody(melody_synth, MelodyConfig::default())));

    let controller = Controller::new(
        &PLAYBACK,
        panel,
        ranger,
        display,
        serial,
        foreground_synth,
        ControllerConfig::default(),
    );
    unwrap!(spawner.spawn(foreground(controller)));

    info!("All tasks spawned");
}
