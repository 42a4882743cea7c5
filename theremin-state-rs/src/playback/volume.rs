use embassy_sync::blocking_mutex::raw::RawMutex;

use super::shared::SharedPlayback;
use super::{VOLUME_HIGH_BELOW, VOLUME_MUTE_ABOVE};

/// Discrete output volume, ordered quietest first.
///
/// The potentiometer is wired so that a **lower** raw reading is **louder**;
/// [`VolumeLevel::from_raw()`] hides that inversion so the rest of the
/// system can compare levels directly (`High > Low > Mute`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VolumeLevel {
    /// No synthesis at all.
    Mute,
    /// Waveform amplitude halved.
    Low,
    /// Full waveform amplitude.
    #[default]
    High,
}

impl VolumeLevel {
    /// Convert a raw 12-bit potentiometer reading.
    ///
    /// | raw             | level  |
    /// |-----------------|--------|
    /// | `< 500`         | High   |
    /// | `500 ..= 3500`  | Low    |
    /// | `> 3500`        | Mute   |
    pub fn from_raw(raw: u16) -> VolumeLevel {
        if raw < VOLUME_HIGH_BELOW {
            VolumeLevel::High
        } else if raw > VOLUME_MUTE_ABOVE {
            VolumeLevel::Mute
        } else {
            VolumeLevel::Low
        }
    }

    /// Integer amplitude divisor applied to each waveform sample.
    ///
    /// `None` for [`VolumeLevel::Mute`]: synthesis is skipped entirely.
    pub fn divisor(self) -> Option<u16> {
        match self {
            VolumeLevel::Mute => None,
            VolumeLevel::Low => Some(2),
            VolumeLevel::High => Some(1),
        }
    }

    pub fn is_mute(self) -> bool {
        matches!(self, VolumeLevel::Mute)
    }
}

/// Converts completed potentiometer conversions into [`VolumeLevel`] updates.
///
/// Meant to be called from the sampling-complete path (an ADC interrupt
/// handler or the task awaiting the conversion). It only takes the shared
/// lock for a single store and never blocks on anything else.
pub struct VolumeSampler<'a, M: RawMutex> {
    shared: &'a SharedPlayback<M>,
}

impl<'a, M: RawMutex> VolumeSampler<'a, M> {
    pub fn new(shared: &'a SharedPlayback<M>) -> Self {
        Self { shared }
    }

    /// Handle one completed conversion.
    ///
    /// Returns the new level together with a flag telling whether it differs
    /// from the previous one.
    pub fn on_sample(&self, raw: u16) -> (VolumeLevel, bool) {
        let level = VolumeLevel::from_raw(raw);
        let previous = self.shared.set_volume(level);

        #[cfg(feature = "defmt")]
        if previous != level {
            defmt::debug!("volume {} -> {} (raw {})", previous, level, raw);
        }

        (level, previous != level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    // ── Thresholds ───────────────────────────────────────────────────

    #[test]
    fn low_readings_are_loud() {
        assert_eq!(VolumeLevel::from_raw(0), VolumeLevel::High);
        assert_eq!(VolumeLevel::from_raw(499), VolumeLevel::High);
    }

    #[test]
    fn middle_readings_are_quiet() {
        assert_eq!(VolumeLevel::from_raw(500), VolumeLevel::Low);
        assert_eq!(VolumeLevel::from_raw(2000), VolumeLevel::Low);
        assert_eq!(VolumeLevel::from_raw(3500), VolumeLevel::Low);
    }

    #[test]
    fn high_readings_mute() {
        assert_eq!(VolumeLevel::from_raw(3501), VolumeLevel::Mute);
        assert_eq!(VolumeLevel::from_raw(4095), VolumeLevel::Mute);
        assert_eq!(VolumeLevel::from_raw(u16::MAX), VolumeLevel::Mute);
    }

    #[test]
    fn ordering_is_louder_is_higher() {
        assert!(VolumeLevel::High > VolumeLevel::Low);
        assert!(VolumeLevel::Low > VolumeLevel::Mute);
    }

    #[test]
    fn divisors() {
        assert_eq!(VolumeLevel::Mute.divisor(), None);
        assert_eq!(VolumeLevel::Low.divisor(), Some(2));
        assert_eq!(VolumeLevel::High.divisor(), Some(1));
    }

    // ── Sampler ──────────────────────────────────────────────────────

    #[test]
    fn sampler_publishes_level() {
        let shared: SharedPlayback<CriticalSectionRawMutex> = SharedPlayback::new();
        let sampler = VolumeSampler::new(&shared);

        let (level, changed) = sampler.on_sample(4000);
        assert_eq!(level, VolumeLevel::Mute);
        assert!(changed);
        assert_eq!(shared.volume(), VolumeLevel::Mute);
    }

    #[test]
    fn sampler_reports_unchanged_level() {
        let shared: SharedPlayback<CriticalSectionRawMutex> = SharedPlayback::new();
        let sampler = VolumeSampler::new(&shared);

        sampler.on_sample(1000);
        let (level, changed) = sampler.on_sample(1200);
        assert_eq!(level, VolumeLevel::Low);
        assert!(!changed);
    }
}
