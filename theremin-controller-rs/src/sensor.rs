//! Distance source used by the controller.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use ranger_driver::{Ranger, RangerError};

/// Anything that can produce one distance reading in centimeters.
pub trait DistanceSensor {
    fn measure_distance(&mut self) -> Result<f32, RangerError>;
}

impl<TRIG, ECHO, DELAY> DistanceSensor for Ranger<TRIG, ECHO, DELAY>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    DELAY: DelayNs,
{
    fn measure_distance(&mut self) -> Result<f32, RangerError> {
        Ranger::measure_distance(self)
    }
}
