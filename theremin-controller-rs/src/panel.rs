//! Octave buttons and indicator LEDs.

use embedded_hal::digital::{Error, ErrorKind, InputPin, OutputPin};
use theremin::playback::Octave;

/// Source of the octave selection, with a way to show it back to the player.
pub trait OctaveSelector {
    /// Sample the buttons. `None` is the inactive state.
    fn read_selection(&mut self) -> Result<Option<Octave>, ErrorKind>;

    /// Light the indicator for `selection`, everything off for `None`.
    fn indicate(&mut self, selection: Option<Octave>) -> Result<(), ErrorKind>;
}

/// Two active-low push buttons and two indicator LEDs, one pair per octave.
///
/// Buttons are read as plain levels; there is no debouncing.
pub struct OctavePanel<B1, B2, L1, L2> {
    button_1: B1,
    button_2: B2,
    led_1: L1,
    led_2: L2,
}

impl<B1, B2, L1, L2> OctavePanel<B1, B2, L1, L2>
where
    B1: InputPin,
    B2: InputPin,
    L1: OutputPin,
    L2: OutputPin,
{
    pub fn new(button_1: B1, button_2: B2, led_1: L1, led_2: L2) -> Self {
        Self {
            button_1,
            button_2,
            led_1,
            led_2,
        }
    }
}

impl<B1, B2, L1, L2> OctaveSelector for OctavePanel<B1, B2, L1, L2>
where
    B1: InputPin,
    B2: InputPin,
    L1: OutputPin,
    L2: OutputPin,
{
    fn read_selection(&mut self) -> Result<Option<Octave>, ErrorKind> {
        let pressed_1 = self.button_1.is_low().map_err(|e| e.kind())?;
        let pressed_2 = self.button_2.is_low().map_err(|e| e.kind())?;
        Ok(Octave::from_buttons(pressed_1, pressed_2))
    }

    fn indicate(&mut self, selection: Option<Octave>) -> Result<(), ErrorKind> {
        self.led_1
            .set_state((selection == Some(Octave::One)).into())
            .map_err(|e| e.kind())?;
        self.led_2
            .set_state((selection == Some(Octave::Two)).into())
            .map_err(|e| e.kind())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    struct Button {
        low: bool,
    }

    impl ErrorType for Button {
        type Error = ErrorKind;
    }

    impl InputPin for Button {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low)
        }
    }

    #[derive(Default)]
    struct Led {
        on: bool,
    }

    impl ErrorType for Led {
        type Error = ErrorKind;
    }

    impl OutputPin for Led {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.on = false;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.on = true;
            Ok(())
        }
    }

    fn panel(b1_low: bool, b2_low: bool) -> OctavePanel<Button, Button, Led, Led> {
        OctavePanel::new(
            Button { low: b1_low },
            Button { low: b2_low },
            Led::default(),
            Led::default(),
        )
    }

    #[test]
    fn buttons_are_active_low() {
        assert_eq!(panel(true, false).read_selection(), Ok(Some(Octave::One)));
        assert_eq!(panel(false, true).read_selection(), Ok(Some(Octave::Two)));
    }

    #[test]
    fn none_or_both_is_inactive() {
        assert_eq!(panel(false, false).read_selection(), Ok(None));
        assert_eq!(panel(true, true).read_selection(), Ok(None));
    }

    #[test]
    fn leds_follow_selection() {
        let mut p = panel(false, false);
        p.indicate(Some(Octave::One)).unwrap();
        assert!(p.led_1.on && !p.led_2.on);
        p.indicate(Some(Octave::Two)).unwrap();
        assert!(!p.led_1.on && p.led_2.on);
        p.indicate(None).unwrap();
        assert!(!p.led_1.on && !p.led_2.on);
    }
}
