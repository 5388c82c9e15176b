//! GPIO button matrix input source.
//!
//! Each button is wired between a GPIO and ground with the internal pull-up
//! enabled, so a pressed button reads low. Debouncing happens below this
//! layer.

use embedded_hal::digital::InputPin;

use crate::input::InputSource;
use crate::types::{Buttons, InputState};

/// Association between a logical button and the pin that senses it.
#[derive(Debug)]
pub struct ButtonPin<P> {
    pub button: Buttons,
    pub pin: P,
}

impl<P> ButtonPin<P> {
    #[must_use]
    pub const fn new(button: Buttons, pin: P) -> Self {
        Self { button, pin }
    }
}

/// Reads a fixed set of active-low button pins into the digital snapshot.
pub struct GpioButtonInput<P, const N: usize> {
    pins: [ButtonPin<P>; N],
}

impl<P: InputPin, const N: usize> GpioButtonInput<P, N> {
    /// Create a source from the build-time button mapping.
    #[must_use]
    pub const fn new(pins: [ButtonPin<P>; N]) -> Self {
        Self { pins }
    }

    /// Read every pin once and return the pressed set.
    ///
    /// A pin that reports an error reads as released.
    pub fn read(&mut self) -> Buttons {
        let mut pressed = Buttons::NONE;
        for mapping in &mut self.pins {
            if mapping.pin.is_low().unwrap_or(false) {
                pressed |= mapping.button;
            }
        }
        pressed
    }

    /// Every button this source owns.
    #[must_use]
    pub fn mask(&self) -> Buttons {
        self.pins
            .iter()
            .fold(Buttons::NONE, |mask, mapping| mask | mapping.button)
    }
}

impl<P: InputPin, const N: usize> InputSource for GpioButtonInput<P, N> {
    fn merge_into(&mut self, inputs: &mut InputState) {
        let pressed = self.read();
        let mask = self.mask();
        inputs.buttons = (inputs.buttons & !mask) | pressed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct MockPin {
        low: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low)
        }
    }

    fn matrix(a_low: bool, start_low: bool) -> GpioButtonInput<MockPin, 2> {
        GpioButtonInput::new([
            ButtonPin::new(Buttons::A, MockPin { low: a_low }),
            ButtonPin::new(Buttons::START, MockPin { low: start_low }),
        ])
    }

    #[test]
    fn test_active_low_pins_read_pressed() {
        let mut gpio = matrix(true, false);
        assert_eq!(gpio.read(), Buttons::A);
    }

    #[test]
    fn test_merge_clears_released_owned_buttons() {
        let mut gpio = matrix(false, true);
        let mut state = InputState::neutral();
        state.buttons = Buttons::A | Buttons::Z;

        gpio.merge_into(&mut state);

        // A is owned and released, Z belongs to another source.
        assert_eq!(state.buttons, Buttons::START | Buttons::Z);
    }

    #[test]
    fn test_merge_leaves_analog_untouched() {
        let mut gpio = matrix(true, true);
        let mut state = InputState::neutral();
        state.analog.stick_x = 17;
        gpio.merge_into(&mut state);
        assert_eq!(state.analog.stick_x, 17);
    }
}
