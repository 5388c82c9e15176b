//! Traditional fighting-game layout: directions on the D-pad, no sticks.

use controller_proto::{OutputButtons, OutputState};

use super::ControllerMode;
use crate::types::{Buttons, InputState};

/// D-pad fighting-game mode.
///
/// The thumb C-up key doubles as up so jumps can be pressed with either hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FgcMode;

const BUTTON_MAP: [(Buttons, OutputButtons); 10] = [
    (Buttons::B, OutputButtons::A),
    (Buttons::X, OutputButtons::B),
    (Buttons::Z, OutputButtons::RT),
    (Buttons::R, OutputButtons::X),
    (Buttons::Y, OutputButtons::Y),
    (Buttons::LIGHTSHIELD, OutputButtons::R),
    (Buttons::MIDSHIELD, OutputButtons::LT),
    (Buttons::START, OutputButtons::START),
    (Buttons::SELECT, OutputButtons::SELECT),
    (Buttons::HOME, OutputButtons::HOME),
];

impl ControllerMode for FgcMode {
    fn update_digital_outputs(&self, inputs: &InputState, outputs: &mut OutputState) {
        let held = inputs.buttons;
        for (input, output) in BUTTON_MAP {
            if held.contains(input) {
                outputs.buttons |= output;
            }
        }

        let up = held.intersects(Buttons::UP | Buttons::C_UP);
        let down = held.contains(Buttons::DOWN) && !up;
        outputs.buttons.set(OutputButtons::DPAD_UP, up);
        outputs.buttons.set(OutputButtons::DPAD_DOWN, down);
        outputs
            .buttons
            .set(OutputButtons::DPAD_LEFT, held.contains(Buttons::LEFT));
        outputs
            .buttons
            .set(OutputButtons::DPAD_RIGHT, held.contains(Buttons::RIGHT));
    }

    fn update_analog_outputs(&self, _inputs: &InputState, _outputs: &mut OutputState) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use controller_proto::AnalogStick;

    fn run(buttons: Buttons) -> OutputState {
        let mut inputs = InputState::neutral();
        inputs.buttons = buttons;
        FgcMode.transform(&inputs)
    }

    #[test]
    fn test_directions_go_to_dpad() {
        let out = run(Buttons::LEFT | Buttons::DOWN);
        assert_eq!(out.buttons, OutputButtons::DPAD_LEFT | OutputButtons::DPAD_DOWN);
        assert_eq!(out.left_stick, AnalogStick::NEUTRAL);
    }

    #[test]
    fn test_up_beats_down() {
        let out = run(Buttons::C_UP | Buttons::DOWN);
        assert_eq!(out.buttons, OutputButtons::DPAD_UP);
    }

    #[test]
    fn test_attack_buttons() {
        let out = run(Buttons::B | Buttons::R | Buttons::Z);
        assert_eq!(
            out.buttons,
            OutputButtons::A | OutputButtons::X | OutputButtons::RT
        );
    }
}
