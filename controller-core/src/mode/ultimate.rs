//! Super Smash Bros. Ultimate modes.
//!
//! Stick values are offsets from centre on a +-100 scale. The GameCube
//! variant produces analog shield levels, the Switch variant maps the shield
//! buttons to bumpers because the Switch pad has digital triggers only.

use controller_proto::{AnalogStick, OutputButtons, OutputState};

use super::{apply_nunchuk, dpad_layer, map_common_buttons, stick, ControllerMode, Directions};
use crate::types::{Buttons, InputState};

const CARDINAL: u8 = 100;
const DIAGONAL: u8 = 71;

const MOD_X_HORIZONTAL: u8 = 53;
const MOD_X_TILT: u8 = 36;
const MOD_X_VERTICAL: u8 = 44;
const MOD_X_DIAGONAL: (u8, u8) = (53, 35);

const MOD_Y_HORIZONTAL: u8 = 41;
const MOD_Y_VERTICAL: u8 = 53;
const MOD_Y_DIAGONAL: (u8, u8) = (35, 53);

const SHIELD_DIAGONAL: (u8, u8) = (51, 51);

/// Angled C-stick: mostly horizontal with a slight vertical component.
const C_ANGLED: (u8, u8) = (68, 42);

const TRIGGER_FULL: u8 = 140;
const LIGHTSHIELD_LEVEL: u8 = 49;
const MIDSHIELD_LEVEL: u8 = 94;

/// Ultimate on a GameCube adapter or a GameCube/N64 console line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UltimateGcc;

/// Ultimate on the Switch USB pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UltimateSwitch;

impl ControllerMode for UltimateGcc {
    fn update_digital_outputs(&self, inputs: &InputState, outputs: &mut OutputState) {
        map_common_buttons(inputs, outputs);
        let held = inputs.buttons;
        outputs.buttons.set(OutputButtons::R, held.contains(Buttons::Z));
        outputs.buttons.set(OutputButtons::LT, held.contains(Buttons::L));
        outputs.buttons.set(OutputButtons::RT, held.contains(Buttons::R));
        outputs.buttons.set(OutputButtons::SELECT, held.contains(Buttons::SELECT));
        outputs.buttons.set(OutputButtons::HOME, held.contains(Buttons::HOME));
    }

    fn update_analog_outputs(&self, inputs: &InputState, outputs: &mut OutputState) {
        update_sticks(inputs, outputs);

        let held = inputs.buttons;
        if held.contains(Buttons::L) {
            outputs.left_trigger = TRIGGER_FULL;
        }
        outputs.right_trigger = if held.contains(Buttons::R) {
            TRIGGER_FULL
        } else if held.contains(Buttons::MIDSHIELD) {
            MIDSHIELD_LEVEL
        } else if held.contains(Buttons::LIGHTSHIELD) {
            LIGHTSHIELD_LEVEL
        } else {
            0
        };
    }
}

impl ControllerMode for UltimateSwitch {
    fn update_digital_outputs(&self, inputs: &InputState, outputs: &mut OutputState) {
        map_common_buttons(inputs, outputs);
        let held = inputs.buttons;
        outputs.buttons.set(OutputButtons::R, held.contains(Buttons::Z));
        outputs.buttons.set(OutputButtons::LT, held.contains(Buttons::L));
        outputs.buttons.set(
            OutputButtons::RT,
            held.intersects(Buttons::R | Buttons::MIDSHIELD),
        );
        outputs.buttons.set(OutputButtons::L, held.contains(Buttons::LIGHTSHIELD));
        outputs.buttons.set(OutputButtons::SELECT, held.contains(Buttons::SELECT));
        outputs.buttons.set(OutputButtons::HOME, held.contains(Buttons::HOME));
    }

    fn update_analog_outputs(&self, inputs: &InputState, outputs: &mut OutputState) {
        update_sticks(inputs, outputs);
    }
}

fn update_sticks(inputs: &InputState, outputs: &mut OutputState) {
    let held = inputs.buttons;
    let dirs = Directions::from_buttons(held);
    let mod_x = held.contains(Buttons::MOD_X);
    let mod_y = held.contains(Buttons::MOD_Y);
    let shield = held.intersects(Buttons::L | Buttons::R);

    outputs.left_stick = if dirs.diagonal() {
        let (x, y) = if shield {
            SHIELD_DIAGONAL
        } else if mod_x && !mod_y {
            MOD_X_DIAGONAL
        } else if mod_y && !mod_x {
            MOD_Y_DIAGONAL
        } else {
            (DIAGONAL, DIAGONAL)
        };
        stick(dirs.x, dirs.y, x, y)
    } else {
        let (x, y) = if mod_x && !mod_y {
            let x = if held.contains(Buttons::A) {
                MOD_X_TILT
            } else {
                MOD_X_HORIZONTAL
            };
            (x, MOD_X_VERTICAL)
        } else if mod_y && !mod_x {
            (MOD_Y_HORIZONTAL, MOD_Y_VERTICAL)
        } else {
            (CARDINAL, CARDINAL)
        };
        stick(dirs.x, dirs.y, x, y)
    };

    outputs.right_stick = if dpad_layer(held) {
        AnalogStick::NEUTRAL
    } else if dirs.c_diagonal() {
        stick(dirs.cx, dirs.cy, C_ANGLED.0, C_ANGLED.1)
    } else {
        stick(dirs.cx, dirs.cy, CARDINAL, CARDINAL)
    };

    apply_nunchuk(inputs, outputs);
}
