//! Super Smash Bros. Melee, 20-button layout.
//!
//! Melee reads the stick on an 80-unit radius, so every value here is an
//! offset from centre on a +-80 scale.

use controller_proto::{AnalogStick, OutputButtons, OutputState};

use super::{apply_nunchuk, dpad_layer, map_common_buttons, stick, ControllerMode, Directions};
use crate::types::{Buttons, InputState};

const CARDINAL: u8 = 80;
const DIAGONAL: (u8, u8) = (56, 56);

const MOD_X_HORIZONTAL: u8 = 53;
const MOD_X_VERTICAL: u8 = 43;
const MOD_X_DIAGONAL: (u8, u8) = (59, 25);

const MOD_Y_HORIZONTAL: u8 = 27;
const MOD_Y_VERTICAL: u8 = 59;
const MOD_Y_DIAGONAL: (u8, u8) = (25, 59);

/// Shield drop angle: just inside the platform drop notch.
const SHIELD_DROP: (u8, u8) = (56, 55);

const TRIGGER_FULL: u8 = 140;
const LIGHTSHIELD_LEVEL: u8 = 49;
const MIDSHIELD_LEVEL: u8 = 94;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Melee20Button;

impl ControllerMode for Melee20Button {
    fn update_digital_outputs(&self, inputs: &InputState, outputs: &mut OutputState) {
        map_common_buttons(inputs, outputs);
        let held = inputs.buttons;
        outputs.buttons.set(OutputButtons::R, held.contains(Buttons::Z));
        outputs.buttons.set(OutputButtons::LT, held.contains(Buttons::L));
        outputs.buttons.set(OutputButtons::RT, held.contains(Buttons::R));
    }

    fn update_analog_outputs(&self, inputs: &InputState, outputs: &mut OutputState) {
        let held = inputs.buttons;
        let dirs = Directions::from_buttons(held);
        let mod_x = held.contains(Buttons::MOD_X) && !held.contains(Buttons::MOD_Y);
        let mod_y = held.contains(Buttons::MOD_Y) && !held.contains(Buttons::MOD_X);
        let shield = held.intersects(Buttons::L | Buttons::R);

        let (x, y) = if dirs.diagonal() {
            if shield && !mod_x && !mod_y {
                SHIELD_DROP
            } else if mod_x {
                MOD_X_DIAGONAL
            } else if mod_y {
                MOD_Y_DIAGONAL
            } else {
                DIAGONAL
            }
        } else if mod_x {
            (MOD_X_HORIZONTAL, MOD_X_VERTICAL)
        } else if mod_y {
            (MOD_Y_HORIZONTAL, MOD_Y_VERTICAL)
        } else {
            (CARDINAL, CARDINAL)
        };
        outputs.left_stick = stick(dirs.x, dirs.y, x, y);

        outputs.right_stick = if dpad_layer(held) {
            AnalogStick::NEUTRAL
        } else if dirs.c_diagonal() {
            stick(dirs.cx, dirs.cy, DIAGONAL.0, DIAGONAL.1)
        } else {
            stick(dirs.cx, dirs.cy, CARDINAL, CARDINAL)
        };

        apply_nunchuk(inputs, outputs);

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
