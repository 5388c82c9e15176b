//! Controller modes: per-game transformation of a resolved snapshot into an
//! [`OutputState`].
//!
//! A mode is a pure function of its input. It never sees another backend's
//! snapshot and keeps no state between calls, so swapping modes on a backend
//! leaves everything else (SOCD history, transport) untouched.

mod fgc;
mod melee;
mod select;
mod ultimate;

pub use fgc::FgcMode;
pub use melee::Melee20Button;
pub use select::{select_mode, MODE_SELECT_GESTURE};
pub use ultimate::{UltimateGcc, UltimateSwitch};

use controller_proto::{AnalogStick, OutputButtons, OutputState, ANALOG_NEUTRAL};

use crate::types::{Buttons, InputState};

/// Input-to-output transformation for one console/game profile.
pub trait ControllerMode {
    /// Write the button half of `outputs`.
    fn update_digital_outputs(&self, inputs: &InputState, outputs: &mut OutputState);

    /// Write the stick and trigger half of `outputs`.
    fn update_analog_outputs(&self, inputs: &InputState, outputs: &mut OutputState);

    /// Produce a fresh report from a resolved snapshot.
    fn transform(&self, inputs: &InputState) -> OutputState {
        let mut outputs = OutputState::neutral();
        self.update_digital_outputs(inputs, &mut outputs);
        self.update_analog_outputs(inputs, &mut outputs);
        outputs
    }
}

/// Selector for the available modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeKind {
    Melee20Button,
    UltimateGcc,
    UltimateSwitch,
    Fgc,
}

/// The mode slot of a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameMode {
    Melee20Button(Melee20Button),
    UltimateGcc(UltimateGcc),
    UltimateSwitch(UltimateSwitch),
    Fgc(FgcMode),
}

impl GameMode {
    #[must_use]
    pub const fn new(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Melee20Button => Self::Melee20Button(Melee20Button),
            ModeKind::UltimateGcc => Self::UltimateGcc(UltimateGcc),
            ModeKind::UltimateSwitch => Self::UltimateSwitch(UltimateSwitch),
            ModeKind::Fgc => Self::Fgc(FgcMode),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ModeKind {
        match self {
            Self::Melee20Button(_) => ModeKind::Melee20Button,
            Self::UltimateGcc(_) => ModeKind::UltimateGcc,
            Self::UltimateSwitch(_) => ModeKind::UltimateSwitch,
            Self::Fgc(_) => ModeKind::Fgc,
        }
    }
}

impl From<ModeKind> for GameMode {
    fn from(kind: ModeKind) -> Self {
        Self::new(kind)
    }
}

impl ControllerMode for GameMode {
    fn update_digital_outputs(&self, inputs: &InputState, outputs: &mut OutputState) {
        match self {
            Self::Melee20Button(mode) => mode.update_digital_outputs(inputs, outputs),
            Self::UltimateGcc(mode) => mode.update_digital_outputs(inputs, outputs),
            Self::UltimateSwitch(mode) => mode.update_digital_outputs(inputs, outputs),
            Self::Fgc(mode) => mode.update_digital_outputs(inputs, outputs),
        }
    }

    fn update_analog_outputs(&self, inputs: &InputState, outputs: &mut OutputState) {
        match self {
            Self::Melee20Button(mode) => mode.update_analog_outputs(inputs, outputs),
            Self::UltimateGcc(mode) => mode.update_analog_outputs(inputs, outputs),
            Self::UltimateSwitch(mode) => mode.update_analog_outputs(inputs, outputs),
            Self::Fgc(mode) => mode.update_analog_outputs(inputs, outputs),
        }
    }
}

/// Signed direction of each stick axis, -1, 0 or 1, +Y up.
///
/// Computed from SOCD-resolved buttons, so opposed members never cancel out
/// here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Directions {
    pub x: i8,
    pub y: i8,
    pub cx: i8,
    pub cy: i8,
}

impl Directions {
    pub fn from_buttons(buttons: Buttons) -> Self {
        let axis = |neg: Buttons, pos: Buttons| -> i8 {
            i8::from(buttons.contains(pos)) - i8::from(buttons.contains(neg))
        };
        Self {
            x: axis(Buttons::LEFT, Buttons::RIGHT),
            y: axis(Buttons::DOWN, Buttons::UP),
            cx: axis(Buttons::C_LEFT, Buttons::C_RIGHT),
            cy: axis(Buttons::C_DOWN, Buttons::C_UP),
        }
    }

    pub const fn horizontal(&self) -> bool {
        self.x != 0
    }

    pub const fn vertical(&self) -> bool {
        self.y != 0
    }

    pub const fn diagonal(&self) -> bool {
        self.horizontal() && self.vertical()
    }

    pub const fn c_horizontal(&self) -> bool {
        self.cx != 0
    }

    pub const fn c_vertical(&self) -> bool {
        self.cy != 0
    }

    pub const fn c_diagonal(&self) -> bool {
        self.c_horizontal() && self.c_vertical()
    }
}

/// Offset the neutral value by `magnitude` in `direction`.
pub(crate) const fn axis(direction: i8, magnitude: u8) -> u8 {
    if direction > 0 {
        ANALOG_NEUTRAL.saturating_add(magnitude)
    } else if direction < 0 {
        ANALOG_NEUTRAL.saturating_sub(magnitude)
    } else {
        ANALOG_NEUTRAL
    }
}

/// Stick at `(x, y)` magnitudes along the given directions.
pub(crate) const fn stick(x_dir: i8, y_dir: i8, x: u8, y: u8) -> AnalogStick {
    AnalogStick::new(axis(x_dir, x), axis(y_dir, y))
}

/// Buttons shared by every mode: face buttons, start and the D-pad layer.
///
/// With both modifiers held the C-buttons become a D-pad.
pub(crate) fn map_common_buttons(inputs: &InputState, outputs: &mut OutputState) {
    let held = inputs.buttons;
    let map = [
        (Buttons::A, OutputButtons::A),
        (Buttons::B, OutputButtons::B),
        (Buttons::X, OutputButtons::X),
        (Buttons::Y, OutputButtons::Y),
        (Buttons::START, OutputButtons::START),
    ];
    for (input, output) in map {
        if held.contains(input) {
            outputs.buttons |= output;
        }
    }

    if dpad_layer(held) {
        let dpad = [
            (Buttons::C_UP, OutputButtons::DPAD_UP),
            (Buttons::C_DOWN, OutputButtons::DPAD_DOWN),
            (Buttons::C_LEFT, OutputButtons::DPAD_LEFT),
            (Buttons::C_RIGHT, OutputButtons::DPAD_RIGHT),
        ];
        for (input, output) in dpad {
            if held.contains(input) {
                outputs.buttons |= output;
            }
        }
    }
}

/// Both modifiers held: C-buttons act as a D-pad instead of the C-stick.
pub(crate) const fn dpad_layer(held: Buttons) -> bool {
    held.contains(Buttons::MOD_X) && held.contains(Buttons::MOD_Y)
}

/// Replace the left stick with the auxiliary stick when one is attached.
pub(crate) fn apply_nunchuk(inputs: &InputState, outputs: &mut OutputState) {
    if inputs.analog.connected {
        outputs.left_stick = AnalogStick::new(inputs.analog.stick_x, inputs.analog.stick_y);
    }
}
