//! Input snapshot types: Buttons, AnalogInputs, InputState.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Digital input state represented as a bitfield.
///
/// One flag per physical button on the controller. Written only by the
/// primary execution context.
///
/// # Example
///
/// ```
/// use controller_core::Buttons;
///
/// let held = Buttons::MOD_X | Buttons::START;
/// assert!(held.contains(Buttons::START));
/// assert!(!held.contains(Buttons::MOD_Y));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u32);

impl Buttons {
    // Left hand
    pub const L: Self = Self(1 << 0);
    pub const LEFT: Self = Self(1 << 1);
    pub const DOWN: Self = Self(1 << 2);
    pub const RIGHT: Self = Self(1 << 3);
    // Left thumb
    pub const MOD_X: Self = Self(1 << 4);
    pub const MOD_Y: Self = Self(1 << 5);
    pub const MOD_X_2: Self = Self(1 << 6);
    pub const MOD_Y_2: Self = Self(1 << 7);
    // Middle
    pub const SELECT: Self = Self(1 << 8);
    pub const START: Self = Self(1 << 9);
    pub const HOME: Self = Self(1 << 10);
    // Right thumb
    pub const C_LEFT: Self = Self(1 << 11);
    pub const C_UP: Self = Self(1 << 12);
    pub const C_DOWN: Self = Self(1 << 13);
    pub const A: Self = Self(1 << 14);
    pub const C_RIGHT: Self = Self(1 << 15);
    // Right hand bottom row
    pub const B: Self = Self(1 << 16);
    pub const X: Self = Self(1 << 17);
    pub const Z: Self = Self(1 << 18);
    pub const UP: Self = Self(1 << 19);
    pub const UP_2: Self = Self(1 << 20);
    // Right hand top row
    pub const R: Self = Self(1 << 21);
    pub const Y: Self = Self(1 << 22);
    pub const LIGHTSHIELD: Self = Self(1 << 23);
    pub const MIDSHIELD: Self = Self(1 << 24);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Alternate buttons and the primary button they stand in for.
    pub const ALTERNATES: [(Self, Self); 3] = [
        (Self::UP_2, Self::UP),
        (Self::MOD_X_2, Self::MOD_X),
        (Self::MOD_Y_2, Self::MOD_Y),
    ];

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Check if any of the given buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn intersects(self, buttons: Buttons) -> bool {
        (self.0 & buttons.0) != 0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw u32 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Fold every alternate button into its primary and clear the alternate.
    #[must_use]
    pub fn with_alternates_folded(self) -> Self {
        let mut folded = self;
        for (alternate, primary) in Self::ALTERNATES {
            if folded.contains(alternate) {
                folded |= primary;
            }
            folded.set(alternate, false);
        }
        folded
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Analog input channels.
///
/// Range: [0, 255], centre 128. Written only by the secondary execution
/// context (auxiliary analog device).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogInputs {
    /// Whether an auxiliary analog device is currently attached.
    pub connected: bool,
    pub stick_x: u8,
    pub stick_y: u8,
    pub c_stick_x: u8,
    pub c_stick_y: u8,
    pub trigger_l: u8,
    pub trigger_r: u8,
}

impl AnalogInputs {
    /// No device attached, every channel at rest.
    pub const NEUTRAL: Self = Self {
        connected: false,
        stick_x: 128,
        stick_y: 128,
        c_stick_x: 128,
        c_stick_y: 128,
        trigger_l: 0,
        trigger_r: 0,
    };
}

impl Default for AnalogInputs {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Complete input snapshot for one cycle.
///
/// The digital half ([`Buttons`]) and the analog half ([`AnalogInputs`]) are
/// written by different execution contexts; see [`SharedInputs`](crate::SharedInputs).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputState {
    pub buttons: Buttons,
    pub analog: AnalogInputs,
}

impl InputState {
    /// Create a neutral snapshot (no buttons pressed, no analog device).
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            analog: AnalogInputs::NEUTRAL,
        }
    }

    /// Check whether a button is pressed.
    #[inline]
    #[must_use]
    pub const fn pressed(&self, button: Buttons) -> bool {
        self.buttons.contains(button)
    }
}
