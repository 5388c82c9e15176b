//! Boot planning: safety interlock and backend selection.
//!
//! The firmware samples the buttons once at power-on and hands the result to
//! [`plan_boot`], which decides between the bootloader and a backend set.
//! Detection is passed in as a closure so that it never runs when the safety
//! hold diverts to the bootloader.

use crate::backend::BackendKind;
use crate::detect::ConnectedConsole;
use crate::mode::ModeKind;
use crate::types::Buttons;

/// Buttons that select boot paths when held at power-on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootGestures {
    /// Divert to the USB bootloader.
    pub bootloader: Buttons,
    /// With no console attached, use the advanced USB backend plus viewer.
    pub advanced_usb: Buttons,
}

impl BootGestures {
    pub const DEFAULT: Self = Self {
        bootloader: Buttons::START,
        advanced_usb: Buttons::Z,
    };
}

impl Default for BootGestures {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Default profile family assigned to the primary backend at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DefaultMode {
    /// Plain USB link simulating a console pad.
    ConsoleSimulation,
    /// Advanced USB (DInput) for PC play.
    AdvancedUsb,
    /// GameCube or N64 console line.
    GameCubeFamily,
}

impl DefaultMode {
    #[must_use]
    pub const fn mode(self) -> ModeKind {
        match self {
            Self::ConsoleSimulation => ModeKind::UltimateSwitch,
            Self::AdvancedUsb | Self::GameCubeFamily => ModeKind::UltimateGcc,
        }
    }
}

/// Backend set chosen at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BackendPlan {
    pub primary: BackendKind,
    /// Add a viewer mirroring the primary.
    pub viewer: bool,
    pub default_mode: DefaultMode,
}

impl BackendPlan {
    #[must_use]
    pub const fn backend_count(&self) -> usize {
        if self.viewer {
            2
        } else {
            1
        }
    }
}

/// Outcome of the boot decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootPlan {
    /// Hand off to the bootloader; construct nothing.
    Bootloader,
    Start(BackendPlan),
}

/// Fatal initialisation failures. The firmware halts on any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// A backend could not claim its host-side resources.
    BackendSetup,
    /// The plan names a backend this build cannot construct.
    UnsupportedBackend,
    /// The backend context was already published.
    AlreadyPublished,
}

/// Decide what to boot from the power-on button sample.
///
/// `detect` runs at most once, and only after the safety interlock passed.
pub fn plan_boot(
    holds: Buttons,
    gestures: &BootGestures,
    detect: impl FnOnce() -> ConnectedConsole,
) -> BootPlan {
    if holds.contains(gestures.bootloader) {
        return BootPlan::Bootloader;
    }

    let plan = match detect() {
        ConnectedConsole::None if holds.contains(gestures.advanced_usb) => BackendPlan {
            primary: BackendKind::DInput,
            viewer: true,
            default_mode: DefaultMode::AdvancedUsb,
        },
        ConnectedConsole::None => BackendPlan {
            primary: BackendKind::NintendoSwitch,
            viewer: false,
            default_mode: DefaultMode::ConsoleSimulation,
        },
        ConnectedConsole::GameCube => BackendPlan {
            primary: BackendKind::GameCube,
            viewer: false,
            default_mode: DefaultMode::GameCubeFamily,
        },
        ConnectedConsole::N64 => BackendPlan {
            primary: BackendKind::N64,
            viewer: false,
            default_mode: DefaultMode::GameCubeFamily,
        },
    };
    BootPlan::Start(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(holds: Buttons, console: ConnectedConsole) -> BackendPlan {
        match plan_boot(holds, &BootGestures::DEFAULT, || console) {
            BootPlan::Start(plan) => plan,
            BootPlan::Bootloader => panic!("unexpected bootloader"),
        }
    }

    #[test]
    fn test_usb_default_is_single_switch_backend() {
        let plan = plan(Buttons::NONE, ConnectedConsole::None);
        assert_eq!(plan.primary, BackendKind::NintendoSwitch);
        assert_eq!(plan.backend_count(), 1);
        assert_eq!(plan.default_mode, DefaultMode::ConsoleSimulation);
        assert_eq!(plan.default_mode.mode(), ModeKind::UltimateSwitch);
    }

    #[test]
    fn test_alternate_gesture_adds_viewer() {
        let plan = plan(Buttons::Z, ConnectedConsole::None);
        assert_eq!(plan.primary, BackendKind::DInput);
        assert_eq!(plan.backend_count(), 2);
        assert_eq!(plan.default_mode, DefaultMode::AdvancedUsb);
    }

    #[test]
    fn test_consoles_share_gamecube_family_default() {
        for (console, kind) in [
            (ConnectedConsole::GameCube, BackendKind::GameCube),
            (ConnectedConsole::N64, BackendKind::N64),
        ] {
            // The USB gesture is irrelevant once a console is attached.
            let plan = plan(Buttons::Z, console);
            assert_eq!(plan.primary, kind);
            assert_eq!(plan.backend_count(), 1);
            assert_eq!(plan.default_mode, DefaultMode::GameCubeFamily);
            assert_eq!(plan.default_mode.mode(), ModeKind::UltimateGcc);
        }
    }

    #[test]
    fn test_safety_hold_skips_detection() {
        let mut detected = false;
        let result = plan_boot(Buttons::START | Buttons::Z, &BootGestures::DEFAULT, || {
            detected = true;
            ConnectedConsole::GameCube
        });
        assert_eq!(result, BootPlan::Bootloader);
        assert!(!detected);
    }
}
