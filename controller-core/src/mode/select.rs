//! Runtime mode-select gesture.

use super::ModeKind;
use crate::backend::BackendKind;
use crate::types::{Buttons, InputState};

/// Buttons that must be held (with Mod Y released) to open mode selection.
pub const MODE_SELECT_GESTURE: Buttons = Buttons(Buttons::MOD_X.0 | Buttons::START.0);

/// Inspect a snapshot for a mode-select gesture.
///
/// Mod X + Start + L selects Melee, + Down selects the Ultimate variant that
/// suits the backend and + Right selects the fighting-game layout. Mod Y +
/// Start is left to keyboard profiles and never selects a mode here. The
/// alternate Mod X and Mod Y keys count as their primaries.
#[must_use]
pub fn select_mode(inputs: &InputState, backend: BackendKind) -> Option<ModeKind> {
    let held = inputs.buttons.with_alternates_folded();
    if !held.contains(MODE_SELECT_GESTURE) || held.contains(Buttons::MOD_Y) {
        return None;
    }

    if held.contains(Buttons::L) {
        Some(ModeKind::Melee20Button)
    } else if held.contains(Buttons::DOWN) {
        Some(ultimate_for(backend))
    } else if held.contains(Buttons::RIGHT) {
        Some(ModeKind::Fgc)
    } else {
        None
    }
}

const fn ultimate_for(backend: BackendKind) -> ModeKind {
    match backend {
        BackendKind::NintendoSwitch => ModeKind::UltimateSwitch,
        _ => ModeKind::UltimateGcc,
    }
}
