//! Platform-agnostic input pipeline for the controller firmware.
//!
//! This crate provides the pieces that turn button and analog samples into
//! console reports, independent of the board they run on:
//!
//! - **Types**: [`Buttons`], [`AnalogInputs`], [`InputState`]
//! - **Sharing**: [`SharedInputs`], the snapshot split into a digital half
//!   (primary context) and an analog half (secondary context)
//! - **Sources**: [`InputSource`] with [`GpioButtonInput`] and [`NunchukInput`]
//! - **Resolution**: [`SocdResolver`]
//! - **Modes**: [`ControllerMode`] and the [`GameMode`] variants
//! - **Detection**: [`detect_console`]
//! - **Backends**: [`ProtocolBackend`], [`ViewerBackend`] over a [`ReportTransport`]
//! - **Orchestration**: [`plan_boot`], [`publish`], [`wait_for_context`], [`run_cycle`]
//!
//! # Example
//!
//! ```
//! use controller_core::{Buttons, ControllerMode, GameMode, InputState, ModeKind, SocdPolicy, SocdResolver};
//!
//! let mut socd = SocdResolver::new(SocdPolicy::SecondInputPriority);
//! let mut inputs = InputState::neutral();
//! inputs.buttons = socd.resolve(Buttons::RIGHT | Buttons::A);
//!
//! let report = GameMode::new(ModeKind::Melee20Button).transform(&inputs);
//! assert_eq!(report.left_stick.x, 208);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod backend;
pub mod boot;
pub mod context;
pub mod detect;
pub mod gpio;
pub mod input;
pub mod mode;
pub mod nunchuk;
pub mod output;
pub mod shared;
pub mod socd;
pub mod types;

// Re-export types at crate root for convenience
pub use backend::{BackendKind, CommunicationBackend, ProtocolBackend, ReportMirror, ViewerBackend};
pub use boot::{plan_boot, BackendPlan, BootError, BootGestures, BootPlan, DefaultMode};
pub use context::{aux_step, publish, run_cycle, wait_for_context, BackendContext, ContextHandle, InputConsumer};
pub use detect::{detect_console, ConnectedConsole, ConsoleProbe, DETECT_MAX_COMMANDS};
pub use gpio::{ButtonPin, GpioButtonInput};
pub use input::InputSource;
pub use mode::{
    select_mode, ControllerMode, FgcMode, GameMode, Melee20Button, ModeKind, UltimateGcc,
    UltimateSwitch, MODE_SELECT_GESTURE,
};
pub use nunchuk::{AuxError, NunchukInput, NUNCHUK_ADDRESS};
pub use output::{OutputError, ReportTransport};
pub use shared::SharedInputs;
pub use socd::{SocdPair, SocdPolicy, SocdResolver, DEFAULT_PAIRS};
pub use types::{AnalogInputs, Buttons, InputState};

// The output model lives in the proto crate; re-export it for firmware use.
pub use controller_proto::{AnalogStick, OutputButtons, OutputState};
