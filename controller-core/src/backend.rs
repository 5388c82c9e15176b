//! Protocol backends: the per-host transmit pipeline.
//!
//! A [`ProtocolBackend`] owns its digital input sources, a SOCD resolver, a
//! controller mode and a [`ReportTransport`]. Each [`send_report`] pulls the
//! sources into the shared snapshot, resolves, transforms and transmits one
//! report. A [`ViewerBackend`] owns nothing but a transport and replays the
//! primary's most recent report.
//!
//! [`send_report`]: CommunicationBackend::send_report

use core::future::Future;

use controller_proto::OutputState;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use crate::input::InputSource;
use crate::mode::{ControllerMode, GameMode, ModeKind};
use crate::output::{OutputError, ReportTransport};
use crate::shared::SharedInputs;
use crate::socd::{SocdPolicy, SocdResolver};
use crate::types::InputState;

/// Host protocol a backend speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackendKind {
    GameCube,
    N64,
    NintendoSwitch,
    DInput,
    /// Diagnostic mirror of another backend's output.
    Viewer,
}

/// Latest-value mailbox carrying the primary's report to a viewer.
pub type ReportMirror<M> = Signal<M, OutputState>;

/// Capability set shared by every backend variant.
pub trait CommunicationBackend {
    fn kind(&self) -> BackendKind;

    /// Read-only view of the live snapshot.
    ///
    /// `None` for backends that do not own input authority (viewers).
    fn inputs(&self) -> Option<InputState>;

    /// Active mode, `None` for backends without one (viewers).
    fn mode(&self) -> Option<ModeKind>;

    /// Replace the active mode. Returns whether anything changed.
    fn set_mode(&mut self, mode: ModeKind) -> bool;

    /// Run one cycle: sample, resolve, transform and transmit one report.
    fn send_report(&mut self) -> impl Future<Output = Result<(), OutputError>>;
}

/// Backend that owns input authority for one host protocol.
///
/// The mode is a constructor argument, so a backend without a mode cannot
/// exist.
pub struct ProtocolBackend<'a, T, S, M: RawMutex> {
    kind: BackendKind,
    transport: T,
    sources: S,
    inputs: &'a SharedInputs,
    socd: SocdResolver,
    mode: GameMode,
    mirror: Option<&'a ReportMirror<M>>,
}

impl<'a, T, S, M> ProtocolBackend<'a, T, S, M>
where
    T: ReportTransport,
    S: InputSource,
    M: RawMutex,
{
    /// Bind sources and transport. The SOCD policy is fixed from here on.
    pub fn new(
        kind: BackendKind,
        transport: T,
        sources: S,
        inputs: &'a SharedInputs,
        policy: SocdPolicy,
        mode: ModeKind,
    ) -> Self {
        Self {
            kind,
            transport,
            sources,
            inputs,
            socd: SocdResolver::new(policy),
            mode: GameMode::new(mode),
            mirror: None,
        }
    }

    /// Publish every report to `mirror` as well as the transport.
    #[must_use]
    pub fn with_mirror(mut self, mirror: &'a ReportMirror<M>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Sample, resolve and transform without transmitting.
    pub fn next_report(&mut self) -> OutputState {
        let buttons = self.inputs.merge_digital(&mut self.sources).buttons;
        let resolved = InputState {
            buttons: self.socd.resolve(buttons.with_alternates_folded()),
            analog: self.inputs.analog(),
        };
        self.mode.transform(&resolved)
    }
}

impl<T, S, M> CommunicationBackend for ProtocolBackend<'_, T, S, M>
where
    T: ReportTransport,
    S: InputSource,
    M: RawMutex,
{
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn inputs(&self) -> Option<InputState> {
        Some(self.inputs.snapshot())
    }

    fn mode(&self) -> Option<ModeKind> {
        Some(self.mode.kind())
    }

    fn set_mode(&mut self, mode: ModeKind) -> bool {
        if self.mode.kind() == mode {
            return false;
        }
        self.mode = GameMode::new(mode);
        true
    }

    async fn send_report(&mut self) -> Result<(), OutputError> {
        let report = self.next_report();
        if let Some(mirror) = self.mirror {
            mirror.signal(report);
        }
        self.transport.send(&report).await
    }
}

/// Input-inert backend that forwards the primary's latest report.
pub struct ViewerBackend<'a, T, M: RawMutex> {
    transport: T,
    mirror: &'a ReportMirror<M>,
}

impl<'a, T: ReportTransport, M: RawMutex> ViewerBackend<'a, T, M> {
    pub fn new(transport: T, mirror: &'a ReportMirror<M>) -> Self {
        Self { transport, mirror }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: ReportTransport, M: RawMutex> CommunicationBackend for ViewerBackend<'_, T, M> {
    fn kind(&self) -> BackendKind {
        BackendKind::Viewer
    }

    fn inputs(&self) -> Option<InputState> {
        None
    }

    fn mode(&self) -> Option<ModeKind> {
        None
    }

    fn set_mode(&mut self, _mode: ModeKind) -> bool {
        false
    }

    /// Forward the newest mirrored report, if any arrived since last time.
    async fn send_report(&mut self) -> Result<(), OutputError> {
        match self.mirror.try_take() {
            Some(report) => self.transport.send(&report).await,
            None => Ok(()),
        }
    }
}
