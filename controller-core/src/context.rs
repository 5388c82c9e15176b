//! Cross-context handoff and the steady-state loop steps.
//!
//! The primary context publishes a [`BackendContext`] exactly once through a
//! [`OnceLock`]. The secondary context does nothing until it observes the
//! published value, and from then on only writes the analog half of the
//! shared snapshot.

use embassy_sync::once_lock::OnceLock;

use crate::backend::{BackendKind, CommunicationBackend};
use crate::boot::BootError;
use crate::input::InputSource;
use crate::mode::{select_mode, ModeKind};
use crate::output::OutputError;
use crate::shared::SharedInputs;
use crate::types::InputState;

/// What the secondary context needs from the primary.
#[derive(Clone, Copy, Debug)]
pub struct BackendContext<'a> {
    /// Snapshot of the primary backend.
    pub inputs: &'a SharedInputs,
    pub backend_count: usize,
    pub primary: BackendKind,
}

/// Publish-once handle shared by both contexts.
pub type ContextHandle<'a> = OnceLock<BackendContext<'a>>;

/// Publish the backend context. Only the first call succeeds.
pub fn publish<'a>(handle: &ContextHandle<'a>, context: BackendContext<'a>) -> Result<(), BootError> {
    handle.init(context).map_err(|_| BootError::AlreadyPublished)
}

/// Busy-wait until the context is published.
pub fn wait_for_context<'h, 'a>(handle: &'h ContextHandle<'a>) -> &'h BackendContext<'a> {
    loop {
        if let Some(context) = handle.try_get() {
            return context;
        }
        core::hint::spin_loop();
    }
}

/// One iteration of the secondary loop: merge auxiliary analog readings.
pub fn aux_step<S: InputSource + ?Sized>(context: &BackendContext<'_>, source: &mut S) {
    context.inputs.merge_analog(source);
}

/// Receiver of the primary snapshot once per loop (keyboard emulation).
pub trait InputConsumer {
    fn consume(&mut self, inputs: &InputState);
}

impl InputConsumer for () {
    fn consume(&mut self, _inputs: &InputState) {}
}

/// One iteration of the primary loop.
///
/// Applies the mode-select gesture to the primary (first) backend, sends one
/// report on every backend in order and forwards the primary snapshot to
/// `consumer`. Transmit failures go to `on_error` with the backend index;
/// they are never retried. Returns the newly selected mode, if the gesture
/// changed it.
pub async fn run_cycle<B, C>(
    backends: &mut [B],
    consumer: &mut C,
    mut on_error: impl FnMut(usize, OutputError),
) -> Option<ModeKind>
where
    B: CommunicationBackend,
    C: InputConsumer + ?Sized,
{
    let primary = backends.first_mut()?;
    let kind = primary.kind();
    let switched = match primary.inputs().and_then(|inputs| select_mode(&inputs, kind)) {
        Some(mode) if primary.set_mode(mode) => Some(mode),
        _ => None,
    };

    for (index, backend) in backends.iter_mut().enumerate() {
        if let Err(error) = backend.send_report().await {
            on_error(index, error);
        }
    }

    if let Some(inputs) = backends.first().and_then(|primary| primary.inputs()) {
        consumer.consume(&inputs);
    }
    switched
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::backend::{ProtocolBackend, ReportMirror, ViewerBackend};
    use crate::mode::MODE_SELECT_GESTURE;
    use crate::output::ReportTransport;
    use crate::socd::SocdPolicy;
    use crate::types::Buttons;
    use controller_proto::OutputState;
    use core::future::Future;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    struct Sink {
        sent: usize,
        fail: bool,
    }

    impl ReportTransport for Sink {
        fn send(&mut self, _report: &OutputState) -> impl Future<Output = Result<(), OutputError>> {
            self.sent += 1;
            core::future::ready(if self.fail { Err(OutputError::Io) } else { Ok(()) })
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    struct Held(Buttons);

    impl InputSource for Held {
        fn merge_into(&mut self, inputs: &mut InputState) {
            inputs.buttons = self.0;
        }
    }

    /// Either kind of backend, the way a firmware dispatches them.
    enum AnyBackend<'a> {
        Primary(ProtocolBackend<'a, Sink, Held, NoopRawMutex>),
        Viewer(ViewerBackend<'a, Sink, NoopRawMutex>),
    }

    impl CommunicationBackend for AnyBackend<'_> {
        fn kind(&self) -> BackendKind {
            match self {
                Self::Primary(b) => b.kind(),
                Self::Viewer(b) => b.kind(),
            }
        }

        fn inputs(&self) -> Option<InputState> {
            match self {
                Self::Primary(b) => b.inputs(),
                Self::Viewer(b) => b.inputs(),
            }
        }

        fn mode(&self) -> Option<ModeKind> {
            match self {
                Self::Primary(b) => b.mode(),
                Self::Viewer(b) => b.mode(),
            }
        }

        fn set_mode(&mut self, mode: ModeKind) -> bool {
            match self {
                Self::Primary(b) => b.set_mode(mode),
                Self::Viewer(b) => b.set_mode(mode),
            }
        }

        async fn send_report(&mut self) -> Result<(), OutputError> {
            match self {
                Self::Primary(b) => b.send_report().await,
                Self::Viewer(b) => b.send_report().await,
            }
        }
    }

    struct Recorder(Vec<InputState>);

    impl InputConsumer for Recorder {
        fn consume(&mut self, inputs: &InputState) {
            self.0.push(*inputs);
        }
    }

    fn primary(
        shared: &SharedInputs,
        held: Buttons,
        fail: bool,
    ) -> ProtocolBackend<'_, Sink, Held, NoopRawMutex> {
        ProtocolBackend::new(
            BackendKind::DInput,
            Sink { sent: 0, fail },
            Held(held),
            shared,
            SocdPolicy::SecondInputPriority,
            ModeKind::UltimateGcc,
        )
    }

    #[test]
    fn test_cycle_sends_on_every_backend_and_forwards_snapshot() {
        let shared = SharedInputs::new();
        let mirror = ReportMirror::<NoopRawMutex>::new();
        let mut backends = [
            AnyBackend::Primary(primary(&shared, Buttons::A, false).with_mirror(&mirror)),
            AnyBackend::Viewer(ViewerBackend::new(Sink { sent: 0, fail: false }, &mirror)),
        ];
        let mut recorder = Recorder(Vec::new());

        block_on(run_cycle(&mut backends, &mut recorder, |_, _| panic!("no errors")));

        for backend in &backends {
            let sent = match backend {
                AnyBackend::Primary(b) => b.transport().sent,
                AnyBackend::Viewer(b) => b.transport().sent,
            };
            assert_eq!(sent, 1);
        }
        assert_eq!(recorder.0.len(), 1);
        assert_eq!(recorder.0[0].buttons, Buttons::A);
    }

    #[test]
    fn test_gesture_switches_only_primary_mode_once() {
        let shared = SharedInputs::new();
        let mut backends = [AnyBackend::Primary(primary(
            &shared,
            MODE_SELECT_GESTURE | Buttons::RIGHT,
            false,
        ))];

        // First cycle samples the gesture, second acts on it.
        let first = block_on(run_cycle(&mut backends, &mut (), |_, _| {}));
        let second = block_on(run_cycle(&mut backends, &mut (), |_, _| {}));
        let third = block_on(run_cycle(&mut backends, &mut (), |_, _| {}));

        assert_eq!(first, None);
        assert_eq!(second, Some(ModeKind::Fgc));
        assert_eq!(third, None);
        assert_eq!(backends[0].mode(), Some(ModeKind::Fgc));
    }

    #[test]
    fn test_errors_are_reported_with_index_and_loop_continues() {
        let shared = SharedInputs::new();
        let mirror = ReportMirror::<NoopRawMutex>::new();
        let mut backends = [
            AnyBackend::Primary(primary(&shared, Buttons::B, true).with_mirror(&mirror)),
            AnyBackend::Viewer(ViewerBackend::new(Sink { sent: 0, fail: false }, &mirror)),
        ];
        let mut errors = Vec::new();

        block_on(run_cycle(&mut backends, &mut (), |index, error| {
            errors.push((index, error));
        }));

        assert_eq!(errors, [(0, OutputError::Io)]);
    }

    #[test]
    fn test_empty_backend_set_does_nothing() {
        let mut backends: [AnyBackend<'_>; 0] = [];
        let mut recorder = Recorder(Vec::new());
        assert_eq!(block_on(run_cycle(&mut backends, &mut recorder, |_, _| {})), None);
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn test_publish_once() {
        let shared = SharedInputs::new();
        let handle = ContextHandle::new();
        let context = BackendContext {
            inputs: &shared,
            backend_count: 1,
            primary: BackendKind::GameCube,
        };
        assert_eq!(publish(&handle, context), Ok(()));
        assert_eq!(publish(&handle, context), Err(BootError::AlreadyPublished));
        assert_eq!(wait_for_context(&handle).backend_count, 1);
    }

    #[test]
    fn test_secondary_waits_for_publication() {
        static SHARED: SharedInputs = SharedInputs::new();
        static HANDLE: ContextHandle<'static> = ContextHandle::new();
        let ran_early = Arc::new(AtomicBool::new(false));
        let published = Arc::new(AtomicBool::new(false));

        struct Aux;
        impl InputSource for Aux {
            fn merge_into(&mut self, inputs: &mut InputState) {
                inputs.analog.connected = true;
                inputs.analog.stick_x = 77;
            }
        }

        let secondary = {
            let ran_early = Arc::clone(&ran_early);
            let published = Arc::clone(&published);
            thread::spawn(move || {
                let context = wait_for_context(&HANDLE);
                if !published.load(Ordering::Acquire) {
                    ran_early.store(true, Ordering::Release);
                }
                // The context is complete the moment it is visible.
                assert_eq!(context.backend_count, 2);
                assert_eq!(context.primary, BackendKind::DInput);
                aux_step(context, &mut Aux);
            })
        };

        thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(SHARED.analog().stick_x, 128);

        published.store(true, Ordering::Release);
        publish(
            &HANDLE,
            BackendContext {
                inputs: &SHARED,
                backend_count: 2,
                primary: BackendKind::DInput,
            },
        )
        .unwrap();

        secondary.join().unwrap();
        assert!(!ran_early.load(Ordering::Acquire));
        assert_eq!(SHARED.analog().stick_x, 77);
        assert!(SHARED.buttons().is_empty());
    }
}
