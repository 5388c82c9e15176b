//! The snapshot shared between the two execution contexts.
//!
//! The primary context owns the digital half and the secondary context owns
//! the analog half. Each field is its own atomic cell and there is no lock:
//! a reader may pair fresh buttons with analog values up to one secondary
//! period old (and vice versa). The partition is what makes this sound, so
//! writers only ever go through [`SharedInputs::merge_digital`] or
//! [`SharedInputs::merge_analog`], which store their own half and nothing
//! else.

use portable_atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::input::InputSource;
use crate::types::{AnalogInputs, Buttons, InputState};

/// Live input snapshot readable from any context.
#[derive(Debug)]
pub struct SharedInputs {
    buttons: AtomicU32,
    connected: AtomicBool,
    stick_x: AtomicU8,
    stick_y: AtomicU8,
    c_stick_x: AtomicU8,
    c_stick_y: AtomicU8,
    trigger_l: AtomicU8,
    trigger_r: AtomicU8,
}

impl SharedInputs {
    /// A neutral snapshot, usable in a `static`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buttons: AtomicU32::new(0),
            connected: AtomicBool::new(false),
            stick_x: AtomicU8::new(AnalogInputs::NEUTRAL.stick_x),
            stick_y: AtomicU8::new(AnalogInputs::NEUTRAL.stick_y),
            c_stick_x: AtomicU8::new(AnalogInputs::NEUTRAL.c_stick_x),
            c_stick_y: AtomicU8::new(AnalogInputs::NEUTRAL.c_stick_y),
            trigger_l: AtomicU8::new(AnalogInputs::NEUTRAL.trigger_l),
            trigger_r: AtomicU8::new(AnalogInputs::NEUTRAL.trigger_r),
        }
    }

    /// Read-only copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> InputState {
        InputState {
            buttons: self.buttons(),
            analog: self.analog(),
        }
    }

    /// Current digital half.
    #[inline]
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        Buttons(self.buttons.load(Ordering::Acquire))
    }

    /// Current analog half.
    #[must_use]
    pub fn analog(&self) -> AnalogInputs {
        AnalogInputs {
            connected: self.connected.load(Ordering::Acquire),
            stick_x: self.stick_x.load(Ordering::Relaxed),
            stick_y: self.stick_y.load(Ordering::Relaxed),
            c_stick_x: self.c_stick_x.load(Ordering::Relaxed),
            c_stick_y: self.c_stick_y.load(Ordering::Relaxed),
            trigger_l: self.trigger_l.load(Ordering::Relaxed),
            trigger_r: self.trigger_r.load(Ordering::Relaxed),
        }
    }

    /// Primary context: run digital sources and store the digital half.
    ///
    /// Whatever the source writes to the analog half of its scratch copy is
    /// discarded. Returns the snapshot the source produced.
    pub fn merge_digital<S: InputSource + ?Sized>(&self, source: &mut S) -> InputState {
        let mut scratch = self.snapshot();
        source.merge_into(&mut scratch);
        self.buttons.store(scratch.buttons.raw(), Ordering::Release);
        scratch
    }

    /// Secondary context: run analog sources and store the analog half.
    ///
    /// Whatever the source writes to the digital half of its scratch copy is
    /// discarded. Returns the snapshot the source produced.
    pub fn merge_analog<S: InputSource + ?Sized>(&self, source: &mut S) -> InputState {
        let mut scratch = self.snapshot();
        source.merge_into(&mut scratch);
        let analog = scratch.analog;
        self.stick_x.store(analog.stick_x, Ordering::Relaxed);
        self.stick_y.store(analog.stick_y, Ordering::Relaxed);
        self.c_stick_x.store(analog.c_stick_x, Ordering::Relaxed);
        self.c_stick_y.store(analog.c_stick_y, Ordering::Relaxed);
        self.trigger_l.store(analog.trigger_l, Ordering::Relaxed);
        self.trigger_r.store(analog.trigger_r, Ordering::Relaxed);
        self.connected.store(analog.connected, Ordering::Release);
        scratch
    }
}

impl Default for SharedInputs {
    fn default() -> Self {
        Self::new()
    }
}
