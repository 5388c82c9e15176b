//! Input source trait.

use crate::types::InputState;

/// Anything that can populate fields of an [`InputState`].
///
/// A source writes the fields it owns and leaves every other field
/// untouched, so several sources can be merged into the same snapshot in
/// sequence. Sources never fail: a device that cannot be read reports its
/// fields at rest (and, for analog devices, `connected = false`).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait InputSource {
    /// Merge this source's current readings into `inputs`.
    fn merge_into(&mut self, inputs: &mut InputState);
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    #[inline]
    fn merge_into(&mut self, inputs: &mut InputState) {
        (**self).merge_into(inputs);
    }
}

impl<A: InputSource, B: InputSource> InputSource for (A, B) {
    #[inline]
    fn merge_into(&mut self, inputs: &mut InputState) {
        self.0.merge_into(inputs);
        self.1.merge_into(inputs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Buttons;

    struct Press(Buttons);

    impl InputSource for Press {
        fn merge_into(&mut self, inputs: &mut InputState) {
            inputs.buttons |= self.0;
        }
    }

    #[test]
    fn test_tuple_merges_both_sources() {
        let mut sources = (Press(Buttons::A), Press(Buttons::Z));
        let mut state = InputState::neutral();
        sources.merge_into(&mut state);
        assert_eq!(state.buttons, Buttons::A | Buttons::Z);
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut source = Press(Buttons::START);
        let mut state = InputState::neutral();
        (&mut source).merge_into(&mut state);
        assert!(state.pressed(Buttons::START));
    }
}
