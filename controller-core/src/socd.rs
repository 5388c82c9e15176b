//! Simultaneous opposite cardinal direction (SOCD) resolution.
//!
//! Each opposed pair of direction buttons is resolved independently so that
//! at most one member of a pair survives. The resolver keeps a little state
//! per pair (previous raw press and the current winner) because the
//! second-input policies depend on press order across cycles.

use crate::types::Buttons;

/// Conflict policy applied when both members of a pair are held.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocdPolicy {
    /// Both held resolves to neither.
    Neutral,
    /// The most recently pressed direction wins. Releasing it lets the other
    /// (still held) direction reassert immediately.
    #[default]
    SecondInputPriority,
    /// As [`SocdPolicy::SecondInputPriority`], but a direction that lost
    /// stays suppressed until it is pressed again.
    SecondInputPriorityNoReactivation,
    /// The first member of the pair always wins.
    Dir1Priority,
    /// The second member of the pair always wins.
    Dir2Priority,
}

/// Two opposed buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SocdPair {
    pub dir1: Buttons,
    pub dir2: Buttons,
}

impl SocdPair {
    #[must_use]
    pub const fn new(dir1: Buttons, dir2: Buttons) -> Self {
        Self { dir1, dir2 }
    }
}

/// Stick and C-stick pairs.
pub const DEFAULT_PAIRS: [SocdPair; 4] = [
    SocdPair::new(Buttons::LEFT, Buttons::RIGHT),
    SocdPair::new(Buttons::DOWN, Buttons::UP),
    SocdPair::new(Buttons::C_LEFT, Buttons::C_RIGHT),
    SocdPair::new(Buttons::C_DOWN, Buttons::C_UP),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Dir1,
    Dir2,
}

#[derive(Clone, Copy, Default, Debug)]
struct PairState {
    held1: bool,
    held2: bool,
    winner: Option<Side>,
}

/// Stateful resolver for a fixed set of pairs under one policy.
///
/// # Example
///
/// ```
/// use controller_core::{Buttons, SocdPolicy, SocdResolver};
///
/// let mut socd = SocdResolver::new(SocdPolicy::SecondInputPriority);
/// assert_eq!(socd.resolve(Buttons::LEFT), Buttons::LEFT);
/// assert_eq!(socd.resolve(Buttons::LEFT | Buttons::RIGHT), Buttons::RIGHT);
/// assert_eq!(socd.resolve(Buttons::LEFT), Buttons::LEFT);
/// ```
#[derive(Clone, Debug)]
pub struct SocdResolver<const N: usize = 4> {
    policy: SocdPolicy,
    pairs: [SocdPair; N],
    state: [PairState; N],
}

impl SocdResolver<4> {
    /// Resolver over [`DEFAULT_PAIRS`].
    #[must_use]
    pub fn new(policy: SocdPolicy) -> Self {
        Self::with_pairs(policy, DEFAULT_PAIRS)
    }
}

impl<const N: usize> SocdResolver<N> {
    #[must_use]
    pub fn with_pairs(policy: SocdPolicy, pairs: [SocdPair; N]) -> Self {
        Self {
            policy,
            pairs,
            state: [PairState::default(); N],
        }
    }

    /// Resolve one cycle's raw buttons. Buttons outside the pairs pass through.
    pub fn resolve(&mut self, raw: Buttons) -> Buttons {
        let mut resolved = raw;
        for (pair, state) in self.pairs.iter().zip(self.state.iter_mut()) {
            let held1 = raw.contains(pair.dir1);
            let held2 = raw.contains(pair.dir2);
            let winner = step(self.policy, state, held1, held2);

            resolved.set(pair.dir1, winner == Some(Side::Dir1));
            resolved.set(pair.dir2, winner == Some(Side::Dir2));
        }
        resolved
    }
}

fn step(policy: SocdPolicy, state: &mut PairState, held1: bool, held2: bool) -> Option<Side> {
    let new1 = held1 && !state.held1;
    let new2 = held2 && !state.held2;
    let no_reactivation = policy == SocdPolicy::SecondInputPriorityNoReactivation;

    let winner = match (held1, held2) {
        (false, false) => None,
        (true, false) => single(Side::Dir1, new1, state.winner, no_reactivation),
        (false, true) => single(Side::Dir2, new2, state.winner, no_reactivation),
        (true, true) => match policy {
            SocdPolicy::Neutral => None,
            SocdPolicy::Dir1Priority => Some(Side::Dir1),
            SocdPolicy::Dir2Priority => Some(Side::Dir2),
            SocdPolicy::SecondInputPriority
            | SocdPolicy::SecondInputPriorityNoReactivation => match (new1, new2) {
                (true, true) => None,
                (true, false) => Some(Side::Dir1),
                (false, true) => Some(Side::Dir2),
                (false, false) => state.winner,
            },
        },
    };

    state.held1 = held1;
    state.held2 = held2;
    state.winner = winner;
    winner
}

fn single(side: Side, newly: bool, previous: Option<Side>, no_reactivation: bool) -> Option<Side> {
    if no_reactivation && !newly && previous != Some(side) {
        None
    } else {
        Some(side)
    }
}
