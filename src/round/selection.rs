//! Pairwise selection state machine.
//!
//! ```text
//! Idle --tap(a)--> OnePending(a) --tap(b), b != a--> Resolving(a, b) --timer--> Idle
//! ```
//!
//! Taps on the pending card and taps while resolving are ignored.

use smallvec::SmallVec;

use crate::core::CardHandle;
use crate::schedule::TimerId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// No card pending.
    #[default]
    Idle,
    /// First card picked, waiting for the second.
    OnePending { first: CardHandle },
    /// Two cards picked; the comparison fires when `timer` elapses.
    Resolving {
        first: CardHandle,
        second: CardHandle,
        timer: TimerId,
    },
}

/// Result of feeding a selection into the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Now waiting for a second card.
    First,
    /// Pair complete; schedule the comparison.
    Pair { first: CardHandle, second: CardHandle },
    /// Nothing changed.
    Ignored,
}

impl Selection {
    /// Work out the transition for a newly selected `card`.
    ///
    /// The caller applies it: `First` moves to `OnePending` here, `Pair`
    /// needs a timer and is completed with [`Selection::resolving`].
    pub fn select(&mut self, card: CardHandle) -> Advance {
        match *self {
            Selection::Idle => {
                *self = Selection::OnePending { first: card };
                Advance::First
            }
            Selection::OnePending { first } if first != card => Advance::Pair {
                first,
                second: card,
            },
            _ => Advance::Ignored,
        }
    }

    #[must_use]
    pub fn resolving(first: CardHandle, second: CardHandle, timer: TimerId) -> Self {
        Selection::Resolving {
            first,
            second,
            timer,
        }
    }

    /// Cards awaiting resolution, in pick order.
    #[must_use]
    pub fn pending_cards(&self) -> SmallVec<[CardHandle; 2]> {
        match *self {
            Selection::Idle => SmallVec::new(),
            Selection::OnePending { first } => smallvec::smallvec![first],
            Selection::Resolving { first, second, .. } => smallvec::smallvec![first, second],
        }
    }

    #[must_use]
    pub fn contains(&self, card: CardHandle) -> bool {
        self.pending_cards().contains(&card)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    #[must_use]
    pub fn is_resolving(&self) -> bool {
        matches!(self, Selection::Resolving { .. })
    }
}
