//! Hint budget and cooldown.

/// Per-round hint bookkeeping.
///
/// A hint may start only when budget remains and no earlier hint is still
/// revealing or cooling down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HintState {
    max: u32,
    used: u32,
    busy: bool,
}

impl HintState {
    #[must_use]
    pub fn new(max: u32) -> Self {
        Self {
            max,
            used: 0,
            busy: false,
        }
    }

    /// Spend one hint if allowed. Leaves the state busy until
    /// [`HintState::finish_cooldown`].
    pub fn try_begin(&mut self) -> bool {
        if self.busy || self.used >= self.max {
            return false;
        }
        self.used += 1;
        self.busy = true;
        true
    }

    /// End the cooldown. Hints stay disabled once the budget is spent.
    pub fn finish_cooldown(&mut self) {
        if self.used < self.max {
            self.busy = false;
        }
    }

    #[must_use]
    pub fn used(&self) -> u32 {
        self.used
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.max - self.used
    }

    #[must_use]
    pub fn available(&self) -> bool {
        !self.busy && self.used < self.max
    }
}
