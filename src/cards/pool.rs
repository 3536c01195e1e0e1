//! Card instance pool.
//!
//! The `CardPool` owns every card instance ever constructed and recycles
//! them across rounds. Each instance is in exactly one of two places:
//!
//! - **available**: inactive, queued for reuse (FIFO)
//! - **active**: on loan to the current round
//!
//! Construction of the presentation resources behind an instance is
//! delegated to a [`CardFactory`]; the pool only keeps the ownership
//! bookkeeping.
//!
//! ```
//! use matchit::cards::CardPool;
//!
//! let mut pool = CardPool::new();
//! pool.preload(4);
//!
//! let a = pool.acquire();
//! let b = pool.acquire();
//! assert_ne!(a, b);
//! assert_eq!(pool.constructed(), 4);
//!
//! pool.release(a);
//! pool.release(a); // already released: no-op
//! assert_eq!(pool.available(), 3);
//! ```

use std::collections::VecDeque;

use tracing::debug;

use super::card::{Card, CardVisuals, Placement, VisualId};
use crate::core::CardHandle;

/// Builds the presentation resources for a new card instance.
pub trait CardFactory {
    fn build(&mut self, handle: CardHandle) -> CardVisuals;
}

/// Factory that gives every instance a front and a back.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardVisuals;

impl CardFactory for StandardVisuals {
    fn build(&mut self, handle: CardHandle) -> CardVisuals {
        CardVisuals::complete(VisualId(handle.0 * 2), VisualId(handle.0 * 2 + 1))
    }
}

impl<F> CardFactory for F
where
    F: FnMut(CardHandle) -> CardVisuals,
{
    fn build(&mut self, handle: CardHandle) -> CardVisuals {
        self(handle)
    }
}

/// Pool of reusable card instances.
pub struct CardPool {
    /// Every instance, indexed by `CardHandle`.
    cards: Vec<Card>,

    /// Loan flag per instance.
    active: Vec<bool>,

    /// Inactive instances in release order.
    available: VecDeque<CardHandle>,

    factory: Box<dyn CardFactory>,
}

impl std::fmt::Debug for CardPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardPool")
            .field("constructed", &self.cards.len())
            .field("available", &self.available.len())
            .field("active", &self.active())
            .finish()
    }
}

impl Default for CardPool {
    fn default() -> Self {
        Self::new()
    }
}

impl CardPool {
    /// Create an empty pool using [`StandardVisuals`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(StandardVisuals)
    }

    /// Create an empty pool that builds visuals with `factory`.
    #[must_use]
    pub fn with_factory(factory: impl CardFactory + 'static) -> Self {
        Self {
            cards: Vec::new(),
            active: Vec::new(),
            available: VecDeque::new(),
            factory: Box::new(factory),
        }
    }

    /// Construct `n` inactive instances up front.
    pub fn preload(&mut self, n: usize) {
        for _ in 0..n {
            let handle = self.construct();
            self.available.push_back(handle);
        }
        debug!(count = n, total = self.cards.len(), "pool preloaded");
    }

    /// Take an instance, reusing the oldest released one if any.
    ///
    /// The instance is marked active and its placement reset to
    /// `Placement::Detached`.
    pub fn acquire(&mut self) -> CardHandle {
        let handle = match self.available.pop_front() {
            Some(handle) => handle,
            None => self.construct(),
        };

        self.active[handle.index()] = true;
        self.cards[handle.index()].begin_lease();
        handle
    }

    /// Return an instance to the available set.
    ///
    /// Unknown or already released handles are ignored.
    pub fn release(&mut self, handle: CardHandle) {
        match self.active.get_mut(handle.index()) {
            Some(active) if *active => *active = false,
            _ => return,
        }

        let card = &mut self.cards[handle.index()];
        card.reset();
        card.set_placement(Placement::Pooled);
        self.available.push_back(handle);
    }

    /// Forget the available set. Those instances are never handed out again.
    pub fn clear(&mut self) {
        self.available.clear();
    }

    #[must_use]
    pub fn get(&self, handle: CardHandle) -> Option<&Card> {
        self.cards.get(handle.index())
    }

    #[must_use]
    pub fn get_mut(&mut self, handle: CardHandle) -> Option<&mut Card> {
        self.cards.get_mut(handle.index())
    }

    #[must_use]
    pub fn is_active(&self, handle: CardHandle) -> bool {
        self.active.get(handle.index()).copied().unwrap_or(false)
    }

    /// Total instances ever constructed.
    #[must_use]
    pub fn constructed(&self) -> usize {
        self.cards.len()
    }

    /// Instances waiting for reuse.
    #[must_use]
    pub fn available(&self) -> usize {
        self.available.len()
    }

    /// Instances currently on loan.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    fn construct(&mut self) -> CardHandle {
        let handle = CardHandle::new(self.cards.len() as u32);
        let visuals = self.factory.build(handle);
        self.cards.push(Card::new(handle, visuals));
        self.active.push(false);
        handle
    }
}
