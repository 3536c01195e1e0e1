//! Deck generation.
//!
//! A deck is the ordered sequence of pair ids dealt into the grid: every id
//! in `[0, pairs)` appears exactly twice, in uniformly shuffled order.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{GameRng, PairId};

/// Largest even count not above `total_cards`.
#[must_use]
pub const fn effective_card_count(total_cards: usize) -> usize {
    total_cards - total_cards % 2
}

/// Shuffled sequence of paired ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    ids: Vec<PairId>,
}

impl Deck {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.ids.len() / 2
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PairId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = PairId> + '_ {
        self.ids.iter().copied()
    }

    /// Check that every id in `[0, pair_count)` appears exactly twice.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        if self.ids.len() % 2 != 0 {
            return false;
        }
        let mut counts = vec![0u8; self.pair_count()];
        for id in &self.ids {
            match counts.get_mut(id.raw() as usize) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
        counts.iter().all(|&c| c == 2)
    }
}

impl IntoIterator for Deck {
    type Item = PairId;
    type IntoIter = std::vec::IntoIter<PairId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

/// Build a shuffled deck for `total_cards` cards.
///
/// An odd count is reduced by one so every card has a partner.
///
/// ```
/// use matchit::cards::generate;
/// use matchit::core::GameRng;
///
/// let mut rng = GameRng::new(7);
/// let deck = generate(7, &mut rng);
/// assert_eq!(deck.len(), 6);
/// assert!(deck.is_well_formed());
/// ```
pub fn generate(total_cards: usize, rng: &mut GameRng) -> Deck {
    let count = effective_card_count(total_cards);
    if count != total_cards {
        warn!(total_cards, count, "total cards must be even, reducing by one");
    }

    let mut ids = Vec::with_capacity(count);
    for pair in 0..count / 2 {
        ids.push(PairId::new(pair as u32));
        ids.push(PairId::new(pair as u32));
    }

    shuffle(&mut ids, rng);
    Deck { ids }
}

/// Fisher-Yates: swap each slot with a uniform pick from itself onward.
fn shuffle(ids: &mut [PairId], rng: &mut GameRng) {
    let len = ids.len();
    for i in 0..len {
        let j = rng.gen_inclusive(i, len - 1);
        ids.swap(i, j);
    }
}
