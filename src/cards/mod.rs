//! Cards: the per-card state object, the instance pool and the deck
//! generator.

pub mod card;
pub mod deck;
pub mod pool;

pub use card::{Card, CardState, CardVisuals, Placement, Selected, VisualId, DEFAULT_FLIP_MS};
pub use deck::{effective_card_count, generate, Deck};
pub use pool::{CardFactory, CardPool, StandardVisuals};
