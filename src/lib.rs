//! # matchit
//!
//! Round engine for a tile-matching memory game.
//!
//! A grid of face-down cards is dealt in matched pairs. The player reveals
//! two at a time; pairs are retired, mismatches flip back, and the round
//! ends when every pair is found.
//!
//! ## Design Principles
//!
//! 1. **Presentation-free**: The engine emits [`GameEvent`]s for flips,
//!    sounds, stats and victory. Rendering, audio and input belong to the
//!    host.
//!
//! 2. **Host-driven clock**: Every wait is a cancellable task on a virtual
//!    clock the host advances. Nothing blocks.
//!
//! 3. **Owned collaborators**: The score store, card pool and RNG are passed
//!    in at construction; there are no globals.
//!
//! ## Modules
//!
//! - `core`: Ids, RNG, configuration, errors, events
//! - `cards`: Card state object, instance pool, deck generator
//! - `schedule`: Cooperative timers
//! - `round`: Selection machine, hints, stats, round controller
//! - `score`: Key/value persistence, score store, saved grid size
//! - `menu`: Button triggers and navigation requests

pub mod core;
pub mod cards;
pub mod schedule;
pub mod round;
pub mod score;
pub mod menu;

// Re-export commonly used types
pub use crate::core::{
    CardHandle, PairId, FaceAsset, FlipId, RoundId,
    GameRng,
    GridSize, MatchConfig,
    MatchError, Result, VisualPart,
    EventQueue, GameEvent, Sound,
};

pub use crate::cards::{
    Card, CardState, CardVisuals, CardFactory, CardPool, Deck, Placement, Selected, VisualId,
    generate,
};

pub use crate::schedule::{Scheduler, TimerId};

pub use crate::round::{RoundController, RoundStats, Selection, HintState};

pub use crate::score::{JsonFileStore, KeyValueStore, MemoryStore, ScoreStore};

pub use crate::menu::{MenuButton, NavRequest, PlayButton, press_menu_button};
