//! Core engine types: identifiers, RNG, configuration, errors, events.
//!
//! Everything here is independent of round rules. The card, pool and round
//! modules build on these types.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;
pub mod event;

pub use entity::{CardHandle, FaceAsset, FlipId, PairId, RoundId};
pub use rng::GameRng;
pub use config::{GridSize, MatchConfig};
pub use error::{MatchError, Result, VisualPart};
pub use event::{EventQueue, GameEvent, Sound};
