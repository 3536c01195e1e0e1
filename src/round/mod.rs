//! Round management: the selection machine, counters, hints and the
//! controller tying them to pooled cards and timers.

pub mod controller;
pub mod hint;
pub mod selection;
pub mod stats;

pub use controller::RoundController;
pub use hint::HintState;
pub use selection::{Advance, Selection};
pub use stats::RoundStats;
