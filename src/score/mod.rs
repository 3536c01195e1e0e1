//! Persistence: key/value stores, the player score and saved settings.

pub mod settings;
pub mod store;
pub mod tracker;

pub use settings::{load_grid_size, set_grid_size, COLS_KEY, ROWS_KEY, SCORE_KEY};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use tracker::ScoreStore;
