//! Persisted preference keys and the grid size setting.

use tracing::warn;

use super::store::KeyValueStore;
use crate::core::{GridSize, Result};

pub const ROWS_KEY: &str = "rows";
pub const COLS_KEY: &str = "cols";
pub const SCORE_KEY: &str = "player_score";

/// Grid chosen for the next round, or 3x4 when unset or invalid.
pub fn load_grid_size(store: &impl KeyValueStore) -> GridSize {
    let rows = store.get_int(ROWS_KEY);
    let cols = store.get_int(COLS_KEY);

    let (Some(rows), Some(cols)) = (rows, cols) else {
        return GridSize::DEFAULT;
    };

    let grid = u32::try_from(rows)
        .ok()
        .zip(u32::try_from(cols).ok())
        .and_then(|(r, c)| GridSize::new(r, c).ok());

    grid.unwrap_or_else(|| {
        warn!(rows, cols, "stored grid size invalid, using default");
        GridSize::DEFAULT
    })
}

/// Persist the grid for the next round.
pub fn set_grid_size(store: &mut impl KeyValueStore, grid: GridSize) -> Result<()> {
    store.set_int(ROWS_KEY, i64::from(grid.rows()));
    store.set_int(COLS_KEY, i64::from(grid.cols()));
    store.flush()
}
