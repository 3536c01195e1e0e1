//! Round configuration.
//!
//! - `GridSize`: validated board dimensions
//! - `MatchConfig`: timings, budgets and awards for a round
//!
//! Every timing the round controller waits on is a named field here rather
//! than a constant, so hosts can tune pacing without touching round logic.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{MatchError, Result};

/// Board dimensions.
///
/// Both dimensions are at least 1 and the board holds at least two cells.
/// An odd cell count is allowed here; the round drops the last cell so
/// every card has a partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    rows: u32,
    cols: u32,
}

impl GridSize {
    /// Grid used when nothing has been chosen yet.
    pub const DEFAULT: GridSize = GridSize { rows: 3, cols: 4 };

    /// Sizes offered by the custom grid picker.
    pub const PRESETS: [GridSize; 6] = [
        GridSize { rows: 2, cols: 2 },
        GridSize { rows: 2, cols: 3 },
        GridSize { rows: 3, cols: 3 },
        GridSize { rows: 4, cols: 4 },
        GridSize { rows: 5, cols: 5 },
        GridSize { rows: 5, cols: 6 },
    ];

    /// Create a validated grid size.
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        let cells = u64::from(rows) * u64::from(cols);
        if rows == 0 || cols == 0 || cells < 2 || cells > u64::from(u32::MAX) {
            return Err(MatchError::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    #[must_use]
    pub const fn rows(self) -> u32 {
        self.rows
    }

    #[must_use]
    pub const fn cols(self) -> u32 {
        self.cols
    }

    /// Raw cell count, possibly odd.
    #[must_use]
    pub const fn cells(self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Tunable round settings.
///
/// ```
/// use std::time::Duration;
/// use matchit::core::MatchConfig;
///
/// let config = MatchConfig::default()
///     .with_resolve_delay(Duration::from_millis(800))
///     .with_max_hints(5)
///     .without_preview();
///
/// assert_eq!(config.resolve_delay(), Duration::from_millis(800));
/// assert!(!config.preview_enabled);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Delay between the second pick and the pair comparison.
    pub resolve_delay_ms: u64,

    /// Show every face briefly when a round starts.
    pub preview_enabled: bool,

    /// How long the start-of-round preview lasts.
    pub preview_duration_ms: u64,

    /// Reject taps and hints while the preview is showing.
    pub block_input_during_preview: bool,

    /// How long a hint keeps unmatched faces visible.
    pub hint_reveal_ms: u64,

    /// Pause after a hint before the next one is allowed.
    pub hint_cooldown_ms: u64,

    /// Hints allowed per round.
    pub max_hints: u32,

    /// Score added for every matched pair.
    pub match_award: u32,

    /// Number of distinct face images the host provides.
    pub face_asset_count: u32,

    /// Flip effect length passed through to the presentation layer.
    pub flip_duration_ms: u64,

    /// Card instances the pool builds before the first round.
    pub pool_preload: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            resolve_delay_ms: 500,
            preview_enabled: true,
            preview_duration_ms: 800,
            block_input_during_preview: true,
            hint_reveal_ms: 800,
            hint_cooldown_ms: 1000,
            max_hints: 3,
            match_award: 10,
            face_asset_count: 8,
            flip_duration_ms: 250,
            pool_preload: 12,
        }
    }
}

impl MatchConfig {
    /// Check the settings a round cannot run without.
    pub fn validate(&self) -> Result<()> {
        if self.face_asset_count == 0 {
            return Err(MatchError::InvalidConfig(
                "face_asset_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    #[must_use]
    pub fn preview_duration(&self) -> Duration {
        Duration::from_millis(self.preview_duration_ms)
    }

    #[must_use]
    pub fn hint_reveal(&self) -> Duration {
        Duration::from_millis(self.hint_reveal_ms)
    }

    #[must_use]
    pub fn hint_cooldown(&self) -> Duration {
        Duration::from_millis(self.hint_cooldown_ms)
    }

    #[must_use]
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_preview(mut self, duration: Duration) -> Self {
        self.preview_enabled = true;
        self.preview_duration_ms = duration.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn without_preview(mut self) -> Self {
        self.preview_enabled = false;
        self
    }

    /// Let taps through while the preview is showing.
    #[must_use]
    pub fn with_input_during_preview(mut self) -> Self {
        self.block_input_during_preview = false;
        self
    }

    #[must_use]
    pub fn with_hint_timing(mut self, reveal: Duration, cooldown: Duration) -> Self {
        self.hint_reveal_ms = reveal.as_millis() as u64;
        self.hint_cooldown_ms = cooldown.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_max_hints(mut self, max: u32) -> Self {
        self.max_hints = max;
        self
    }

    #[must_use]
    pub fn with_match_award(mut self, award: u32) -> Self {
        self.match_award = award;
        self
    }

    #[must_use]
    pub fn with_face_assets(mut self, count: u32) -> Self {
        self.face_asset_count = count;
        self
    }

    #[must_use]
    pub fn with_pool_preload(mut self, count: usize) -> Self {
        self.pool_preload = count;
        self
    }
}
