//! Round counters and the read-only stats snapshot shown to the player.

use serde::{Deserialize, Serialize};

/// Mutable per-round counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RoundCounters {
    pub total_cards: usize,
    pub matched_pairs: usize,
    pub combo_streak: u32,
    pub highest_streak: u32,
    pub mismatches: u32,
}

impl RoundCounters {
    pub fn new(total_cards: usize) -> Self {
        Self {
            total_cards,
            ..Self::default()
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.total_cards / 2
    }

    pub fn record_match(&mut self) {
        self.matched_pairs += 1;
        self.combo_streak += 1;
        self.highest_streak = self.highest_streak.max(self.combo_streak);
    }

    pub fn record_mismatch(&mut self) {
        self.combo_streak = 0;
        self.mismatches += 1;
    }

    pub fn is_cleared(&self) -> bool {
        self.matched_pairs >= self.total_pairs()
    }
}

/// Snapshot of round progress for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub total_cards: usize,
    pub total_pairs: usize,
    pub matched_pairs: usize,
    pub remaining_cards: usize,
    pub combo_streak: u32,
    pub highest_streak: u32,
    pub mismatches: u32,
    pub hints_used: u32,
    pub hints_remaining: u32,
    pub score: u32,
}

impl std::fmt::Display for RoundStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Matches: {}\nRemaining: {}\nStreak: {}",
            self.matched_pairs, self.remaining_cards, self.combo_streak
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaks() {
        let mut c = RoundCounters::new(8);
        c.record_match();
        c.record_match();
        assert_eq!(c.combo_streak, 2);
        assert_eq!(c.highest_streak, 2);

        c.record_mismatch();
        assert_eq!(c.combo_streak, 0);
        assert_eq!(c.highest_streak, 2);

        c.record_match();
        assert_eq!(c.combo_streak, 1);
        assert_eq!(c.highest_streak, 2);
        assert_eq!(c.mismatches, 1);
    }

    #[test]
    fn test_cleared() {
        let mut c = RoundCounters::new(4);
        assert_eq!(c.total_pairs(), 2);
        c.record_match();
        assert!(!c.is_cleared());
        c.record_match();
        assert!(c.is_cleared());
    }

    #[test]
    fn test_display() {
        let stats = RoundStats {
            matched_pairs: 2,
            remaining_cards: 8,
            combo_streak: 1,
            ..RoundStats::default()
        };
        assert_eq!(stats.to_string(), "Matches: 2\nRemaining: 8\nStreak: 1");
    }
}
