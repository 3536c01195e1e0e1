//! Identifiers for cards, pairs, flips and rounds.
//!
//! ## Handles vs pair ids
//!
//! A `CardHandle` names a physical card instance owned by the
//! [`CardPool`](crate::cards::CardPool). Handles survive across rounds: the
//! same instance is handed out again after it is released.
//!
//! A `PairId` is the logical identity assigned for one round. Exactly two
//! active cards share each `PairId`.
//!
//! ```
//! use matchit::core::{CardHandle, FaceAsset, PairId};
//!
//! let card = CardHandle::new(3);
//! assert_eq!(card.index(), 3);
//!
//! // Seven pairs sharing a set of three faces.
//! assert_eq!(FaceAsset::for_pair(PairId::new(5), 3), Some(FaceAsset::new(2)));
//! assert_eq!(FaceAsset::for_pair(PairId::new(5), 0), None);
//! ```

use serde::{Deserialize, Serialize};

/// Handle to a pooled card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardHandle(pub u32);

impl CardHandle {
    /// Create a handle from a raw slot index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Slot index inside the pool.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Pair identifier shared by exactly two cards in a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairId(pub u32);

impl PairId {
    /// Create a new pair ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// Index into the host's set of card face images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceAsset(pub u32);

impl FaceAsset {
    /// Create a new face asset index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Face shown for `pair` when the host has `asset_count` faces.
    ///
    /// Wraps around so a small asset set covers any grid size. Returns
    /// `None` when there are no assets at all.
    #[must_use]
    pub const fn for_pair(pair: PairId, asset_count: u32) -> Option<Self> {
        if asset_count == 0 {
            None
        } else {
            Some(Self(pair.0 % asset_count))
        }
    }
}

/// Identifies one flip effect on one card instance.
///
/// Monotonic per instance, so a completion for a preempted flip (or one
/// from a previous lease of the same instance) never matches the current one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlipId(pub u64);

/// Generation counter for rounds. Timers remember the round they belong to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    /// The round that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_asset_wraps() {
        assert_eq!(FaceAsset::for_pair(PairId::new(0), 4), Some(FaceAsset::new(0)));
        assert_eq!(FaceAsset::for_pair(PairId::new(3), 4), Some(FaceAsset::new(3)));
        assert_eq!(FaceAsset::for_pair(PairId::new(4), 4), Some(FaceAsset::new(0)));
        assert_eq!(FaceAsset::for_pair(PairId::new(9), 4), Some(FaceAsset::new(1)));
    }

    #[test]
    fn test_face_asset_without_assets() {
        assert_eq!(FaceAsset::for_pair(PairId::new(1), 0), None);
    }

    #[test]
    fn test_round_id_next() {
        let round = RoundId::default();
        assert_eq!(round.next(), RoundId(1));
        assert_eq!(round.next().next(), RoundId(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardHandle(7)), "Card(7)");
        assert_eq!(format!("{}", PairId(2)), "Pair(2)");
        assert_eq!(format!("{}", RoundId(4)), "Round(4)");
    }

    #[test]
    fn test_serialization() {
        let handle = CardHandle(12);
        let json = serde_json::to_string(&handle).unwrap();
        let deserialized: CardHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(handle, deserialized);
    }
}
