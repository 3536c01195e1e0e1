//! Outbound events for the presentation layer.
//!
//! The engine never calls into rendering, audio or UI code. It pushes
//! `GameEvent`s into an `EventQueue`, and the host drains the queue after
//! each input or clock step and plays the corresponding effects.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::entity::{CardHandle, FaceAsset, FlipId};
use crate::round::RoundStats;

/// Sound cues a card can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    Flip,
    Match,
    Mismatch,
}

/// Something the presentation layer should show or play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Arrange `cards` cards in a grid with a fixed column count.
    GridLaidOut { rows: u32, columns: u32, cards: usize },

    /// A card was placed in the grid with the given face.
    CardPlaced {
        card: CardHandle,
        slot: usize,
        face: Option<FaceAsset>,
    },

    /// Start a flip effect. A later flip on the same card supersedes it.
    FlipStarted {
        card: CardHandle,
        face_up: bool,
        flip: FlipId,
        duration_ms: u64,
    },

    /// Stop an in-flight flip effect that was preempted.
    FlipCancelled { card: CardHandle, flip: FlipId },

    /// Remove a matched card from view.
    CardHidden { card: CardHandle },

    SoundRequested { card: CardHandle, sound: Sound },

    /// Counters changed; refresh the stats label.
    StatsChanged(RoundStats),

    ScoreChanged { score: u32 },

    HintsChanged { remaining: u32, available: bool },

    PreviewStarted,

    PreviewEnded,

    /// Every pair in the round is matched. Fired once per round.
    Victory(RoundStats),

    /// Play the celebration effect.
    Celebrate,

    /// Hide the victory display for a fresh round.
    VictoryCleared,
}

/// FIFO of pending presentation events.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    /// Take every pending event in the order it was pushed.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());

        queue.push(GameEvent::PreviewStarted);
        queue.push(GameEvent::CardHidden { card: CardHandle(1) });
        queue.push(GameEvent::PreviewEnded);
        assert_eq!(queue.len(), 3);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                GameEvent::PreviewStarted,
                GameEvent::CardHidden { card: CardHandle(1) },
                GameEvent::PreviewEnded,
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_serde() {
        let event = GameEvent::SoundRequested {
            card: CardHandle(3),
            sound: Sound::Mismatch,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
