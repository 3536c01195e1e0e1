//! Card state object.
//!
//! A `Card` owns the per-card identity and flip/match flags for one round
//! and reports player selection upward as a [`Selected`] message. It never
//! decides whether two cards match; that belongs to the round controller.
//!
//! ## State
//!
//! | flipped | matched | state      |
//! |---------|---------|------------|
//! | false   | false   | `FaceDown` |
//! | true    | false   | `FaceUp`   |
//! | any     | true    | `Matched`  |
//!
//! Only `initialize`, `request_flip`, `on_tap`, `set_matched` and `reset`
//! change these flags.
//!
//! ## Flip effects
//!
//! Each `request_flip` starts a new flip effect with a fresh [`FlipId`] and
//! cancels the one in flight, so at most one effect per card is active and
//! the card always ends in the state of the latest request.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    CardHandle, EventQueue, FaceAsset, FlipId, GameEvent, MatchError, PairId, Result, Sound,
    VisualPart,
};

/// Flip effect length used until the controller configures one.
pub const DEFAULT_FLIP_MS: u64 = 250;

/// Observable card state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    FaceDown,
    FaceUp,
    Matched,
}

/// Opaque reference to a presentation resource (image, sprite node).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualId(pub u32);

/// Visual sub-parts built by the presentation layer for one instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVisuals {
    pub front: Option<VisualId>,
    pub back: Option<VisualId>,
}

impl CardVisuals {
    /// Visuals with both parts present.
    #[must_use]
    pub const fn complete(front: VisualId, back: VisualId) -> Self {
        Self {
            front: Some(front),
            back: Some(back),
        }
    }

    /// First missing part, if any.
    #[must_use]
    pub fn missing_part(&self) -> Option<VisualPart> {
        if self.front.is_none() {
            Some(VisualPart::Front)
        } else if self.back.is_none() {
            Some(VisualPart::Back)
        } else {
            None
        }
    }
}

/// Where an instance currently sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Inactive, parked under the pool.
    #[default]
    Pooled,
    /// Active but not yet laid out.
    Detached,
    /// Laid out at a grid slot (row-major index).
    Grid { slot: usize },
}

/// Message a card emits when the player selects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selected(pub CardHandle);

/// One memory card.
#[derive(Clone, Debug)]
pub struct Card {
    handle: CardHandle,
    pair_id: PairId,
    face: Option<FaceAsset>,
    flipped: bool,
    matched: bool,
    visuals: CardVisuals,
    placement: Placement,
    lease: u32,
    next_flip: u64,
    active_flip: Option<FlipId>,
    flip_duration_ms: u64,
}

impl Card {
    /// Create a face-down card around the given visuals.
    #[must_use]
    pub fn new(handle: CardHandle, visuals: CardVisuals) -> Self {
        Self {
            handle,
            pair_id: PairId::default(),
            face: None,
            flipped: false,
            matched: false,
            visuals,
            placement: Placement::Pooled,
            lease: 0,
            next_flip: 0,
            active_flip: None,
            flip_duration_ms: DEFAULT_FLIP_MS,
        }
    }

    /// Assign a pair and face for a new round and turn the card face down.
    ///
    /// The card's flags are reset even when a visual part is missing; the
    /// error only reports that the card cannot be drawn.
    pub fn initialize(&mut self, pair_id: PairId, face: Option<FaceAsset>) -> Result<()> {
        self.pair_id = pair_id;
        self.face = face;
        self.flipped = false;
        self.matched = false;
        debug!(card = %self.handle, pair = %pair_id, "card initialized");

        match self.visuals.missing_part() {
            Some(part) => Err(MatchError::MissingVisual {
                card: self.handle,
                part,
            }),
            None => Ok(()),
        }
    }

    /// Flip to the requested side and start the flip effect.
    ///
    /// Any effect already running on this card is cancelled first. Matched
    /// cards stay put; returns `None` for them and when no effect could be
    /// shown.
    pub fn request_flip(&mut self, face_up: bool, events: &mut EventQueue) -> Option<FlipId> {
        if self.matched {
            debug!(card = %self.handle, "flip ignored on matched card");
            return None;
        }

        debug!(card = %self.handle, face_up, "flip");
        self.flipped = face_up;

        if let Some(previous) = self.active_flip.take() {
            events.push(GameEvent::FlipCancelled {
                card: self.handle,
                flip: previous,
            });
        }

        if !self.can_show() {
            return None;
        }

        self.next_flip += 1;
        let flip = FlipId(self.next_flip);
        self.active_flip = Some(flip);
        events.push(GameEvent::FlipStarted {
            card: self.handle,
            face_up,
            flip,
            duration_ms: self.flip_duration_ms,
        });
        Some(flip)
    }

    /// Handle a player tap.
    ///
    /// Ignored while the card is face up or matched. Otherwise the card
    /// flips face up, requests the flip sound and emits [`Selected`].
    pub fn on_tap(&mut self, events: &mut EventQueue) -> Option<Selected> {
        if self.flipped || self.matched {
            debug!(
                card = %self.handle,
                flipped = self.flipped,
                matched = self.matched,
                "tap blocked"
            );
            return None;
        }

        self.request_flip(true, events);
        events.push(GameEvent::SoundRequested {
            card: self.handle,
            sound: Sound::Flip,
        });
        Some(Selected(self.handle))
    }

    /// Enter (or leave) the terminal matched state.
    ///
    /// A matched card is hidden by the presentation layer.
    pub fn set_matched(&mut self, matched: bool, events: &mut EventQueue) {
        self.matched = matched;
        debug!(card = %self.handle, matched, "match status");

        if matched && self.can_show() {
            events.push(GameEvent::CardHidden { card: self.handle });
        }
    }

    /// Request the match or mismatch cue for this card.
    pub fn play_match_sound(&self, matched: bool, events: &mut EventQueue) {
        let sound = if matched { Sound::Match } else { Sound::Mismatch };
        events.push(GameEvent::SoundRequested {
            card: self.handle,
            sound,
        });
    }

    /// Report that a flip effect finished.
    ///
    /// Returns `false` for an effect that was already superseded.
    pub fn complete_flip(&mut self, flip: FlipId) -> bool {
        if self.active_flip == Some(flip) {
            self.active_flip = None;
            true
        } else {
            false
        }
    }

    /// Return to face down and unmatched, dropping any flip in flight.
    pub fn reset(&mut self) {
        self.flipped = false;
        self.matched = false;
        self.active_flip = None;
        debug!(card = %self.handle, "card reset");
    }

    pub fn set_flip_duration(&mut self, duration_ms: u64) {
        self.flip_duration_ms = duration_ms;
    }

    fn can_show(&self) -> bool {
        match self.visuals.missing_part() {
            Some(part) => {
                warn!(card = %self.handle, %part, "visual part missing, skipping visual update");
                false
            }
            None => true,
        }
    }

    pub(crate) fn begin_lease(&mut self) {
        self.lease += 1;
        self.placement = Placement::Detached;
    }

    pub(crate) fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    #[must_use]
    pub fn handle(&self) -> CardHandle {
        self.handle
    }

    #[must_use]
    pub fn pair_id(&self) -> PairId {
        self.pair_id
    }

    #[must_use]
    pub fn face(&self) -> Option<FaceAsset> {
        self.face
    }

    #[must_use]
    pub fn state(&self) -> CardState {
        if self.matched {
            CardState::Matched
        } else if self.flipped {
            CardState::FaceUp
        } else {
            CardState::FaceDown
        }
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Whether every visual part is present.
    #[must_use]
    pub fn is_functional(&self) -> bool {
        self.visuals.missing_part().is_none()
    }

    #[must_use]
    pub fn visuals(&self) -> CardVisuals {
        self.visuals
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// How many times this instance has been handed out by the pool.
    #[must_use]
    pub fn lease(&self) -> u32 {
        self.lease
    }

    #[must_use]
    pub fn active_flip(&self) -> Option<FlipId> {
        self.active_flip
    }
}
