//! Round controller.
//!
//! Owns the active cards, the selection machine, the counters, the hint
//! budget and the round's timers. The host feeds it taps, hint requests and
//! elapsed time, then drains the resulting [`GameEvent`]s.
//!
//! ## Timers
//!
//! Every wait (pair resolution, preview, hint reveal, hint cooldown) is a
//! task in a [`Scheduler`] tagged with the [`RoundId`] it was created in.
//! Ending a round cancels all of them, and a task from an older round that
//! still fires is dropped, so a recycled card is never touched by a timer
//! from its previous round.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use matchit::core::{GridSize, MatchConfig};
//! use matchit::round::RoundController;
//! use matchit::score::{MemoryStore, ScoreStore};
//!
//! let config = MatchConfig::default().without_preview();
//! let scores = ScoreStore::load(MemoryStore::new());
//! let mut round = RoundController::with_seed(config, scores, 42).unwrap();
//!
//! round.start_round(GridSize::new(2, 2).unwrap());
//! let cards = round.cards().to_vec();
//! round.tap(cards[0]);
//! round.tap(cards[1]);
//! round.advance(Duration::from_millis(500));
//!
//! let stats = round.stats();
//! assert_eq!(stats.matched_pairs + stats.mismatches as usize, 1);
//! ```

use std::time::Duration;

use tracing::{debug, info, warn};

use super::hint::HintState;
use super::selection::{Advance, Selection};
use super::stats::{RoundCounters, RoundStats};
use crate::cards::{effective_card_count, generate, Card, CardPool, Placement, Selected};
use crate::core::{
    CardHandle, EventQueue, FaceAsset, FlipId, GameEvent, GameRng, GridSize, MatchConfig, Result,
    RoundId,
};
use crate::menu::{NavRequest, PlayButton};
use crate::schedule::Scheduler;
use crate::score::{KeyValueStore, ScoreStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskKind {
    ResolvePair,
    EndPreview,
    EndHintReveal,
    EndHintCooldown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RoundTask {
    round: RoundId,
    kind: TaskKind,
}

/// Drives one round at a time over pooled cards.
#[derive(Debug)]
pub struct RoundController<S> {
    config: MatchConfig,
    rng: GameRng,
    pool: CardPool,
    scores: ScoreStore<S>,
    timers: Scheduler<RoundTask>,
    events: EventQueue,

    round: RoundId,
    grid: Option<GridSize>,
    cards: Vec<CardHandle>,
    selection: Selection,
    counters: RoundCounters,
    hints: HintState,
    preview_active: bool,
    victory: bool,
}

impl<S: KeyValueStore> RoundController<S> {
    /// Create a controller with an OS-seeded RNG and a standard pool.
    pub fn new(config: MatchConfig, scores: ScoreStore<S>) -> Result<Self> {
        Self::with_parts(config, scores, CardPool::new(), GameRng::from_entropy())
    }

    /// Create a controller with a fixed shuffle seed.
    pub fn with_seed(config: MatchConfig, scores: ScoreStore<S>, seed: u64) -> Result<Self> {
        Self::with_parts(config, scores, CardPool::new(), GameRng::new(seed))
    }

    /// Create a controller from explicit collaborators.
    ///
    /// The pool is preloaded with `config.pool_preload` instances.
    pub fn with_parts(
        config: MatchConfig,
        scores: ScoreStore<S>,
        mut pool: CardPool,
        rng: GameRng,
    ) -> Result<Self> {
        config.validate()?;
        pool.preload(config.pool_preload);
        let hints = HintState::new(config.max_hints);

        Ok(Self {
            config,
            rng,
            pool,
            scores,
            timers: Scheduler::new(),
            events: EventQueue::new(),
            round: RoundId::default(),
            grid: None,
            cards: Vec::new(),
            selection: Selection::Idle,
            counters: RoundCounters::default(),
            hints,
            preview_active: false,
            victory: false,
        })
    }

    // === Round lifecycle ===

    /// Deal a fresh round on `grid`.
    ///
    /// An odd cell count drops the last cell. Any round in progress is
    /// ended first.
    pub fn start_round(&mut self, grid: GridSize) {
        if !self.cards.is_empty() || self.timers.pending() > 0 {
            self.end_round();
        }

        self.round = self.round.next();
        self.grid = Some(grid);

        let deck = generate(grid.cells(), &mut self.rng);
        let total_cards = effective_card_count(grid.cells());
        self.counters = RoundCounters::new(total_cards);
        self.hints = HintState::new(self.config.max_hints);
        self.selection = Selection::Idle;

        self.events.push(GameEvent::GridLaidOut {
            rows: grid.rows(),
            columns: grid.cols(),
            cards: total_cards,
        });

        for (slot, pair) in deck.into_iter().enumerate() {
            let handle = self.pool.acquire();
            let face = FaceAsset::for_pair(pair, self.config.face_asset_count);

            if let Some(card) = self.pool.get_mut(handle) {
                card.set_flip_duration(self.config.flip_duration_ms);
                card.set_placement(Placement::Grid { slot });
                if let Err(e) = card.initialize(pair, face) {
                    warn!(error = %e, "card cannot be drawn");
                }
            }

            self.events.push(GameEvent::CardPlaced {
                card: handle,
                slot,
                face,
            });
            self.cards.push(handle);
        }

        info!(
            round = %self.round,
            %grid,
            pairs = self.counters.total_pairs(),
            seed = self.rng.seed(),
            "round started"
        );

        self.push_stats();
        self.push_hints();
        self.events.push(GameEvent::ScoreChanged {
            score: self.scores.current(),
        });

        if self.config.preview_enabled {
            self.begin_preview();
        }
    }

    /// Return every card to the pool, reset all counters and clear the
    /// victory display, then deal a new round on `grid`.
    pub fn restart_round(&mut self, grid: GridSize) {
        self.end_round();
        self.start_round(grid);
    }

    /// Abandon the current round.
    ///
    /// Cancels outstanding timers and releases every active card.
    pub fn end_round(&mut self) {
        if let Selection::Resolving { timer, .. } = self.selection {
            if self.timers.cancel(timer) {
                debug!(round = %self.round, "pending pair dropped");
            }
        }
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            debug!(round = %self.round, cancelled, "timers cancelled");
        }

        for handle in self.cards.drain(..) {
            self.pool.release(handle);
        }

        self.selection = Selection::Idle;
        self.counters = RoundCounters::default();
        self.hints = HintState::new(self.config.max_hints);
        self.preview_active = false;

        if self.victory {
            self.victory = false;
            self.events.push(GameEvent::VictoryCleared);
        }
    }

    // === Input ===

    /// Player tapped `card`. Returns whether the tap selected it.
    pub fn tap(&mut self, card: CardHandle) -> bool {
        if !self.cards.contains(&card) {
            debug!(%card, "tap on card outside the round");
            return false;
        }
        if self.preview_active && self.config.block_input_during_preview {
            debug!(%card, "tap during preview ignored");
            return false;
        }
        if self.selection.is_resolving() {
            debug!(%card, "tap while resolving ignored");
            return false;
        }

        let selected = match self.pool.get_mut(card) {
            Some(c) => c.on_tap(&mut self.events),
            None => None,
        };

        match selected {
            Some(message) => {
                self.handle_selected(message);
                true
            }
            None => false,
        }
    }

    /// Consume a card's selection message.
    ///
    /// Only a face-up, unmatched card of the current round can enter the
    /// selection; anything else is ignored.
    pub fn handle_selected(&mut self, message: Selected) {
        let Selected(card) = message;

        let eligible = self.cards.contains(&card)
            && self
                .pool
                .get(card)
                .is_some_and(|c| c.is_flipped() && !c.is_matched());
        if !eligible {
            debug!(%card, "selection of ineligible card ignored");
            return;
        }

        match self.selection.select(card) {
            Advance::First => debug!(%card, "first card selected"),
            Advance::Pair { first, second } => {
                let timer = self.timers.schedule(
                    self.config.resolve_delay(),
                    RoundTask {
                        round: self.round,
                        kind: TaskKind::ResolvePair,
                    },
                );
                self.selection = Selection::resolving(first, second, timer);
                debug!(%first, %second, "pair selected, resolving");
            }
            Advance::Ignored => debug!(%card, "selection ignored"),
        }
    }

    /// Reveal every unmatched card for a moment.
    ///
    /// Returns `false` when the budget is spent, a hint is still running or
    /// cooling down, or there is no round to hint at.
    pub fn reveal_hint(&mut self) -> bool {
        if self.cards.is_empty() || self.victory {
            return false;
        }
        if self.preview_active && self.config.block_input_during_preview {
            debug!("hint during preview ignored");
            return false;
        }
        if !self.hints.try_begin() {
            debug!(
                used = self.hints.used(),
                available = self.hints.available(),
                "hint unavailable"
            );
            return false;
        }

        info!(used = self.hints.used(), "hint revealed");
        for &handle in &self.cards {
            if let Some(card) = self.pool.get_mut(handle) {
                if !card.is_matched() && !card.is_flipped() {
                    card.request_flip(true, &mut self.events);
                }
            }
        }

        self.push_hints();
        self.push_stats();
        self.schedule(self.config.hint_reveal(), TaskKind::EndHintReveal);
        true
    }

    /// Handle an in-play button.
    pub fn press(&mut self, button: PlayButton) -> Option<NavRequest> {
        match button {
            PlayButton::Restart => {
                let grid = self.grid.unwrap_or_default();
                self.restart_round(grid);
                None
            }
            PlayButton::Hint => {
                self.reveal_hint();
                None
            }
            PlayButton::MainMenu => {
                self.end_round();
                Some(NavRequest::OpenMainMenu)
            }
            PlayButton::Quit => Some(NavRequest::Quit),
        }
    }

    /// The presentation layer finished a flip effect.
    pub fn complete_flip(&mut self, card: CardHandle, flip: FlipId) -> bool {
        self.pool
            .get_mut(card)
            .map(|c| c.complete_flip(flip))
            .unwrap_or(false)
    }

    // === Clock ===

    /// Advance the round clock, running every task that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(task) = self.timers.pop_due(until) {
            self.run_task(task);
        }
        self.timers.settle(until);
    }

    fn schedule(&mut self, delay: Duration, kind: TaskKind) {
        self.timers.schedule(
            delay,
            RoundTask {
                round: self.round,
                kind,
            },
        );
    }

    fn run_task(&mut self, task: RoundTask) {
        if task.round != self.round {
            debug!(stale = %task.round, current = %self.round, "stale timer dropped");
            return;
        }

        match task.kind {
            TaskKind::ResolvePair => self.resolve_pair(),
            TaskKind::EndPreview => self.end_preview(),
            TaskKind::EndHintReveal => {
                self.flip_back_unselected();
                self.schedule(self.config.hint_cooldown(), TaskKind::EndHintCooldown);
            }
            TaskKind::EndHintCooldown => {
                self.hints.finish_cooldown();
                self.push_hints();
            }
        }
    }

    // === Resolution ===

    fn resolve_pair(&mut self) {
        let Selection::Resolving { first, second, .. } = self.selection else {
            debug!("resolution fired without a pending pair");
            return;
        };

        let pairs = (
            self.pool.get(first).map(Card::pair_id),
            self.pool.get(second).map(Card::pair_id),
        );
        let is_match = matches!(pairs, (Some(a), Some(b)) if a == b);
        debug!(%first, %second, is_match, "resolving pair");

        for handle in [first, second] {
            if let Some(card) = self.pool.get_mut(handle) {
                card.play_match_sound(is_match, &mut self.events);
                if is_match {
                    card.set_matched(true, &mut self.events);
                } else {
                    card.request_flip(false, &mut self.events);
                }
            }
        }

        if is_match {
            self.counters.record_match();
            self.award_match();
            self.push_stats();
            self.check_victory();
        } else {
            self.counters.record_mismatch();
            self.push_stats();
        }

        self.selection = Selection::Idle;
    }

    fn award_match(&mut self) {
        if let Err(e) = self.scores.add_score(self.config.match_award) {
            warn!(error = %e, "failed to save score");
        }
        self.events.push(GameEvent::ScoreChanged {
            score: self.scores.current(),
        });
    }

    fn check_victory(&mut self) {
        debug!(
            matched = self.counters.matched_pairs,
            total = self.counters.total_pairs(),
            "victory check"
        );

        if !self.victory && self.counters.is_cleared() {
            self.victory = true;
            info!(
                round = %self.round,
                highest_streak = self.counters.highest_streak,
                "all pairs matched"
            );
            let stats = self.stats();
            self.events.push(GameEvent::Victory(stats));
            self.events.push(GameEvent::Celebrate);
        }
    }

    // === Preview and hints ===

    fn begin_preview(&mut self) {
        self.preview_active = true;
        for &handle in &self.cards {
            if let Some(card) = self.pool.get_mut(handle) {
                card.request_flip(true, &mut self.events);
            }
        }
        self.events.push(GameEvent::PreviewStarted);
        self.schedule(self.config.preview_duration(), TaskKind::EndPreview);
    }

    fn end_preview(&mut self) {
        self.preview_active = false;
        self.flip_back_unselected();
        self.events.push(GameEvent::PreviewEnded);
    }

    /// Turn face down every unmatched face-up card that is not waiting on
    /// the selection machine.
    fn flip_back_unselected(&mut self) {
        let pending = self.selection.pending_cards();
        for &handle in &self.cards {
            if pending.contains(&handle) {
                continue;
            }
            if let Some(card) = self.pool.get_mut(handle) {
                if card.is_flipped() && !card.is_matched() {
                    card.request_flip(false, &mut self.events);
                }
            }
        }
    }

    fn push_stats(&mut self) {
        let stats = self.stats();
        self.events.push(GameEvent::StatsChanged(stats));
    }

    fn push_hints(&mut self) {
        self.events.push(GameEvent::HintsChanged {
            remaining: self.hints.remaining(),
            available: self.hints.available(),
        });
    }

    // === Queries ===

    #[must_use]
    pub fn stats(&self) -> RoundStats {
        let c = &self.counters;
        RoundStats {
            total_cards: c.total_cards,
            total_pairs: c.total_pairs(),
            matched_pairs: c.matched_pairs,
            remaining_cards: c.total_cards - c.matched_pairs * 2,
            combo_streak: c.combo_streak,
            highest_streak: c.highest_streak,
            mismatches: c.mismatches,
            hints_used: self.hints.used(),
            hints_remaining: self.hints.remaining(),
            score: self.scores.current(),
        }
    }

    /// Take every pending presentation event.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    #[must_use]
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Cards in the current round, in grid order.
    #[must_use]
    pub fn cards(&self) -> &[CardHandle] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, handle: CardHandle) -> Option<&Card> {
        if self.cards.contains(&handle) {
            self.pool.get(handle)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.victory
    }

    #[must_use]
    pub fn is_preview_active(&self) -> bool {
        self.preview_active
    }

    #[must_use]
    pub fn grid(&self) -> Option<GridSize> {
        self.grid
    }

    #[must_use]
    pub fn round_id(&self) -> RoundId {
        self.round
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn pool(&self) -> &CardPool {
        &self.pool
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreStore<S> {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreStore<S> {
        &mut self.scores
    }

    /// Abandon any round and hand back the score store.
    pub fn into_scores(mut self) -> ScoreStore<S> {
        self.end_round();
        self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardState;
    use crate::score::MemoryStore;

    fn controller(config: MatchConfig) -> RoundController<MemoryStore> {
        RoundController::with_seed(config, ScoreStore::load(MemoryStore::new()), 7).unwrap()
    }

    fn grid(rows: u32, cols: u32) -> GridSize {
        GridSize::new(rows, cols).unwrap()
    }

    /// Two cards with different pair ids.
    fn mismatched(round: &RoundController<MemoryStore>) -> (CardHandle, CardHandle) {
        let cards = round.cards();
        let first = cards[0];
        let pair = round.card(first).unwrap().pair_id();
        let second = cards
            .iter()
            .copied()
            .find(|&h| round.card(h).unwrap().pair_id() != pair)
            .unwrap();
        (first, second)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MatchConfig::default().with_face_assets(0);
        assert!(RoundController::with_seed(config, ScoreStore::load(MemoryStore::new()), 1).is_err());
    }

    #[test]
    fn test_start_round_deals_cards() {
        let mut round = controller(MatchConfig::default().without_preview());
        round.start_round(grid(3, 4));

        assert_eq!(round.cards().len(), 12);
        assert_eq!(round.stats().total_pairs, 6);
        assert_eq!(round.pool().active(), 12);
        assert!(round
            .cards()
            .iter()
            .all(|&h| round.card(h).unwrap().state() == CardState::FaceDown));

        let events = round.drain_events();
        assert!(events.contains(&GameEvent::GridLaidOut {
            rows: 3,
            columns: 4,
            cards: 12
        }));
    }

    #[test]
    fn test_face_wraps_over_assets() {
        let mut round = controller(MatchConfig::default().without_preview().with_face_assets(2));
        round.start_round(grid(2, 3));

        for &h in round.cards() {
            let card = round.card(h).unwrap();
            assert_eq!(card.face(), Some(FaceAsset::new(card.pair_id().raw() % 2)));
        }
    }

    #[test]
    fn test_tap_during_resolution_is_ignored() {
        let mut round = controller(MatchConfig::default().without_preview());
        round.start_round(grid(3, 4));
        let (a, b) = mismatched(&round);

        assert!(round.tap(a));
        assert!(round.tap(b));
        assert!(round.selection().is_resolving());

        let third = round
            .cards()
            .iter()
            .copied()
            .find(|&h| h != a && h != b)
            .unwrap();
        assert!(!round.tap(third));
        assert_eq!(round.card(third).unwrap().state(), CardState::FaceDown);
    }

    #[test]
    fn test_resolution_waits_for_delay() {
        let mut round = controller(MatchConfig::default().without_preview());
        round.start_round(grid(3, 4));
        let (a, b) = mismatched(&round);
        round.tap(a);
        round.tap(b);

        round.advance(Duration::from_millis(499));
        assert!(round.selection().is_resolving());

        round.advance(Duration::from_millis(1));
        assert!(round.selection().is_idle());
        assert_eq!(round.card(a).unwrap().state(), CardState::FaceDown);
        assert_eq!(round.card(b).unwrap().state(), CardState::FaceDown);
        assert_eq!(round.stats().mismatches, 1);
    }

    #[test]
    fn test_preview_blocks_input() {
        let mut round = controller(MatchConfig::default());
        round.start_round(grid(2, 2));
        assert!(round.is_preview_active());

        let card = round.cards()[0];
        assert_eq!(round.card(card).unwrap().state(), CardState::FaceUp);
        assert!(!round.tap(card));
        assert!(!round.reveal_hint());

        round.advance(round.config().preview_duration());
        assert!(!round.is_preview_active());
        assert_eq!(round.card(card).unwrap().state(), CardState::FaceDown);
        assert!(round.tap(card));
    }

    #[test]
    fn test_selection_rejects_ineligible_cards() {
        let config = MatchConfig::default().without_preview();
        let mut round = controller(config.with_pool_preload(12));
        round.start_round(grid(1, 2));
        let cards = round.cards().to_vec();
        round.tap(cards[0]);
        round.tap(cards[1]);
        round.advance(Duration::from_millis(500));
        assert!(round.is_complete());

        // Matched cards cannot be selected again
        round.handle_selected(Selected(cards[0]));
        round.handle_selected(Selected(cards[1]));
        assert!(round.selection().is_idle());
        round.advance(Duration::from_millis(500));
        assert_eq!(round.stats().matched_pairs, 1);
        assert_eq!(round.stats().remaining_cards, 0);

        // Pooled instance outside the round
        let outside = CardHandle(11);
        assert!(round.pool().get(outside).is_some());
        round.handle_selected(Selected(outside));
        assert!(round.selection().is_idle());
    }

    #[test]
    fn test_selection_rejects_face_down_card() {
        let mut round = controller(MatchConfig::default().without_preview());
        round.start_round(grid(3, 4));
        let card = round.cards()[0];

        round.handle_selected(Selected(card));
        assert!(round.selection().is_idle());
        assert!(round.tap(card));
        assert_eq!(round.selection(), Selection::OnePending { first: card });
    }

    #[test]
    fn test_end_round_cancels_resolution_timer() {
        let mut round = controller(MatchConfig::default().without_preview());
        round.start_round(grid(3, 4));
        let (a, b) = mismatched(&round);
        round.tap(a);
        round.tap(b);

        let Selection::Resolving { timer, .. } = round.selection() else {
            panic!("expected a pair to be resolving");
        };
        assert!(round.timers.is_pending(timer));

        round.end_round();
        assert!(!round.timers.is_pending(timer));
        assert_eq!(round.timers.pending(), 0);
    }

    #[test]
    fn test_main_menu_button_ends_round() {
        let mut round = controller(MatchConfig::default().without_preview());
        round.start_round(grid(2, 2));

        assert_eq!(round.press(PlayButton::MainMenu), Some(NavRequest::OpenMainMenu));
        assert!(round.cards().is_empty());
        assert_eq!(round.pool().active(), 0);
        assert_eq!(round.press(PlayButton::Quit), Some(NavRequest::Quit));
    }
}
