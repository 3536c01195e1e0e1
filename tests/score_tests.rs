//! Score persistence and menu flow tests.

use std::time::Duration;

use matchit::core::{GridSize, MatchConfig};
use matchit::menu::{press_menu_button, MenuButton, NavRequest};
use matchit::round::RoundController;
use matchit::score::{load_grid_size, JsonFileStore, KeyValueStore, MemoryStore, ScoreStore};

/// Added points survive a reload from the same store.
#[test]
fn test_score_reload_memory() {
    let mut scores = ScoreStore::load(MemoryStore::new());
    assert_eq!(scores.add_score(10).unwrap(), 10);

    let store = scores.into_store().unwrap();
    assert_eq!(store.get_int("player_score"), Some(10));

    let scores = ScoreStore::load(store);
    assert_eq!(scores.current(), 10);
}

/// Points written to a JSON file are read back after reopening.
#[test]
fn test_score_reload_json_file() {
    let path = std::env::temp_dir().join(format!("matchit-score-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let mut scores = ScoreStore::load(JsonFileStore::open(&path).unwrap());
        scores.add_score(10).unwrap();
        scores.add_score(10).unwrap();
    }

    let scores = ScoreStore::load(JsonFileStore::open(&path).unwrap());
    assert_eq!(scores.current(), 20);

    std::fs::remove_file(&path).unwrap();
}

/// Score accumulates across rounds through the controller.
#[test]
fn test_score_carries_across_rounds() {
    let config = MatchConfig::default().without_preview();
    let mut round = RoundController::with_seed(config, ScoreStore::load(MemoryStore::new()), 8).unwrap();
    let grid = GridSize::new(1, 2).unwrap();

    for _ in 0..3 {
        round.start_round(grid);
        let cards = round.cards().to_vec();
        round.tap(cards[0]);
        round.tap(cards[1]);
        round.advance(Duration::from_millis(500));
        assert!(round.is_complete());
    }

    let scores = round.into_scores();
    assert_eq!(scores.current(), 30);
}

/// A preset picked in the menu is the grid the next round reads.
#[test]
fn test_menu_choice_reaches_round() {
    let mut store = MemoryStore::new();
    let preset = GridSize::new(5, 6).unwrap();

    let nav = press_menu_button(&mut store, MenuButton::Preset(preset)).unwrap();
    assert_eq!(nav.last(), Some(&NavRequest::OpenPlay));

    let grid = load_grid_size(&store);
    let config = MatchConfig::default().without_preview();
    let mut round = RoundController::with_seed(config, ScoreStore::load(store), 2).unwrap();
    round.start_round(grid);
    assert_eq!(round.cards().len(), 30);
}
