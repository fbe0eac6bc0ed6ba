//! Integration tests for the Thirty simulator
//!
//! Tests the full stack: deck loading, dealing, the turn policy, batch play
//! and result persistence

use std::collections::VecDeque;
use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use thirty_batch::{csv_log, run_batch, BatchConfig, Summary};
use thirty_core::{
    Card, CardPool, Decision, GameEngine, MalformedTokenPolicy, Outcome, Player, Rules,
    SecureRandom, DRAW_TAG,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Sample deck shipped with the repository
fn sample_deck_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/deck.csv")
}

fn seeded_pool(seed: u64) -> CardPool<ChaCha8Rng> {
    CardPool::load(
        &sample_deck_path(),
        MalformedTokenPolicy::CoerceToZero,
        ChaCha8Rng::seed_from_u64(seed),
    )
    .expect("sample deck should load")
}

fn queue(values: &[i32]) -> VecDeque<Card> {
    values.iter().map(|&v| Card(v)).collect()
}

// ============================================================================
// DECK TESTS
// ============================================================================

#[test]
fn test_sample_deck_loads() {
    let pool = CardPool::initialize(&sample_deck_path(), MalformedTokenPolicy::default()).unwrap();
    assert_eq!(pool.len(), 40);

    let stats = pool.stats();
    assert_eq!(stats.awards, 30);
    assert_eq!(stats.penalties, 10);
    assert_eq!(stats.zeros, 0);
}

#[test]
fn test_deal_hands_partitions_whole_deck() {
    let pool = seeded_pool(1);
    let mut deck = pool.deck().to_vec();
    deck.sort();

    for players in [2, 4, 5] {
        let hands = pool.deal_hands(players);
        assert_eq!(hands.len(), players);
        assert!(hands.iter().all(|h| h.len() == 40 / players));

        let mut dealt: Vec<Card> = hands.into_iter().flatten().collect();
        dealt.sort();
        assert_eq!(dealt, deck);
    }
}

// ============================================================================
// GAME TESTS
// ============================================================================

#[test]
fn test_crafted_two_player_game_ends_in_one_turn() {
    let hands = vec![queue(&[30, -1, 2]), queue(&[5, 6, -7])];
    let game = GameEngine::from_hands(hands, Rules::with_players(2), 0, ChaCha8Rng::seed_from_u64(3));

    let record = game.simulate();
    assert_eq!(record.turns, 1);
    assert_eq!(record.outcome, Outcome::Winner('A'));
    assert!(!record.is_draw());
}

#[test]
fn test_priority_win_with_four_players() {
    let mut player = Player::new('A', queue(&[5, -2, -9, 1]), 5);
    player.award(25);
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    let decision = player.turn(0, &[25, 10, 10, 10], &Rules::default(), &mut rng);
    assert_eq!(decision, Decision::Award { points: 5 });
}

#[test]
fn test_every_game_has_exactly_one_outcome() {
    let pool = seeded_pool(5);

    for players in 2..=6 {
        for seed in 0..50 {
            let game = GameEngine::new(&pool, Rules::with_players(players), ChaCha8Rng::seed_from_u64(seed));
            let record = game.simulate();
            assert!(record.turns >= 1);
            assert_ne!(record.is_draw(), record.winner().is_some());
            assert_eq!(record.is_draw(), record.winner_tag() == DRAW_TAG);
        }
    }
}

#[test]
fn test_cards_conserved_through_game() {
    let pool = seeded_pool(6);
    let mut game = GameEngine::new(&pool, Rules::default(), SecureRandom::new());
    let initial: Vec<usize> = game.players().iter().map(|p| p.hand().total_cards()).collect();
    assert_eq!(initial.iter().sum::<usize>(), 40);

    while game.step().is_none() {
        let now: Vec<usize> = game.players().iter().map(|p| p.hand().total_cards()).collect();
        assert_eq!(now, initial);
    }
}

// ============================================================================
// BATCH TESTS
// ============================================================================

#[test]
fn test_batch_histogram_covers_all_games() {
    let pool = seeded_pool(7);
    let config = BatchConfig::new(2_000).with_seed(7).with_progress_interval(500);
    let result = run_batch(&pool, &config);

    assert_eq!(result.records.len(), 2_000);
    let counted: u64 = result.summary.standings().iter().map(|s| s.count).sum();
    assert_eq!(counted, 2_000);

    // Seats are symmetric in expectation; each should win a fair share
    for tag in ['A', 'B', 'C', 'D'] {
        assert!(result.summary.wins(tag) > 200, "player {} won too rarely", tag);
    }
}

#[test]
fn test_batch_summary_order_independent() {
    let pool = seeded_pool(8);
    let result = run_batch(&pool, &BatchConfig::new(500).sequential());

    let mut records = result.records.clone();
    records.shuffle(&mut ChaCha8Rng::seed_from_u64(8));

    assert_eq!(Summary::from_records(&records), result.summary);
    assert_eq!(Summary::from_records(&result.records), result.summary);
}

#[test]
fn test_batch_results_append_to_csv() {
    let pool = seeded_pool(9);
    let result = run_batch(&pool, &BatchConfig::new(25).with_seed(9));

    let path = std::env::temp_dir().join(format!("thirty-integration-{}.csv", std::process::id()));
    std::fs::remove_file(&path).ok();
    csv_log::append(&path, &result.records).unwrap();
    csv_log::append(&path, &result.records).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 52);
    assert_eq!(lines[0], csv_log::CSV_HEADER);
    assert_eq!(lines[26], csv_log::CSV_HEADER);

    for line in lines.iter().filter(|l| **l != csv_log::CSV_HEADER) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 3);
        assert!(fields[0].parse::<u32>().is_ok());
        match fields[1] {
            "true" => assert_eq!(fields[2], "*"),
            "false" => assert!(('A'..='D').any(|t| fields[2] == t.to_string())),
            other => panic!("bad isDraw field {}", other),
        }
    }
}
