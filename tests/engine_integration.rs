//! Integration tests for the mcts_zero public API.

use std::collections::HashSet;

use mcts_zero::{
    evaluator::RolloutEvaluator,
    game::{GameState, Player, TicTacToe},
    mcts::{SearchConfig, SearchTree, SelectionPolicy},
    selfplay, MctsZeroError, Result, DESCRIPTION, NAME, VERSION,
};

fn config(iterations: u32, seed: u64) -> SearchConfig {
    let mut config = SearchConfig::default();
    config.max_iterations = iterations;
    config.max_runtime_secs = 60.0;
    config.seed = Some(seed);
    config
}

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "mcts_zero");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_error_types() {
    let config_error = MctsZeroError::Config("test config error".to_string());
    assert!(matches!(config_error, MctsZeroError::Config(_)));

    let mut game = TicTacToe::new();
    game.apply_action(0).unwrap();
    let game_error: MctsZeroError = game.apply_action(0).unwrap_err().into();
    assert!(matches!(game_error, MctsZeroError::Game(_)));
}

#[test]
fn test_result_type_alias() {
    let success: Result<i32> = Ok(42);
    assert!(success.is_ok());

    let failure: Result<i32> = Err(MctsZeroError::Config("test".to_string()));
    assert!(failure.is_err());
}

#[test]
fn test_engine_takes_the_winning_move() {
    // O on 0 and 1, X on 3 and 4. O to move; cell 2 wins on the spot.
    let mut game = TicTacToe::new();
    for a in [0, 3, 1, 4] {
        game.apply_action(a).unwrap();
    }
    assert_eq!(game.current_player(), Player::Nought);

    let mut tree = SearchTree::new(RolloutEvaluator::seeded(101), config(1200, 101));
    let stats = tree.run_search(&game).unwrap();
    assert!(stats.playouts >= 1000);

    let decision = tree
        .recommend_move(&game, SelectionPolicy::Deterministic)
        .unwrap();
    assert_eq!(decision.action, 2);
}

#[test]
fn test_winning_move_found_across_seeds() {
    // Same position with the win at a different cell, several seeds deep.
    let mut game = TicTacToe::new();
    for a in [8, 0, 5, 1] {
        game.apply_action(a).unwrap();
    }
    // O holds 8 and 5; cell 2 completes the right column.
    for seed in [7, 77, 777] {
        let mut tree = SearchTree::new(RolloutEvaluator::seeded(seed), config(1200, seed));
        tree.run_search(&game).unwrap();
        let decision = tree
            .recommend_move(&game, SelectionPolicy::Deterministic)
            .unwrap();
        assert_eq!(decision.action, 2, "seed {} picked the wrong cell", seed);
    }
}

#[test]
fn test_empty_board_search_shows_no_degenerate_bias() {
    // Independently seeded searches on the empty board should spread their
    // stochastic picks over the symmetric opening cells instead of
    // collapsing onto one move.
    let corner: HashSet<usize> = [0, 2, 6, 8].into();
    let edge: HashSet<usize> = [1, 3, 5, 7].into();

    let mut picked: HashSet<usize> = HashSet::new();
    let mut corner_hits = 0;
    let mut edge_hits = 0;

    for seed in 0..40 {
        let game = TicTacToe::new();
        let mut tree = SearchTree::new(RolloutEvaluator::seeded(seed), config(200, seed));
        tree.run_search(&game).unwrap();

        let decision = tree
            .recommend_move(&game, SelectionPolicy::Stochastic { temperature: 1.0 })
            .unwrap();

        // Every opening cell keeps positive probability in every search.
        assert_eq!(decision.probabilities.len(), 9);
        let total: f64 = decision.probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        for (cell, &p) in decision.probabilities.iter().enumerate() {
            assert!(p > 0.0, "opening cell {} lost all probability", cell);
        }

        picked.insert(decision.action);
        if corner.contains(&decision.action) {
            corner_hits += 1;
        } else if edge.contains(&decision.action) {
            edge_hits += 1;
        }
    }

    assert!(
        picked.len() >= 4,
        "40 searches only ever picked cells {:?}",
        picked
    );
    assert!(corner_hits > 0, "corners never sampled");
    assert!(edge_hits > 0, "edges never sampled");
}

#[test]
fn test_search_does_not_disturb_the_real_game() {
    let mut game = TicTacToe::new();
    game.apply_action(4).unwrap();
    game.apply_action(0).unwrap();
    let history_before = game.history().to_vec();

    let mut tree = SearchTree::new(RolloutEvaluator::seeded(55), config(400, 55));
    tree.run_search(&game).unwrap();
    tree.recommend_move(&game, SelectionPolicy::Deterministic)
        .unwrap();

    assert_eq!(game.history(), history_before.as_slice());
}

#[test]
fn test_finished_game_reports_no_move_available() {
    let mut game = TicTacToe::new();
    for a in [0, 3, 1, 4, 2] {
        game.apply_action(a).unwrap();
    }

    let mut tree = SearchTree::new(RolloutEvaluator::seeded(9), config(50, 9));
    tree.run_search(&game).unwrap();
    assert!(tree
        .recommend_move(&game, SelectionPolicy::Deterministic)
        .is_none());
}

#[test]
fn test_tree_reuse_over_a_real_game() {
    let mut game = TicTacToe::new();
    let mut tree = SearchTree::new(RolloutEvaluator::seeded(31), config(300, 31));

    // Engine move with reuse.
    tree.run_search(&game).unwrap();
    let first = tree
        .recommend_move(&game, SelectionPolicy::Deterministic)
        .unwrap();
    game.apply_action(first.action).unwrap();
    tree.advance_root(first.action);
    let carried = tree.root_visits();
    assert!(carried > 0);

    // Opponent plays something the tree has explored.
    let reply = game.legal_actions()[0];
    game.apply_action(reply).unwrap();
    tree.advance_root(reply);

    // The reused subtree keeps working as a search root.
    tree.run_search(&game).unwrap();
    let second = tree
        .recommend_move(&game, SelectionPolicy::Deterministic)
        .unwrap();
    assert!(game.legal_actions().contains(&second.action));
}

#[test]
fn test_full_engine_game_terminates() {
    let game = selfplay::play_game(&config(150, 77)).unwrap();
    assert!(game.is_terminal());
    // Two rollout-guided engines should never lose in one straight line;
    // any finished board is fine, an unfinished one is not.
    assert!(game.history().len() >= 5);
}
