//! Engine-vs-engine games and self-play episode generation.
//!
//! Competitive games give each side its own search tree and advance both
//! trees as moves land on the real board, so the mover keeps its explored
//! subtree. Self-play drives both sides from a single tree with the
//! stochastic policy plus Dirichlet root noise, and collects the unnoised
//! move distributions as training targets.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::evaluator::RolloutEvaluator;
use crate::game::{GameState, Player, TicTacToe};
use crate::mcts::selection::{blend_dirichlet_noise, sample_index};
use crate::mcts::{SearchConfig, SearchTree, SelectionPolicy};
use crate::recording::{EpisodeRecord, MoveRecord};

/// Play one full game with a deterministic engine on each side.
///
/// Returns the finished game. Boards are logged per ply rather than printed
/// so the binary decides what to show.
pub fn play_game(config: &SearchConfig) -> crate::Result<TicTacToe> {
    let mut game = TicTacToe::new();
    let mut nought_tree = tree_for(config, 0);
    let mut cross_tree = tree_for(config, 1);

    while !game.is_terminal() {
        let mover = game.current_player();
        let tree = match mover {
            Player::Nought => &mut nought_tree,
            Player::Cross => &mut cross_tree,
        };
        tree.run_search(&game)?;

        let decision = match tree.recommend_move(&game, SelectionPolicy::Deterministic) {
            Some(decision) => decision,
            None => break,
        };

        game.apply_action(decision.action)?;
        nought_tree.advance_root(decision.action);
        cross_tree.advance_root(decision.action);

        info!("{} played cell {}\n{}", mover, decision.action, game);
    }

    Ok(game)
}

/// Play one self-play episode and collect its training records.
///
/// Every move stores the board before the move, the mover and the unnoised
/// move distribution; the episode is finalized with the game outcome.
pub fn play_episode(config: &SearchConfig, episode_id: &str) -> crate::Result<EpisodeRecord> {
    let mut game = TicTacToe::new();
    let mut tree = tree_for(config, 0);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(0x5e1f)),
        None => StdRng::from_os_rng(),
    };
    let mut record = EpisodeRecord::new(episode_id);
    let mut turn = 0;

    while !game.is_terminal() {
        tree.run_search(&game)?;

        let (actions, over_children) = match tree.move_probabilities(config.temperature) {
            Some(probabilities) => probabilities,
            None => break,
        };

        // Training target: the raw visit distribution over the action space.
        let mut target = vec![0.0; game.action_space()];
        for (&action, &p) in actions.iter().zip(&over_children) {
            target[game.action_index(action)] = p;
        }

        // Exploration: sample from the noised distribution instead.
        let mut noised = over_children.clone();
        blend_dirichlet_noise(
            &mut noised,
            config.dirichlet_alpha,
            config.dirichlet_fraction,
            &mut rng,
        );
        let action = actions[sample_index(&noised, &mut rng)];

        record.push_move(MoveRecord {
            turn,
            mover: game.current_player(),
            cells_before: game.encode_cells(),
            action,
            probabilities: target,
        });

        game.apply_action(action)?;
        tree.advance_root(action);
        turn += 1;
    }

    record.finalize(game.winner());
    Ok(record)
}

fn tree_for(config: &SearchConfig, offset: u64) -> SearchTree<TicTacToe, RolloutEvaluator> {
    let mut config = config.clone();
    let evaluator = match config.seed {
        Some(seed) => {
            config.seed = Some(seed.wrapping_add(offset));
            RolloutEvaluator::seeded(seed.wrapping_add(offset).wrapping_mul(2654435761))
        }
        None => RolloutEvaluator::new(),
    };
    SearchTree::new(evaluator, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config(seed: u64) -> SearchConfig {
        let mut config = SearchConfig::default();
        config.max_iterations = 60;
        config.max_runtime_secs = 30.0;
        config.seed = Some(seed);
        config
    }

    #[test]
    fn test_play_game_reaches_a_terminal_position() {
        let game = play_game(&quick_config(1)).unwrap();
        assert!(game.is_terminal());
        assert!(!game.history().is_empty());
    }

    #[test]
    fn test_episode_records_every_move() {
        let record = play_episode(&quick_config(2), "episode-2").unwrap();

        assert_eq!(record.episode_id, "episode-2");
        assert!(!record.moves.is_empty());
        assert_eq!(record.moves.len(), record.moves.last().unwrap().turn + 1);

        for move_record in &record.moves {
            assert_eq!(move_record.cells_before.len(), 9);
            assert_eq!(move_record.probabilities.len(), 9);
            let total: f64 = move_record.probabilities.iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_episode_outcome_matches_the_final_winner() {
        let record = play_episode(&quick_config(3), "episode-3").unwrap();
        assert!([-1, 0, 1].contains(&record.outcome));
    }

    #[test]
    fn test_moves_alternate_players() {
        let record = play_episode(&quick_config(4), "episode-4").unwrap();
        for pair in record.moves.windows(2) {
            assert_eq!(pair[1].mover, pair[0].mover.opponent());
        }
        assert_eq!(record.moves[0].mover, Player::Nought);
    }
}
