//! # mcts_zero
//!
//! An AlphaZero-style Monte Carlo Tree Search engine for two-player,
//! perfect-information, zero-sum board games.
//!
//! ## Features
//!
//! - **Search Engine**: PUCT tree search with iteration and wall-clock budgets
//! - **Pluggable Evaluators**: pure random rollouts or an external policy/value function
//! - **Move Selection**: stochastic (temperature-scaled) and deterministic policies
//! - **Tree Reuse**: root advancement across real moves
//! - **Self-Play Tooling**: episode generation and CSV recording for training data
//!
//! ## Usage
//!
//! ```rust
//! use mcts_zero::{
//!     evaluator::RolloutEvaluator,
//!     game::TicTacToe,
//!     mcts::{SearchConfig, SearchTree, SelectionPolicy},
//! };
//!
//! let game = TicTacToe::new();
//! let mut tree = SearchTree::new(RolloutEvaluator::seeded(7), SearchConfig::default());
//! tree.run_search(&game).unwrap();
//! let decision = tree.recommend_move(&game, SelectionPolicy::Deterministic);
//! assert!(decision.is_some());
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// State evaluation: the evaluator contract and its concrete variants
pub mod evaluator;

/// Game-state contract and the tic-tac-toe reference game
pub mod game;

/// Logger initialization
pub mod logging;

/// Monte Carlo Tree Search engine
pub mod mcts;

/// Self-play episode persistence for training data
pub mod recording;

/// Engine-vs-engine play and self-play episode generation
pub mod selfplay;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use evaluator::{Evaluation, Evaluator, EvaluatorError, FnEvaluator, RolloutEvaluator};
pub use game::{GameState, InvalidMoveError, Player, TicTacToe};
pub use mcts::{MoveDecision, SearchConfig, SearchError, SearchStats, SearchTree, SelectionPolicy};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the mcts_zero library
#[derive(Debug, thiserror::Error)]
pub enum MctsZeroError {
    #[error("game error: {0}")]
    Game(#[from] game::InvalidMoveError),

    #[error("search error: {0}")]
    Search(#[from] mcts::SearchError),

    #[error("evaluator error: {0}")]
    Evaluator(#[from] evaluator::EvaluatorError),

    #[error("config error: {0}")]
    Config(String),

    #[error("recording error: {0}")]
    Recording(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MctsZeroError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
