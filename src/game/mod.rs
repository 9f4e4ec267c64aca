//! Game-state contract consumed by the search engine, plus the reference game.
//!
//! The engine never looks inside a game. It only needs legal actions, cloning,
//! mutation of a privately owned copy, and terminal/winner queries.

pub mod tic_tac_toe;

pub use tic_tac_toe::TicTacToe;

use serde::{Deserialize, Serialize};

/// One of the two players in a zero-sum game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Nought,
    Cross,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Nought => Player::Cross,
            Player::Cross => Player::Nought,
        }
    }

    /// Numeric coin value, `O = 1` and `X = -1`.
    pub fn value(self) -> i8 {
        match self {
            Player::Nought => 1,
            Player::Cross => -1,
        }
    }

    pub fn display(self) -> char {
        match self {
            Player::Nought => 'O',
            Player::Cross => 'X',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Raised when a move is applied that the current position does not allow.
///
/// This never fires inside the search loop, which only applies actions drawn
/// from `legal_actions`. It exists for the human/competitive play path.
#[derive(Debug, Clone, thiserror::Error)]
#[error("illegal move: {0}")]
pub struct InvalidMoveError(pub String);

/// Contract between a game and the search engine.
///
/// `apply_action` mutates `self`, so callers that need to preserve a position
/// clone it first. The engine always works on a private clone of the root
/// state and never mutates shared state.
pub trait GameState: Clone {
    /// Identifier for a move. Must map into a fixed-size action space so that
    /// move-probability vectors can be indexed consistently.
    type Action: Copy + Eq + std::fmt::Debug;

    /// Legal actions for the current player, in a stable order.
    /// Empty exactly when the game is over.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Apply `action` for the current player and hand the turn over.
    fn apply_action(&mut self, action: Self::Action) -> Result<(), InvalidMoveError>;

    fn is_terminal(&self) -> bool;

    /// Winning player, `None` while the game is running or on a draw.
    fn winner(&self) -> Option<Player>;

    fn current_player(&self) -> Player;

    /// Size of the full action space (e.g. number of board cells).
    fn action_space(&self) -> usize;

    /// Index of `action` within `0..action_space()`.
    fn action_index(&self, action: Self::Action) -> usize;
}
