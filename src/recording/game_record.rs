//! Recorded self-play episodes.
//!
//! One episode holds a row per move: the board before the move, the mover,
//! the action taken and the move distribution the search produced. The final
//! outcome is stamped on the episode once the game ends, which is what turns
//! the rows into supervised training examples.

use serde::{Deserialize, Serialize};

use crate::game::Player;

/// Record of a single move in an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number, starting at 0.
    pub turn: usize,
    /// Player who made the move.
    pub mover: Player,
    /// Board cells before the move, coin-valued (`O = 1`, `X = -1`, empty 0).
    pub cells_before: Vec<i8>,
    /// Cell the mover played.
    pub action: usize,
    /// Unnoised move distribution over the full action space.
    pub probabilities: Vec<f64>,
}

/// Complete record of one self-play episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode_id: String,
    /// Episode start, seconds since the Unix epoch.
    pub timestamp: i64,
    pub moves: Vec<MoveRecord>,
    /// Final outcome as the winner's coin value, 0 for a draw.
    pub outcome: i8,
}

impl EpisodeRecord {
    pub fn new(episode_id: &str) -> Self {
        EpisodeRecord {
            episode_id: episode_id.to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            moves: Vec::new(),
            outcome: 0,
        }
    }

    pub fn push_move(&mut self, move_record: MoveRecord) {
        self.moves.push(move_record);
    }

    /// Stamp the episode with the game result.
    pub fn finalize(&mut self, winner: Option<Player>) {
        self.outcome = winner.map_or(0, Player::value);
    }

    /// Outcome from the given player's perspective: 1 win, -1 loss, 0 draw.
    pub fn outcome_for(&self, player: Player) -> i8 {
        if self.outcome == 0 {
            0
        } else if self.outcome == player.value() {
            1
        } else {
            -1
        }
    }
}
