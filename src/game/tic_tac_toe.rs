//! 3x3 tic-tac-toe, the reference game for the engine.
//!
//! Noughts (`O`) always move first. Cells are indexed row-major, 0 through 8.

use crate::game::{GameState, InvalidMoveError, Player};

const BOARD_CELLS: usize = 9;

/// Row, column and diagonal triplets checked for a win.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    cells: [Option<Player>; BOARD_CELLS],
    current: Player,
    moves: Vec<usize>,
}

impl TicTacToe {
    pub fn new() -> Self {
        TicTacToe {
            cells: [None; BOARD_CELLS],
            current: Player::Nought,
            moves: Vec::new(),
        }
    }

    /// Cell contents, `None` for an empty cell.
    pub fn cell(&self, index: usize) -> Option<Player> {
        self.cells.get(index).copied().flatten()
    }

    /// Every move played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.moves
    }

    /// Flat board encoding using the players' coin values, 0 for empty.
    pub fn encode_cells(&self) -> Vec<i8> {
        self.cells
            .iter()
            .map(|c| c.map_or(0, Player::value))
            .collect()
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Action = usize;

    fn legal_actions(&self) -> Vec<usize> {
        if self.winner().is_some() {
            return Vec::new();
        }
        (0..BOARD_CELLS).filter(|&i| self.cells[i].is_none()).collect()
    }

    fn apply_action(&mut self, action: usize) -> Result<(), InvalidMoveError> {
        if self.is_terminal() {
            return Err(InvalidMoveError("the game is already over".to_string()));
        }
        if action >= BOARD_CELLS {
            return Err(InvalidMoveError(format!(
                "cell {} is outside the 3x3 board",
                action
            )));
        }
        if self.cells[action].is_some() {
            return Err(InvalidMoveError(format!("cell {} is occupied", action)));
        }

        self.cells[action] = Some(self.current);
        self.moves.push(action);
        self.current = self.current.opponent();
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    fn winner(&self) -> Option<Player> {
        for line in &LINES {
            if let Some(player) = self.cells[line[0]] {
                if self.cells[line[1]] == Some(player) && self.cells[line[2]] == Some(player) {
                    return Some(player);
                }
            }
        }
        None
    }

    fn current_player(&self) -> Player {
        self.current
    }

    fn action_space(&self) -> usize {
        BOARD_CELLS
    }

    fn action_index(&self, action: usize) -> usize {
        action
    }
}

impl std::fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|col| match self.cells[row * 3 + col] {
                    Some(p) => p.display().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}
