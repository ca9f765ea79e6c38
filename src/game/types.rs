use serde::{Serialize, Deserialize};

use crate::config::game::BOARD_CELLS;

/// Mark placed by a player. The first dequeued player always plays `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

/// A cell is either empty (`None`, serialized as `null`) or carries a mark.
pub type Cell = Option<Symbol>;

/// The 3x3 board, row-major. Cells are indexed 0..9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Cell; BOARD_CELLS]);

impl Board {
    pub fn empty() -> Self {
        Board([None; BOARD_CELLS])
    }

    #[cfg(test)]
    pub fn from_cells(cells: [Cell; BOARD_CELLS]) -> Self {
        Board(cells)
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.0.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.0
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.0.iter().filter(|c| **c == Some(symbol)).count()
    }

    /// Returns a copy with one cell overwritten.
    pub(crate) fn with_cell(&self, index: usize, cell: Cell) -> Self {
        let mut cells = self.0;
        cells[index] = cell;
        Board(cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// Lifecycle stage of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Active,
    Won,
    Draw,
}

/// Result of a finished game, seen from one player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
    Draw,
}
