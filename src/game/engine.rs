//! Pure tic-tac-toe rules: move validation, move application and board evaluation.
//!
//! Nothing in here touches session or connection state.

use crate::config::game::BOARD_CELLS;
use crate::errors::ValidationError;
use crate::game::types::{Board, Phase, Symbol};

/// The 8 winning triples, checked in this order: rows, columns, diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8],
    [0, 3, 6], [1, 4, 7], [2, 5, 8],
    [0, 4, 8], [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvaluation {
    Won { symbol: Symbol, line: [usize; 3] },
    Draw,
    InProgress,
}

/// Check whether `requester` may play at `position`.
///
/// Checks run in a fixed order (game over, turn, bounds, occupancy) so each rejection
/// reports the first rule that fails. Returns the board index on success.
pub fn validate_move(
    board: &Board,
    position: i64,
    phase: Phase,
    turn_holder: Option<&str>,
    requester: &str,
) -> Result<usize, ValidationError> {
    if phase != Phase::Active {
        return Err(ValidationError::GameOver);
    }
    if turn_holder != Some(requester) {
        return Err(ValidationError::NotYourTurn);
    }
    let index = usize::try_from(position)
        .ok()
        .filter(|i| *i < BOARD_CELLS)
        .ok_or(ValidationError::InvalidPosition)?;
    match board.get(index) {
        Some(None) => Ok(index),
        _ => Err(ValidationError::CellOccupied),
    }
}

/// Returns a new board with `symbol` placed at `index`. The input board is left untouched.
pub fn apply_move(board: &Board, index: usize, symbol: Symbol) -> Board {
    board.with_cell(index, Some(symbol))
}

/// First complete line wins; a full board without one is a draw.
pub fn evaluate_board(board: &Board) -> BoardEvaluation {
    let cells = board.cells();
    for line in WINNING_LINES {
        let [a, b, c] = line;
        if let Some(symbol) = cells[a] {
            if cells[b] == Some(symbol) && cells[c] == Some(symbol) {
                return BoardEvaluation::Won { symbol, line };
            }
        }
    }
    if board.is_full() {
        BoardEvaluation::Draw
    } else {
        BoardEvaluation::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Cell;

    const X: Cell = Some(Symbol::X);
    const O: Cell = Some(Symbol::O);
    const E: Cell = None;

    #[test]
    fn test_accepts_move_on_empty_cell() {
        let board = Board::empty();
        assert_eq!(validate_move(&board, 4, Phase::Active, Some("alice"), "alice"), Ok(4));
    }

    #[test]
    fn test_each_rejection_is_independent() {
        let board = Board::from_cells([X, E, E, E, E, E, E, E, E]);
        let ok = |pos, phase, holder| validate_move(&board, pos, phase, holder, "alice");

        assert_eq!(ok(1, Phase::Active, Some("alice")), Ok(1));
        assert_eq!(ok(1, Phase::Won, None), Err(ValidationError::GameOver));
        assert_eq!(ok(1, Phase::Draw, None), Err(ValidationError::GameOver));
        assert_eq!(ok(1, Phase::Active, Some("bob")), Err(ValidationError::NotYourTurn));
        assert_eq!(ok(9, Phase::Active, Some("alice")), Err(ValidationError::InvalidPosition));
        assert_eq!(ok(-1, Phase::Active, Some("alice")), Err(ValidationError::InvalidPosition));
        assert_eq!(ok(0, Phase::Active, Some("alice")), Err(ValidationError::CellOccupied));
    }

    #[test]
    fn test_apply_move_changes_exactly_one_cell() {
        let board = Board::from_cells([X, E, E, E, O, E, E, E, E]);
        let next = apply_move(&board, 8, Symbol::X);

        let changed: Vec<usize> = (0..BOARD_CELLS)
            .filter(|i| board.get(*i) != next.get(*i))
            .collect();
        assert_eq!(changed, vec![8]);
        assert_eq!(next.get(8), Some(X));
        // Original board is not mutated.
        assert_eq!(board.get(8), Some(None));
    }

    #[test]
    fn test_top_row_win() {
        let board = Board::from_cells([X, X, E, E, O, E, E, E, E]);
        let next = apply_move(&board, 2, Symbol::X);
        assert_eq!(
            evaluate_board(&next),
            BoardEvaluation::Won { symbol: Symbol::X, line: [0, 1, 2] }
        );
    }

    #[test]
    fn test_diagonal_win_for_o() {
        let board = Board::from_cells([X, X, O, E, O, X, O, E, E]);
        assert_eq!(
            evaluate_board(&board),
            BoardEvaluation::Won { symbol: Symbol::O, line: [2, 4, 6] }
        );
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        assert_eq!(evaluate_board(&board), BoardEvaluation::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_win_not_draw() {
        let board = Board::from_cells([X, X, X, O, O, X, X, O, O]);
        assert!(matches!(evaluate_board(&board), BoardEvaluation::Won { symbol: Symbol::X, .. }));
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate_board(&Board::empty()), BoardEvaluation::InProgress);
    }

    #[test]
    fn test_evaluation_is_consistent_for_every_board() {
        // All 3^9 fillings, reachable or not.
        for code in 0..3usize.pow(BOARD_CELLS as u32) {
            let mut cells = [None; BOARD_CELLS];
            let mut rest = code;
            for cell in cells.iter_mut() {
                *cell = match rest % 3 {
                    0 => None,
                    1 => Some(Symbol::X),
                    _ => Some(Symbol::O),
                };
                rest /= 3;
            }
            let board = Board::from_cells(cells);
            match evaluate_board(&board) {
                BoardEvaluation::Won { symbol, line } => {
                    assert!(line.iter().all(|i| cells[*i] == Some(symbol)));
                }
                BoardEvaluation::Draw => {
                    assert!(board.is_full());
                    assert!(WINNING_LINES.iter().all(|[a, b, c]| {
                        !(cells[*a] == cells[*b] && cells[*b] == cells[*c])
                    }));
                }
                BoardEvaluation::InProgress => assert!(!board.is_full()),
            }
        }
    }
}
