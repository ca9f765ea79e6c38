/// Game configuration constants.
/// 
/// This module defines the board dimensions. Only the classic 3x3 board is supported.
pub const BOARD_SIDE: usize = 3;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = BOARD_SIDE * BOARD_SIDE;
