use crate::GameError;
use super::types::{Cell, Coord, Player};

pub const BOARD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.cells.get(coord.row)?.get(coord.col).copied()
    }

    /// Marks an empty cell for `player`.
    pub fn place(&mut self, coord: Coord, player: Player) -> Result<(), GameError> {
        match self.get(coord) {
            None => Err(GameError::OutOfBounds {
                row: coord.row,
                col: coord.col,
            }),
            Some(Cell::Empty) => {
                self.cells[coord.row][coord.col] = player.cell();
                Ok(())
            }
            Some(_) => Err(GameError::InvalidMove {
                row: coord.row,
                col: coord.col,
            }),
        }
    }

    /// Unchecked write used by the search to apply and undo candidate moves.
    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row][coord.col] = cell;
    }

    /// Empty cells in row-major order. Search tie-breaking depends on this order.
    pub fn possible_moves(&self) -> Vec<Coord> {
        let mut moves = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Cell::Empty {
                    moves.push(Coord::new(row, col));
                }
            }
        }
        moves
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Cell = Cell::Empty;
    const H: Cell = Cell::Human;
    const A: Cell = Cell::Ai;

    #[test]
    fn test_empty_board_has_nine_moves_in_row_major_order() {
        let moves = Board::new().possible_moves();

        assert_eq!(moves.len(), 9);
        assert_eq!(moves[0], Coord::new(0, 0));
        assert_eq!(moves[1], Coord::new(0, 1));
        assert_eq!(moves[3], Coord::new(1, 0));
        assert_eq!(moves[8], Coord::new(2, 2));
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board = Board::from_rows([[H, A, H], [H, A, A], [A, H, H]]);

        assert!(board.possible_moves().is_empty());
        assert!(board.is_full());
            }

    #[test]
    fn test_possible_moves_skip_occupied_cells() {
        let board = Board::from_rows([[H, E, E], [E, A, E], [E, E, H]]);

        assert_eq!(
            board.possible_moves(),
            vec![
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(1, 0),
                Coord::new(1, 2),
                Coord::new(2, 0),
                Coord::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_place_rejects_occupied_and_off_board_cells() {
        let mut board = Board::new();
        board.place(Coord::new(1, 1), Player::Human).unwrap();

        assert_eq!(board.get(Coord::new(1, 1)), Some(Cell::Human));
        assert_eq!(
            board.place(Coord::new(1, 1), Player::Ai),
            Err(GameError::InvalidMove { row: 1, col: 1 })
        );
        assert_eq!(
            board.place(Coord::new(0, 3), Player::Ai),
            Err(GameError::OutOfBounds { row: 0, col: 3 })
        );
        assert_eq!(board.possible_moves().len(), 8);
    }
}
