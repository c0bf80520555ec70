use super::board::Board;
use super::types::{Coord, Player};

/// Three rows, three columns, two diagonals.
pub const WIN_LINES: [[Coord; 3]; 8] = [
    [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
    [Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)],
    [Coord::new(2, 0), Coord::new(2, 1), Coord::new(2, 2)],
    [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)],
    [Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)],
    [Coord::new(0, 2), Coord::new(1, 2), Coord::new(2, 2)],
    [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)],
    [Coord::new(2, 0), Coord::new(1, 1), Coord::new(0, 2)],
];

pub fn is_won(board: &Board, player: Player) -> bool {
    let cell = player.cell();
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&coord| board.get(coord) == Some(cell)))
}

/// Human is checked first; boards where both sides have a line are not reachable in play.
pub fn winner(board: &Board) -> Option<Player> {
    if is_won(board, Player::Human) {
        Some(Player::Human)
    } else if is_won(board, Player::Ai) {
        Some(Player::Ai)
    } else {
        None
    }
}

/// -1 when the human has three in a row, +1 when the AI does, 0 otherwise.
pub fn evaluate(board: &Board) -> i8 {
    match winner(board) {
        Some(Player::Human) => -1,
        Some(Player::Ai) => 1,
        None => 0,
    }
}
