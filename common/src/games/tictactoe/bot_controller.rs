use crate::games::SessionRng;
use super::board::Board;
use super::types::{Cell, Coord, Mode, Player, ScoredMove};
use super::win_detector::{evaluate, is_won};

/// Picks the AI reply for `mode`. `None` when the board is full.
pub fn calculate_move(mode: Mode, board: &Board, rng: &mut SessionRng) -> Option<Coord> {
    match mode {
        Mode::Easy => calculate_random_move(board, rng),
        Mode::Impossible => best_move(board, Player::Ai).map(|scored| scored.coord),
    }
}

pub fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<Coord> {
    rng.choose(&board.possible_moves())
}

/// Full-depth minimax for `player` to move.
///
/// The AI maximises towards +1, the human minimises towards -1. Ties keep the
/// first move in row-major order, so the result is deterministic for a given
/// board. Returns `None` on a full board.
pub fn best_move(board: &Board, player: Player) -> Option<ScoredMove> {
    let depth = board.possible_moves().len();
    if depth == 0 {
        return None;
    }

    let mut scratch = *board;
    let (coord, score) = minimax(&mut scratch, depth, player);
    coord.map(|coord| ScoredMove { coord, score })
}

fn minimax(board: &mut Board, depth: usize, player: Player) -> (Option<Coord>, i8) {
    if depth == 0 || is_won(board, Player::Human) || is_won(board, Player::Ai) {
        return (None, evaluate(board));
    }

    let mut best: Option<(Coord, i8)> = None;

    for coord in board.possible_moves() {
        board.set(coord, player.cell());
        let (_, score) = minimax(board, depth - 1, player.opponent());
        board.set(coord, Cell::Empty);

        let improves = match best {
            None => true,
            Some((_, best_score)) => match player {
                Player::Ai => score > best_score,
                Player::Human => score < best_score,
            },
        };

        if improves {
            best = Some((coord, score));
        }
    }

    match best {
        Some((coord, score)) => (Some(coord), score),
        None => (None, evaluate(board)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::win_detector::winner;

    const E: Cell = Cell::Empty;
    const H: Cell = Cell::Human;
    const A: Cell = Cell::Ai;

    #[test]
    fn test_best_move_on_full_board_is_none() {
        let board = Board::from_rows([[H, A, H], [H, A, A], [A, H, H]]);

        assert_eq!(best_move(&board, Player::Ai), None);
    }

    #[test]
    fn test_center_reply_to_corner_opening() {
        let board = Board::from_rows([[H, E, E], [E, E, E], [E, E, E]]);

        assert_eq!(
            best_move(&board, Player::Ai),
            Some(ScoredMove {
                coord: Coord::new(1, 1),
                score: 0
            })
        );
    }

    #[test]
    fn test_blocks_human_row() {
        let board = Board::from_rows([[H, H, E], [E, A, E], [E, E, E]]);

        let scored = best_move(&board, Player::Ai).unwrap();

        assert_eq!(
            scored,
            ScoredMove {
                coord: Coord::new(0, 2),
                score: 0
            }
        );
    }

    #[test]
    fn test_first_winning_move_in_scan_order_is_kept() {
        // (0, 2) blocks and forks, (1, 2) wins at once; both are worth +1
        let board = Board::from_rows([[H, H, E], [A, A, E], [E, E, E]]);

        assert_eq!(
            best_move(&board, Player::Ai),
            Some(ScoredMove {
                coord: Coord::new(0, 2),
                score: 1
            })
        );
    }

    #[test]
    fn test_minimax_restores_board() {
        let board = Board::from_rows([[H, E, E], [E, A, E], [E, E, H]]);
        let mut scratch = board;
        let depth = scratch.possible_moves().len();

        let _ = minimax(&mut scratch, depth, Player::Ai);

        assert_eq!(scratch, board);
    }

    #[test]
    fn test_human_side_search_finds_winning_move() {
        let board = Board::from_rows([[H, H, E], [A, A, E], [E, E, E]]);

        let scored = best_move(&board, Player::Human).unwrap();

        assert_eq!(scored.coord, Coord::new(0, 2));
        assert_eq!(scored.score, -1);
    }

    #[test]
    fn test_optimal_play_from_empty_board_is_a_draw() {
        let mut board = Board::new();
        let mut to_move = Player::Human;

        while winner(&board).is_none() {
            let Some(scored) = best_move(&board, to_move) else {
                break;
            };
            assert_eq!(scored.score, 0);
            board.place(scored.coord, to_move).unwrap();
            to_move = to_move.opponent();
        }

        assert_eq!(winner(&board), None);
        assert!(board.is_full());
    }

    fn assert_ai_never_loses(board: &mut Board) {
        for coord in board.possible_moves() {
            board.set(coord, Cell::Human);
            assert!(!is_won(board, Player::Human), "human won on {:?}", board);

            if let Some(reply) = best_move(board, Player::Ai) {
                board.set(reply.coord, Cell::Ai);
                if !is_won(board, Player::Ai) {
                    assert_ai_never_loses(board);
                }
                board.set(reply.coord, Cell::Empty);
            }

            board.set(coord, Cell::Empty);
        }
    }

    #[test]
    fn test_impossible_mode_never_loses_against_any_human_line() {
        assert_ai_never_loses(&mut Board::new());
    }

    #[test]
    fn test_easy_mode_picks_a_legal_move() {
        let board = Board::from_rows([[H, A, H], [E, A, E], [A, H, H]]);
        let mut rng = SessionRng::new(99);

        for _ in 0..20 {
            let coord = calculate_move(Mode::Easy, &board, &mut rng).unwrap();
            assert!(coord == Coord::new(1, 0) || coord == Coord::new(1, 2));
        }
    }

    #[test]
    fn test_easy_mode_is_reproducible_with_seed() {
        let board = Board::new();
        let mut a = SessionRng::new(5);
        let mut b = SessionRng::new(5);

        for _ in 0..10 {
            assert_eq!(
                calculate_move(Mode::Easy, &board, &mut a),
                calculate_move(Mode::Easy, &board, &mut b)
            );
        }
    }

    #[test]
    fn test_no_move_on_full_board_in_either_mode() {
        let board = Board::from_rows([[H, A, H], [H, A, A], [A, H, H]]);
        let mut rng = SessionRng::new(1);

        assert_eq!(calculate_move(Mode::Easy, &board, &mut rng), None);
        assert_eq!(calculate_move(Mode::Impossible, &board, &mut rng), None);
    }
}
