use crate::GameError;
use crate::games::SessionRng;
use super::board::Board;
use super::bot_controller::calculate_move;
use super::types::{Coord, GameResult, Mode, Player};
use super::win_detector::is_won;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub ai_reply: Option<Coord>,
    pub result: GameResult,
}

/// Authoritative state of one match: the board, the difficulty and the result so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub mode: Mode,
    pub result: GameResult,
}

impl TicTacToeGameState {
    pub fn new(mode: Mode) -> Self {
        Self {
            board: Board::new(),
            mode,
            result: GameResult::InProgress,
        }
    }

    fn place_human(&mut self, coord: Coord) -> Result<(), GameError> {
        self.place(coord, Player::Human)
    }

    fn place_ai(&mut self, coord: Coord) -> Result<(), GameError> {
        self.place(coord, Player::Ai)
    }

    /// True right after a human move that neither won nor filled the board.
    fn awaits_ai(&self) -> bool {
        self.result == GameResult::InProgress
            && !self.board.is_full()
            && !is_won(&self.board, Player::Human)
    }

    /// Human move followed by the AI reply.
    ///
    /// Runs the full minimax search in Impossible mode, so async callers
    /// should keep it off the event loop.
    pub fn play_turn(&mut self, coord: Coord, rng: &mut SessionRng) -> Result<TurnOutcome, GameError> {
        self.place_human(coord)?;
        let mut ai_reply = None;
        if self.awaits_ai() {
            if let Some(reply) = calculate_move(self.mode, &self.board, rng) {
                self.place_ai(reply)?;
                ai_reply = Some(reply);
            }
        }
        Ok(TurnOutcome {
            ai_reply,
            result: self.result,
        })
    }

    pub fn abandon(&mut self) {
        if !self.result.is_terminal() {
            self.result = GameResult::Abandoned;
        }
    }

    fn place(&mut self, coord: Coord, player: Player) -> Result<(), GameError> {
        if self.result.is_terminal() {
            return Err(GameError::GameOver);
        }
        self.board.place(coord, player)?;
        self.result = Self::outcome(&self.board);
        Ok(())
    }

    /// Human win, then AI win, then draw on a full board.
    fn outcome(board: &Board) -> GameResult {
        if is_won(board, Player::Human) {
            GameResult::HumanWins
        } else if is_won(board, Player::Ai) {
            GameResult::AiWins
        } else if board.possible_moves().is_empty() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }
}
