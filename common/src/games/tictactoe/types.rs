use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::GameError;
use super::board::BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Human,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Ai,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Ai,
            Player::Ai => Player::Human,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::Human => Cell::Human,
            Player::Ai => Cell::Ai,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// AI picks uniformly among legal moves.
    Easy,
    /// AI plays the minimax-optimal move and never loses.
    #[default]
    Impossible,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Easy => write!(f, "Easy"),
            Mode::Impossible => write!(f, "Impossible"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Mode::Easy),
            "impossible" | "hard" => Ok(Mode::Impossible),
            other => Err(format!("Unknown mode '{}', expected 'easy' or 'impossible'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Button identifier in the `"<row> <col>"` form carried by interactions.
    pub fn custom_id(&self) -> String {
        format!("{} {}", self.row, self.col)
    }

    pub fn parse_custom_id(custom_id: &str) -> Result<Self, GameError> {
        let malformed = || GameError::MalformedCellId(custom_id.to_string());

        let mut parts = custom_id.split_whitespace();
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let row: usize = row.parse().map_err(|_| malformed())?;
        let col: usize = col.parse().map_err(|_| malformed())?;

        let coord = Coord::new(row, col);
        if !coord.is_on_board() {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(coord)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A move together with its game-theoretic value: +1 AI wins, 0 draw, -1 human wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub coord: Coord,
    pub score: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameResult {
    #[default]
    InProgress,
    HumanWins,
    AiWins,
    Draw,
    /// Idle timeout elapsed; no winner.
    Abandoned,
}

impl GameResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameResult::InProgress => "in progress",
            GameResult::HumanWins => "human wins",
            GameResult::AiWins => "AI wins",
            GameResult::Draw => "draw",
            GameResult::Abandoned => "abandoned",
        };
        write!(f, "{}", text)
    }
}
