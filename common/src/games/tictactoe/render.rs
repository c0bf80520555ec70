use crate::UserId;
use super::board::{BOARD_SIZE, Board};
use super::types::{Cell, Coord, GameResult, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    None,
    Human,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub custom_id: String,
    pub label: String,
    pub icon: Icon,
    pub disabled: bool,
}

/// Who is named in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participants {
    pub player: UserId,
    pub bot: UserId,
}

/// What the rendering layer should show: a status line and a 3x3 button grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    pub content: String,
    pub rows: [[CellView; BOARD_SIZE]; BOARD_SIZE],
}

impl RenderInstruction {
    pub fn build(board: &Board, result: GameResult, participants: &Participants, mode: Mode) -> Self {
        let disable_all = result.is_terminal();
        let rows = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                let coord = Coord::new(row, col);
                let cell = board.get(coord).unwrap_or_default();
                cell_view(coord, cell, disable_all)
            })
        });

        Self {
            content: status_line(result, participants, mode),
            rows,
        }
    }

    pub fn cell(&self, coord: Coord) -> Option<&CellView> {
        self.rows.get(coord.row)?.get(coord.col)
    }

    pub fn enabled_cells(&self) -> Vec<Coord> {
        let mut cells = Vec::new();
        for (row, views) in self.rows.iter().enumerate() {
            for (col, view) in views.iter().enumerate() {
                if !view.disabled {
                    cells.push(Coord::new(row, col));
                }
            }
        }
        cells
    }

    pub fn all_disabled(&self) -> bool {
        self.rows.iter().flatten().all(|view| view.disabled)
    }
}

fn cell_view(coord: Coord, cell: Cell, disable_all: bool) -> CellView {
    let icon = match cell {
        Cell::Empty => Icon::None,
        Cell::Human => Icon::Human,
        Cell::Ai => Icon::Ai,
    };

    CellView {
        custom_id: coord.custom_id(),
        label: " ".to_string(),
        icon,
        disabled: disable_all || cell != Cell::Empty,
    }
}

fn status_line(result: GameResult, participants: &Participants, mode: Mode) -> String {
    let headline = match result {
        GameResult::InProgress | GameResult::Abandoned => {
            format!("{}'s TicTacToe game", participants.player.mention())
        }
        GameResult::HumanWins => format!("{} has won", participants.player.mention()),
        GameResult::AiWins => format!("{} has won", participants.bot.mention()),
        GameResult::Draw => "Nobody has won".to_string(),
    };
    format!("{}\n**Mode:** `{}`", headline, mode)
}
