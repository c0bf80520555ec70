mod board;
mod bot_controller;
mod game_state;
mod render;
mod session;
mod types;
mod win_detector;

pub use board::{BOARD_SIZE, Board};
pub use bot_controller::{best_move, calculate_move, calculate_random_move};
pub use game_state::{TicTacToeGameState, TurnOutcome};
pub use render::{CellView, Icon, Participants, RenderInstruction};
pub use session::{DEFAULT_IDLE_TIMEOUT, SurfaceTarget, TicTacToeSession, TicTacToeSessionSettings};
pub use types::{Cell, Coord, GameResult, Mode, Player, ScoredMove};
pub use win_detector::{WIN_LINES, evaluate, is_won, winner};
