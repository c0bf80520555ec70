use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell ({row}, {col}) is already occupied")]
    InvalidMove { row: usize, col: usize },

    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("malformed cell identifier '{0}'")]
    MalformedCellId(String),

    #[error("game is already over")]
    GameOver,

    #[error("session has not been started")]
    NotStarted,

    #[error("AI move computation failed: {0}")]
    Engine(String),

    #[error("surface error: {0}")]
    Surface(String),
}

impl GameError {
    /// Errors caused by a single bad interaction. The session ignores them and keeps waiting.
    pub fn is_rejected_interaction(&self) -> bool {
        matches!(
            self,
            GameError::InvalidMove { .. }
                | GameError::OutOfBounds { .. }
                | GameError::MalformedCellId(_)
        )
    }
}
