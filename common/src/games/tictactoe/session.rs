use std::time::Duration;

use crate::chat::{ChatSurface, Interaction, InteractionSource};
use crate::games::SessionRng;
use crate::{GameError, SessionId, SurfaceId, UserId, log};
use super::game_state::{TicTacToeGameState, TurnOutcome};
use super::render::{Participants, RenderInstruction};
use super::types::{Coord, GameResult, Mode};

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub session_id: SessionId,
    pub player: UserId,
    pub bot: UserId,
    pub mode: Mode,
    pub idle_timeout: Duration,
}

impl TicTacToeSessionSettings {
    pub fn new(session_id: SessionId, player: UserId, bot: UserId, mode: Mode) -> Self {
        Self {
            session_id,
            player,
            bot,
            mode,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }
}

/// Where the first board render goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceTarget {
    New,
    /// Take over a message that is already on screen.
    Existing(SurfaceId),
}

/// One match between one user and the AI on one surface.
///
/// The session owns the board; whatever the surface shows is a projection of it.
/// Clicks on occupied cells are rejected and the surface is re-rendered.
pub struct TicTacToeSession<S, I>
where
    S: ChatSurface,
    I: InteractionSource,
{
    settings: TicTacToeSessionSettings,
    state: TicTacToeGameState,
    rng: SessionRng,
    surface: S,
    interactions: I,
    surface_id: Option<SurfaceId>,
}

impl<S, I> TicTacToeSession<S, I>
where
    S: ChatSurface,
    I: InteractionSource,
{
    pub fn new(settings: TicTacToeSessionSettings, surface: S, interactions: I, rng: SessionRng) -> Self {
        let state = TicTacToeGameState::new(settings.mode);
        Self {
            settings,
            state,
            rng,
            surface,
            interactions,
            surface_id: None,
        }
    }

    pub fn state(&self) -> &TicTacToeGameState {
        &self.state
    }

    pub fn result(&self) -> GameResult {
        self.state.result
    }

    pub fn surface_id(&self) -> Option<&SurfaceId> {
        self.surface_id.as_ref()
    }

    pub fn render(&self) -> RenderInstruction {
        let participants = Participants {
            player: self.settings.player.clone(),
            bot: self.settings.bot.clone(),
        };
        RenderInstruction::build(&self.state.board, self.state.result, &participants, self.state.mode)
    }

    /// Shows the empty board and binds the session to the surface it lands on.
    pub async fn start(&mut self, target: SurfaceTarget) -> Result<SurfaceId, GameError> {
        let render = self.render();
        let surface_id = match target {
            SurfaceTarget::New => self.surface.send(&render).await?,
            SurfaceTarget::Existing(surface_id) => {
                self.surface.edit(&surface_id, &render).await?;
                surface_id
            }
        };

        log!(
            "[session:{}] Started {} game for {} on {}",
            self.settings.session_id, self.state.mode, self.settings.player, surface_id
        );
        self.interactions.watch(surface_id.clone());
        self.surface_id = Some(surface_id.clone());
        Ok(surface_id)
    }

    /// Applies the human move, lets the AI reply and re-renders.
    /// Returns `true` once the game has ended.
    pub async fn process_turn(&mut self, coord: Coord) -> Result<bool, GameError> {
        let surface_id = self.surface_id.clone().ok_or(GameError::NotStarted)?;

        let outcome = self.play_turn(coord).await?;
        log!("[session:{}] {} played {}", self.settings.session_id, self.settings.player, coord);
        if let Some(reply) = outcome.ai_reply {
            log!("[session:{}] AI played {}", self.settings.session_id, reply);
        }

        self.surface.edit(&surface_id, &self.render()).await?;
        Ok(outcome.result.is_terminal())
    }

    /// Marks the game abandoned and disables the whole board.
    pub async fn abandon(&mut self) -> Result<(), GameError> {
        self.state.abandon();
        if let Some(surface_id) = self.surface_id.clone() {
            self.surface.edit(&surface_id, &self.render()).await?;
        }
        Ok(())
    }

    /// Starts the game and processes turns until it ends or sits idle past the timeout.
    pub async fn run(mut self, target: SurfaceTarget) -> Result<GameResult, GameError> {
        let surface_id = self.start(target).await?;

        loop {
            let player = self.settings.player.clone();
            let watched = surface_id.clone();
            let waited = self
                .interactions
                .await_interaction(
                    move |interaction| interaction.author == player && interaction.surface == watched,
                    self.settings.idle_timeout,
                )
                .await;

            let interaction = match waited {
                Ok(interaction) => interaction,
                Err(reason) => {
                    log!("[session:{}] Abandoned: {}", self.settings.session_id, reason);
                    self.abandon().await?;
                    return Ok(self.state.result);
                }
            };

            match self.handle_interaction(&interaction).await {
                Ok(true) => {
                    log!("[session:{}] Finished: {}", self.settings.session_id, self.state.result);
                    return Ok(self.state.result);
                }
                Ok(false) => {}
                Err(err) if err.is_rejected_interaction() => {
                    log!(
                        "[session:{}] Ignored '{}' from {}: {}",
                        self.settings.session_id, interaction.custom_id, interaction.author, err
                    );
                    self.surface.edit(&surface_id, &self.render()).await?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn handle_interaction(&mut self, interaction: &Interaction) -> Result<bool, GameError> {
        let coord = Coord::parse_custom_id(&interaction.custom_id)?;
        self.process_turn(coord).await
    }

    /// Impossible-mode turns run the search on the blocking pool; the state
    /// is replaced only once the turn went through.
    async fn play_turn(&mut self, coord: Coord) -> Result<TurnOutcome, GameError> {
        match self.state.mode {
            Mode::Easy => self.state.play_turn(coord, &mut self.rng),
            Mode::Impossible => {
                let mut state = self.state.clone();
                let mut rng = self.rng.clone();
                let (state, rng, outcome) = tokio::task::spawn_blocking(move || {
                    let outcome = state.play_turn(coord, &mut rng);
                    (state, rng, outcome)
                })
                .await
                .map_err(|e| GameError::Engine(e.to_string()))?;

                let outcome = outcome?;
                self.state = state;
                self.rng = rng;
                Ok(outcome)
            }
        }
    }
}
