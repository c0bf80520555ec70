use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

use common::chat::{ChatSurface, Interaction, InteractionHub, InteractionSource};
use common::games::SessionRng;
use common::games::tictactoe::{
    GameResult, Mode, SurfaceTarget, TicTacToeSession, TicTacToeSessionSettings,
};
use common::id_generator::generate_session_id;
use common::{SessionId, UserId, log};

use crate::bot_config::BotConfig;

type Registry = Arc<Mutex<HashMap<SessionId, ActiveSession>>>;

fn lock(registry: &Registry) -> MutexGuard<'_, HashMap<SessionId, ActiveSession>> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub session_id: SessionId,
    pub player: UserId,
    pub mode: Mode,
}

/// Removes the registry entry when the session task ends, however it ends.
struct Registration {
    sessions: Registry,
    session_id: SessionId,
}

impl Drop for Registration {
    fn drop(&mut self) {
        lock(&self.sessions).remove(&self.session_id);
    }
}

pub struct StartedGame {
    pub session_id: SessionId,
    /// Resolves to `None` when the session stopped on a surface error.
    pub handle: JoinHandle<Option<GameResult>>,
}

/// Runs any number of concurrent sessions, each as its own task,
/// all fed from one interaction hub.
#[derive(Clone)]
pub struct GameSessionManager<S: ChatSurface + Clone> {
    sessions: Registry,
    hub: InteractionHub,
    surface: S,
    bot_user: UserId,
    idle_timeout: Duration,
    seed: Option<u64>,
}

impl<S: ChatSurface + Clone> GameSessionManager<S> {
    pub fn new(
        surface: S,
        hub: InteractionHub,
        bot_user: UserId,
        idle_timeout: Duration,
        seed: Option<u64>,
    ) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            hub,
            surface,
            bot_user,
            idle_timeout,
            seed,
        }
    }

    pub fn from_config(surface: S, config: &BotConfig) -> Self {
        Self::new(
            surface,
            InteractionHub::new(config.interaction_buffer),
            config.bot_user(),
            config.idle_timeout(),
            config.seed,
        )
    }

    pub fn start_game(&self, player: UserId, mode: Mode, target: SurfaceTarget) -> StartedGame {
        let registration = self.register(&player, mode);
        let session_id = registration.session_id.clone();

        let rng = match self.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        log!(
            "Session {} created for {} in {} mode, seed {}",
            session_id, player, mode, rng.seed()
        );

        let settings = TicTacToeSessionSettings::new(session_id.clone(), player, self.bot_user.clone(), mode)
            .with_idle_timeout(self.idle_timeout);
        let mut interactions = self.hub.subscribe();
        // A surface already on screen can be clicked before the task gets to run.
        if let SurfaceTarget::Existing(surface_id) = &target {
            interactions.watch(surface_id.clone());
        }
        let session = TicTacToeSession::new(settings, self.surface.clone(), interactions, rng);

        let handle = tokio::spawn(async move {
            let outcome = session.run(target).await;
            match outcome {
                Ok(result) => {
                    log!("Session {} removed, result: {}", registration.session_id, result);
                    Some(result)
                }
                Err(e) => {
                    log!("Session {} failed: {}", registration.session_id, e);
                    None
                }
            }
        });

        StartedGame { session_id, handle }
    }

    /// Hands a click to the session playing on its surface.
    pub fn dispatch(&self, interaction: Interaction) -> bool {
        let surface = interaction.surface.clone();
        let delivered = self.hub.publish(interaction);
        if !delivered {
            log!("Interaction on {} dropped, no game is waiting there", surface);
        }
        delivered
    }

    pub fn active_sessions(&self) -> Vec<ActiveSession> {
        let mut sessions: Vec<ActiveSession> = lock(&self.sessions).values().cloned().collect();
        sessions.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        sessions
    }

    fn register(&self, player: &UserId, mode: Mode) -> Registration {
        let mut sessions = lock(&self.sessions);
        let mut session_id = generate_session_id();
        while sessions.contains_key(&session_id) {
            session_id = generate_session_id();
        }
        sessions.insert(
            session_id.clone(),
            ActiveSession {
                session_id: session_id.clone(),
                player: player.clone(),
                mode,
            },
        );
        Registration {
            sessions: self.sessions.clone(),
            session_id,
        }
    }
}
