use serde::{Deserialize, Serialize};
use std::time::Duration;

use common::UserId;
use common::config::Validate;
use common::games::tictactoe::{DEFAULT_IDLE_TIMEOUT, Mode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub bot_user_id: String,
    pub default_mode: Mode,
    pub idle_timeout_secs: u64,
    pub human_icon: String,
    pub ai_icon: String,
    /// Fixed seed for Easy-mode moves; random per session when unset.
    pub seed: Option<u64>,
    pub interaction_buffer: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_user_id: "asteroid".to_string(),
            default_mode: Mode::Impossible,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT.as_secs(),
            human_icon: "X".to_string(),
            ai_icon: "O".to_string(),
            seed: None,
            interaction_buffer: 64,
        }
    }
}

impl BotConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn bot_user(&self) -> UserId {
        UserId::new(self.bot_user_id.clone())
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bot_user_id.trim().is_empty() {
            return Err("bot_user_id must not be empty".to_string());
        }
        if self.idle_timeout_secs == 0 {
            return Err("idle_timeout_secs must be greater than 0".to_string());
        }
        if self.human_icon.is_empty() || self.ai_icon.is_empty() {
            return Err("human_icon and ai_icon must not be empty".to_string());
        }
        if self.human_icon == self.ai_icon {
            return Err(format!("human_icon and ai_icon must differ, both are '{}'", self.ai_icon));
        }
        if self.interaction_buffer == 0 {
            return Err("interaction_buffer must be greater than 0".to_string());
        }
        Ok(())
    }
}
