//! Boundary with the chat platform.
//!
//! Sessions never talk to the network themselves. They hand render
//! instructions to a [`ChatSurface`] and pull button clicks from an
//! [`InteractionSource`]; hosts plug their platform in behind these traits.

mod interaction_hub;
mod memory_surface;

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::games::tictactoe::RenderInstruction;
use crate::{GameError, SurfaceId, UserId};

pub use interaction_hub::{InteractionHub, InteractionSubscription};
pub use memory_surface::MemorySurface;

/// A button click on a rendered surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub author: UserId,
    pub surface: SurfaceId,
    /// Clicked cell as `"<row> <col>"`.
    pub custom_id: String,
}

impl Interaction {
    pub fn new(author: UserId, surface: SurfaceId, custom_id: impl Into<String>) -> Self {
        Self {
            author,
            surface,
            custom_id: custom_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error("no matching interaction before the deadline")]
    Timeout,
    #[error("interaction stream closed")]
    Closed,
}

pub trait ChatSurface: Send + Sync + 'static {
    /// Posts a new message and returns a handle for later edits.
    fn send(
        &self,
        render: &RenderInstruction,
    ) -> impl Future<Output = Result<SurfaceId, GameError>> + Send;

    fn edit(
        &self,
        surface: &SurfaceId,
        render: &RenderInstruction,
    ) -> impl Future<Output = Result<(), GameError>> + Send;
}

pub trait InteractionSource: Send {
    /// Starts receiving interactions posted on `surface`.
    ///
    /// Watching the surface already watched keeps anything queued so far.
    fn watch(&mut self, surface: SurfaceId);

    /// Waits for the next interaction accepted by `filter`.
    ///
    /// Fails with [`WaitError::Closed`] when no surface is watched.
    ///
    /// The deadline is fixed when the wait starts; interactions rejected by the
    /// filter are dropped and do not extend it.
    fn await_interaction<F>(
        &mut self,
        filter: F,
        timeout: Duration,
    ) -> impl Future<Output = Result<Interaction, WaitError>> + Send
    where
        F: Fn(&Interaction) -> bool + Send;
}
