use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use common::chat::ChatSurface;
use common::games::tictactoe::{Icon, RenderInstruction};
use common::{GameError, SurfaceId};

#[derive(Debug, Default)]
struct Boards {
    next_id: u64,
    /// Boards whose game is still running.
    live: HashSet<SurfaceId>,
    last: Option<SurfaceId>,
}

/// Prints every render to stdout. Only the ids of boards still in play are
/// kept, plus the newest one so clicks without an explicit surface can find it.
#[derive(Debug, Clone)]
pub struct ConsoleSurface {
    boards: Arc<Mutex<Boards>>,
    human_icon: String,
    ai_icon: String,
}

impl ConsoleSurface {
    pub fn new(human_icon: impl Into<String>, ai_icon: impl Into<String>) -> Self {
        Self {
            boards: Arc::new(Mutex::new(Boards::default())),
            human_icon: human_icon.into(),
            ai_icon: ai_icon.into(),
        }
    }

    pub fn last_surface(&self) -> Option<SurfaceId> {
        self.lock().last.clone()
    }

    pub fn format(&self, surface: &SurfaceId, render: &RenderInstruction) -> String {
        let mut out = format!("[{}]\n{}\n   0 1 2\n", surface, render.content);
        for (row, views) in render.rows.iter().enumerate() {
            out.push_str(&format!("{} ", row));
            for view in views {
                let symbol = match view.icon {
                    Icon::Human => self.human_icon.as_str(),
                    Icon::Ai => self.ai_icon.as_str(),
                    Icon::None if view.disabled => "-",
                    Icon::None => ".",
                };
                out.push(' ');
                out.push_str(symbol);
            }
            out.push('\n');
        }
        out
    }

    fn lock(&self) -> MutexGuard<'_, Boards> {
        self.boards.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ChatSurface for ConsoleSurface {
    async fn send(&self, render: &RenderInstruction) -> Result<SurfaceId, GameError> {
        let surface = {
            let mut boards = self.lock();
            boards.next_id += 1;
            let surface = SurfaceId::new(format!("surface-{}", boards.next_id));
            if !render.all_disabled() {
                boards.live.insert(surface.clone());
            }
            boards.last = Some(surface.clone());
            surface
        };
        println!("{}", self.format(&surface, render));
        Ok(surface)
    }

    async fn edit(&self, surface: &SurfaceId, render: &RenderInstruction) -> Result<(), GameError> {
        {
            let mut boards = self.lock();
            if !boards.live.contains(surface) {
                return Err(GameError::Surface(format!("unknown surface {}", surface)));
            }
            if render.all_disabled() {
                boards.live.remove(surface);
            }
        }
        println!("{}", self.format(surface, render));
        Ok(())
    }
}
