use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::games::tictactoe::RenderInstruction;
use crate::{GameError, SurfaceId};
use super::ChatSurface;

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    order: Vec<SurfaceId>,
    history: HashMap<SurfaceId, Vec<RenderInstruction>>,
}

/// In-process surface that keeps every render it was given, per surface.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a surface that already exists outside this store.
    pub fn insert(&self, surface: SurfaceId, render: RenderInstruction) {
        let mut state = self.lock();
        if !state.history.contains_key(&surface) {
            state.order.push(surface.clone());
        }
        state.history.entry(surface).or_default().push(render);
    }

    pub fn latest(&self, surface: &SurfaceId) -> Option<RenderInstruction> {
        self.lock()
            .history
            .get(surface)
            .and_then(|renders| renders.last().cloned())
    }

    pub fn history(&self, surface: &SurfaceId) -> Vec<RenderInstruction> {
        self.lock().history.get(surface).cloned().unwrap_or_default()
    }

    pub fn render_count(&self, surface: &SurfaceId) -> usize {
        self.lock().history.get(surface).map_or(0, Vec::len)
    }

    pub fn last_surface(&self) -> Option<SurfaceId> {
        self.lock().order.last().cloned()
    }

    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.lock().order.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ChatSurface for MemorySurface {
    async fn send(&self, render: &RenderInstruction) -> Result<SurfaceId, GameError> {
        let mut state = self.lock();
        state.next_id += 1;
        let surface = SurfaceId::new(format!("surface-{}", state.next_id));
        state.order.push(surface.clone());
        state.history.insert(surface.clone(), vec![render.clone()]);
        Ok(surface)
    }

    async fn edit(&self, surface: &SurfaceId, render: &RenderInstruction) -> Result<(), GameError> {
        let mut state = self.lock();
        match state.history.get_mut(surface) {
            Some(renders) => {
                renders.push(render.clone());
                Ok(())
            }
            None => Err(GameError::Surface(format!("unknown surface {}", surface))),
        }
    }
}
