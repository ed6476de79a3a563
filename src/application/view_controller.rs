// View controller - Tracks the active view and which view instance is mounted
use crate::domain::view::View;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Proof that the view instance which issued a request is still on screen.
///
/// Tokens go stale as soon as the controller switches to another view, so
/// late responses can be dropped instead of writing into discarded state.
#[derive(Debug, Clone)]
pub struct MountToken {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl MountToken {
    /// A token that never goes stale, for one-shot commands with no view switching.
    pub fn detached() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            issued: 0,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.issued
    }
}

#[derive(Debug, Default)]
pub struct ViewController {
    current: View,
    generation: Arc<AtomicU64>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Switches to `view`. Returns false (and keeps existing mounts alive)
    /// when `view` is already showing.
    pub fn navigate(&mut self, view: View) -> bool {
        if self.current == view {
            return false;
        }

        self.current = view;
        self.generation.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(view = %view, "navigated");
        true
    }

    /// Token for the view that is currently showing.
    pub fn mount(&self) -> MountToken {
        MountToken {
            generation: self.generation.clone(),
            issued: self.generation.load(Ordering::SeqCst),
        }
    }
}
