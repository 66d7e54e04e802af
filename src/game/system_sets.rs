//! System set ordering for the gameplay schedule.
//!
//! Click handling must see the selection state *before* the executor
//! mutates it, and visual systems must see piece coordinates *after*
//! the executor updates them, so the three sets run chained:
//!
//! `Input` → `Execution` → `Visual`
//!
//! All three are gated on `GameState::InGame`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum GameSystems {
    /// Click resolution, keyboard shortcuts, selection updates.
    Input,
    /// Move execution, undo/redo, promotion, verdicts, the engine bridge.
    Execution,
    /// Piece animation, capture fades, square highlights.
    Visual,
}
