//! Per-piece bookkeeping components.
//!
//! The visual piece entity itself (mesh, transform, [`Piece`] data) is
//! defined in [`crate::rendering::pieces`]; the components here are the
//! game-side annotations layered on top of it.

use bevy::prelude::*;

/// Tracks whether a piece has moved during the current game.
///
/// The rules library owns castling and double-step legality; this component
/// exists for presentation (the journal notes a piece's first move) and is
/// rebuilt to default whenever the board is respawned from a snapshot.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct HasMoved {
    pub moved: bool,
    pub move_count: u32,
}

impl HasMoved {
    /// Records one more move by this piece.
    pub fn note_move(&mut self) {
        self.moved = true;
        self.move_count += 1;
    }
}

/// A captured piece playing its removal animation.
///
/// The entity keeps its mesh but loses its `Piece` data the moment the
/// capture lands, so board scans never see a ghost. Once the timer runs
/// out the entity is despawned.
#[derive(Component, Debug)]
pub struct FadingCapture {
    pub timer: Timer,
}

impl Default for FadingCapture {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(0.6, TimerMode::Once),
        }
    }
}
