//! Messages passed between the input, execution, and presentation layers.
//!
//! # Flow
//!
//! Clicks on board entities arrive through thin observers that only record
//! *what* was clicked as a [`BoardClicked`] message. One reader,
//! `handle_board_clicks`, owns the selection state machine and decides
//! whether a click selects, deselects, or executes a move. Everything the
//! UI can trigger (undo, redo, hints, resignation, restart) travels the
//! same way, so keyboard shortcuts and egui buttons share one code path.
//!
//! [`MoveApplied`] fans out after a move lands: the verdict scan, the
//! journal, and the engine scheduler all react to it without touching the
//! executor.

use bevy::prelude::*;

use crate::game::rules::PlayedMove;
use crate::rendering::pieces::PieceKind;

/// A primary-button click resolved to board coordinates.
///
/// `x` is the rank index (0 = White's home rank), `y` the file index
/// (0 = the a-file). Clicks on a piece report the square under it.
#[derive(Message, Debug, Clone)]
pub struct BoardClicked {
    pub x: u8,
    pub y: u8,
}

/// A legal move was played on the rules board and mirrored to the scene.
#[derive(Message, Debug, Clone)]
pub struct MoveApplied {
    pub played: PlayedMove,
}

/// The player picked a piece in the promotion dialog.
#[derive(Message, Debug, Clone)]
pub struct PromotionChoice {
    pub kind: PieceKind,
}

/// Despawn every piece entity and respawn the set from the rules board.
///
/// Fired after undo, redo, promotion, and restart, the cases where
/// patching individual entities is more fragile than a rebuild.
#[derive(Message, Debug, Clone)]
pub struct BoardRefreshRequested;

/// Take back the most recent move (Ctrl+Z or the Undo button).
#[derive(Message, Debug, Clone)]
pub struct UndoRequested;

/// Replay the most recently undone move (Ctrl+Y or the Redo button).
#[derive(Message, Debug, Clone)]
pub struct RedoRequested;

/// Ask the engine for a suggested move for the side to play.
#[derive(Message, Debug, Clone)]
pub struct HintRequested;

/// The side to move concedes the game.
#[derive(Message, Debug, Clone)]
pub struct ResignRequested;

/// Tear the session down and start a fresh game in the same mode.
#[derive(Message, Debug, Clone)]
pub struct RestartRequested;
