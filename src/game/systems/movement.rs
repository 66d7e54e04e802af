//! Move execution: the one place a move is played and mirrored.
//!
//! # Contract
//!
//! [`execute_move`] is the single entry point for playing a resolved legal
//! move, shared by clicks, the promotion dialog, and the engine bridge.
//! It performs, in order:
//!
//! 1. snapshot the position and play the move on the rules board (the
//!    authority; if this fails, nothing else happens)
//! 2. push the pre-move snapshot for undo
//! 3. mirror the result onto the scene: captured entity starts its fade,
//!    the mover's coordinates change (the glide animation follows them),
//!    a castling rook shifts, a promotion requests a full piece rebuild
//! 4. bookkeeping: history, turn mirror, journal, capture list; any
//!    engine hint on screen is stale now and is dropped
//! 5. announce the move as a [`MoveApplied`] message
//!
//! The scene is never consulted to decide anything; it only receives.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::game::components::{FadingCapture, HasMoved};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{BoardRefreshRequested, MoveApplied};
use crate::game::resources::{
    CapturedPieces, CurrentTurn, GameJournal, MoveHistory, SnapshotStacks,
};
use crate::game::engine::resources::EngineHint;
use crate::game::rules::{algebraic, Move, PlayedMove, RulesBoard};
use crate::rendering::pieces::Piece;

/// Everything move execution touches, bundled for reuse.
#[derive(SystemParam)]
pub struct MoveExecution<'w, 's> {
    pub rules: ResMut<'w, RulesBoard>,
    pub snapshots: ResMut<'w, SnapshotStacks>,
    pub history: ResMut<'w, MoveHistory>,
    pub turn: ResMut<'w, CurrentTurn>,
    pub captured: ResMut<'w, CapturedPieces>,
    pub journal: ResMut<'w, GameJournal>,
    pub hint: ResMut<'w, EngineHint>,
    pub applied: MessageWriter<'w, MoveApplied>,
    pub refresh: MessageWriter<'w, BoardRefreshRequested>,
    pub commands: Commands<'w, 's>,
    pub pieces: Query<'w, 's, (Entity, &'static mut Piece, &'static mut HasMoved)>,
}

/// Plays `mv` on the rules board and mirrors it onto the scene.
///
/// `origin` tags the log line ("click", "promotion", "engine").
pub fn execute_move(
    origin: &str,
    exec: &mut MoveExecution,
    mv: &Move,
) -> GameResult<PlayedMove> {
    let before = exec.rules.snapshot();
    let played = exec.rules.play(mv)?;
    exec.snapshots.push_played(before);
    let number = exec.turn.move_number;

    // Captured entity: strip its piece data immediately so board scans
    // never see it, then let the fade animation finish the despawn.
    if let Some(square) = played.capture_square {
        let victim = exec
            .pieces
            .iter_mut()
            .find(|(_, piece, _)| (piece.x, piece.y) == square && piece.color != played.color);
        match victim {
            Some((entity, _, _)) => {
                exec.commands
                    .entity(entity)
                    .remove::<Piece>()
                    .insert(FadingCapture::default());
            }
            None => warn!(
                "[MOVE] capture on {} had no piece entity to remove",
                algebraic(square)
            ),
        }
        if let Some(kind) = played.captured {
            exec.captured.add_capture(played.color, kind);
        }
    }

    // The mover keeps its entity; the glide animation chases the new
    // coordinates.
    let mover = exec
        .pieces
        .iter_mut()
        .find(|(_, piece, _)| (piece.x, piece.y) == played.from && piece.color == played.color);
    match mover {
        Some((_, mut piece, mut has_moved)) => {
            piece.x = played.to.0;
            piece.y = played.to.1;
            has_moved.note_move();
        }
        None => {
            return Err(GameError::PieceNotFound {
                x: played.from.0,
                y: played.from.1,
            })
        }
    }

    if let Some((rook_from, rook_to)) = played.castling_rook {
        let rook = exec
            .pieces
            .iter_mut()
            .find(|(_, piece, _)| (piece.x, piece.y) == rook_from && piece.color == played.color);
        match rook {
            Some((_, mut piece, mut has_moved)) => {
                piece.x = rook_to.0;
                piece.y = rook_to.1;
                has_moved.note_move();
            }
            None => warn!(
                "[MOVE] castling rook missing from {}",
                algebraic(rook_from)
            ),
        }
    }

    // A promoted pawn changes kind and mesh; rebuilding the set is
    // simpler and safer than morphing the entity in place.
    if played.promotion.is_some() {
        exec.refresh.write(BoardRefreshRequested);
    }

    exec.history.record(number, played.clone());
    exec.turn.sync(&exec.rules);
    exec.journal.log_move(number, &played);
    exec.hint.suggestion = None;
    exec.applied.write(MoveApplied {
        played: played.clone(),
    });

    info!(
        "[MOVE] {origin}: {number}. {} {} ({} -> {})",
        played.color.label(),
        played.san,
        algebraic(played.from),
        algebraic(played.to)
    );
    Ok(played)
}
