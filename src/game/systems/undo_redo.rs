//! Undo and redo over position snapshots.
//!
//! # Why snapshots, not inverse moves
//!
//! Restoring a stored snapshot reproduces castling rights, the en passant
//! square, and the halfmove clock exactly; an inverse-move scheme would
//! have to reconstruct all three. The cost is that the piece entities no
//! longer match the position, so both paths finish by requesting a full
//! board rebuild.
//!
//! # Engine games
//!
//! A single take-back in an engine game would leave the engine to move,
//! and it would immediately replay; undo therefore takes back the full
//! move pair when the single step lands on the engine's turn. Redo
//! mirrors that. Undo is refused while the engine is thinking, since its
//! reply would land on a position that no longer exists.

use bevy::prelude::*;

use crate::game::engine::resources::{OpponentMode, PendingEngineMove};
use crate::game::events::{BoardRefreshRequested, RedoRequested, UndoRequested};
use crate::game::resources::{GameVerdict, PendingPromotion, Selection, VerdictDialog};
use crate::game::systems::movement::MoveExecution;
use crate::game::systems::verdict::position_verdict;

pub fn handle_undo_requests(
    mut requests: MessageReader<UndoRequested>,
    mode: Res<OpponentMode>,
    engine_busy: Option<Res<PendingEngineMove>>,
    mut selection: ResMut<Selection>,
    mut promotion: ResMut<PendingPromotion>,
    mut verdict: ResMut<GameVerdict>,
    mut dialog: ResMut<VerdictDialog>,
    mut exec: MoveExecution,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    // Undo while the promotion dialog is open cancels the promotion.
    if promotion.is_active() {
        promotion.clear();
        selection.clear();
        info!("[UNDO] pending promotion cancelled");
        return;
    }
    if engine_busy.is_some() {
        info!("[UNDO] engine is thinking; undo ignored");
        return;
    }

    let mut undone = 0;
    for _ in 0..2 {
        let current = exec.rules.snapshot();
        let Some(target) = exec.snapshots.pop_for_undo(current) else {
            break;
        };
        if let Err(err) = exec.rules.restore(&target) {
            error!("[UNDO] snapshot restore failed: {err}");
            break;
        }
        if let Some(record) = exec.history.take_back() {
            if let Some(kind) = record.played.captured {
                exec.captured.remove_capture(record.played.color, kind);
            }
            exec.journal.log_undo(record.number, &record.played);
        }
        undone += 1;
        let engine_to_move = mode.engine_drives(exec.rules.turn());
        if !(engine_to_move && exec.snapshots.can_undo()) {
            break;
        }
    }
    if undone == 0 {
        info!("[UNDO] nothing to take back");
        return;
    }

    *verdict = GameVerdict::Playing;
    dialog.acknowledged = false;
    selection.clear();
    exec.hint.suggestion = None;
    exec.turn.sync(&exec.rules);
    exec.refresh.write(BoardRefreshRequested);
}

pub fn handle_redo_requests(
    mut requests: MessageReader<RedoRequested>,
    mode: Res<OpponentMode>,
    engine_busy: Option<Res<PendingEngineMove>>,
    mut selection: ResMut<Selection>,
    promotion: Res<PendingPromotion>,
    mut verdict: ResMut<GameVerdict>,
    mut dialog: ResMut<VerdictDialog>,
    mut exec: MoveExecution,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();
    if promotion.is_active() || engine_busy.is_some() {
        return;
    }

    let mut redone = 0;
    for _ in 0..2 {
        let current = exec.rules.snapshot();
        let Some(target) = exec.snapshots.pop_for_redo(current) else {
            break;
        };
        if let Err(err) = exec.rules.restore(&target) {
            error!("[REDO] snapshot restore failed: {err}");
            break;
        }
        if let Some(record) = exec.history.replay() {
            if let Some(kind) = record.played.captured {
                exec.captured.add_capture(record.played.color, kind);
            }
            exec.journal.log_redo(record.number, &record.played);
        }
        redone += 1;
        let engine_to_move = mode.engine_drives(exec.rules.turn());
        if !(engine_to_move && exec.snapshots.can_redo()) {
            break;
        }
    }
    if redone == 0 {
        info!("[REDO] nothing to replay");
        return;
    }

    // A redone move can be the mating move; re-evaluate rather than
    // assume play continues.
    *verdict = position_verdict(&exec.rules);
    dialog.acknowledged = false;
    selection.clear();
    exec.hint.suggestion = None;
    exec.turn.sync(&exec.rules);
    exec.refresh.write(BoardRefreshRequested);
}
