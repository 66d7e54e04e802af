//! Session setup and restart.
//!
//! A "session" is everything reset between games: the rules board, both
//! snapshot stacks, the notation history, capture lists, selection,
//! verdict, and the journal. Entering `InGame` from the main menu starts
//! one; coming back from the settings screen does not, which is why
//! [`start_game_session`] checks for surviving piece entities before it
//! touches anything.

use bevy::prelude::*;

use crate::game::engine::resources::{OpponentMode, PendingEngineMove, PendingHint};
use crate::game::events::{BoardRefreshRequested, RestartRequested};
use crate::game::resources::{GameVerdict, PendingPromotion, Selection, VerdictDialog};
use crate::game::systems::movement::MoveExecution;

/// Resets every session-scoped resource and journals the new game.
fn reset_session(
    mode: &OpponentMode,
    exec: &mut MoveExecution,
    selection: &mut Selection,
    promotion: &mut PendingPromotion,
    verdict: &mut GameVerdict,
    dialog: &mut VerdictDialog,
) {
    exec.rules.reset();
    exec.snapshots.clear();
    exec.history.clear();
    exec.captured.clear();
    exec.hint.suggestion = None;
    selection.clear();
    promotion.clear();
    *verdict = GameVerdict::Playing;
    dialog.acknowledged = false;
    exec.turn.sync(&exec.rules);
    exec.journal.new_session(mode.label());

    // A reply computed for the previous game must never land in this one.
    exec.commands.remove_resource::<PendingEngineMove>();
    exec.commands.remove_resource::<PendingHint>();
}

/// Runs on entering `InGame`; a no-op when a game is already on the board.
pub fn start_game_session(
    mode: Res<OpponentMode>,
    mut selection: ResMut<Selection>,
    mut promotion: ResMut<PendingPromotion>,
    mut verdict: ResMut<GameVerdict>,
    mut dialog: ResMut<VerdictDialog>,
    mut exec: MoveExecution,
) {
    if !exec.pieces.is_empty() {
        info!("[SESSION] resuming the game in progress");
        return;
    }
    reset_session(
        &mode,
        &mut exec,
        &mut selection,
        &mut promotion,
        &mut verdict,
        &mut dialog,
    );
    info!("[SESSION] new game: {}", mode.label());
}

/// "Play again" from the verdict dialog or the pause overlay.
pub fn handle_restart_requests(
    mut requests: MessageReader<RestartRequested>,
    mode: Res<OpponentMode>,
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
    reset_session(
        &mode,
        &mut exec,
        &mut selection,
        &mut promotion,
        &mut verdict,
        &mut dialog,
    );
    exec.refresh.write(BoardRefreshRequested);
    info!("[SESSION] restart: {}", mode.label());
}
