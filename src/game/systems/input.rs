//! Click handling and keyboard shortcuts.
//!
//! # Observer → message → reader
//!
//! The observers attached to board squares and pieces are deliberately
//! thin: they check the button, read coordinates off the clicked entity,
//! and emit [`BoardClicked`]. The whole selection state machine lives in
//! [`handle_board_clicks`], which is the only writer of [`Selection`]
//! during play. Keeping one reader means the click rules (whose turn,
//! pending promotion, open dialogs) are stated once.

use bevy::picking::events::{Click, Pointer};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;

use crate::game::engine::resources::{OpponentMode, PendingEngineMove};
use crate::game::events::{
    BoardClicked, HintRequested, RedoRequested, ResignRequested, UndoRequested,
};
use crate::game::resources::{GameVerdict, PendingPromotion, Selection};
use crate::game::rules::algebraic;
use crate::game::systems::movement::{execute_move, MoveExecution};
use crate::rendering::pieces::Piece;
use crate::rendering::utils::BoardSquare;
use crate::ui::overlay::OverlayState;

pub(crate) fn is_primary(button: PointerButton) -> bool {
    matches!(button, PointerButton::Primary)
}

/// Observer on every board square.
pub fn on_square_clicked(
    click: On<Pointer<Click>>,
    squares: Query<&BoardSquare>,
    mut clicks: MessageWriter<BoardClicked>,
) {
    if !is_primary(click.event.button) {
        return;
    }
    if let Ok(square) = squares.get(click.entity) {
        clicks.write(BoardClicked {
            x: square.x,
            y: square.y,
        });
    }
}

/// Observer on every piece. Reports the square the piece stands on, so a
/// click on a piece and a click on its square are the same thing
/// downstream.
pub fn on_piece_clicked(
    click: On<Pointer<Click>>,
    pieces: Query<&Piece>,
    mut clicks: MessageWriter<BoardClicked>,
) {
    if !is_primary(click.event.button) {
        return;
    }
    if let Ok(piece) = pieces.get(click.entity) {
        clicks.write(BoardClicked {
            x: piece.x,
            y: piece.y,
        });
    }
}

/// The selection state machine.
///
/// Per click: a second click on the selected square deselects; a click on
/// a legal target plays the move (or opens the promotion dialog); a click
/// on a friendly piece selects it, switching selection if another was
/// held; anything else clears the selection.
pub fn handle_board_clicks(
    mut clicks: MessageReader<BoardClicked>,
    mut selection: ResMut<Selection>,
    mut promotion: ResMut<PendingPromotion>,
    verdict: Res<GameVerdict>,
    overlay: Res<OverlayState>,
    mode: Res<OpponentMode>,
    engine_busy: Option<Res<PendingEngineMove>>,
    mut exec: MoveExecution,
) {
    for click in clicks.read() {
        if verdict.is_over() || promotion.is_active() || overlay.open {
            continue;
        }
        let to_move = exec.rules.turn();
        if mode.engine_drives(to_move) || engine_busy.is_some() {
            continue;
        }
        // Any click retires the engine suggestion on screen.
        exec.hint.suggestion = None;
        let clicked = (click.x, click.y);

        if selection.is_selected(clicked) {
            selection.clear();
            continue;
        }

        if selection.is_target(clicked) {
            let Some(from) = selection.square else {
                selection.clear();
                continue;
            };
            if exec.rules.needs_promotion_choice(from, clicked) {
                promotion.start(from, clicked, to_move);
                selection.clear();
                info!(
                    "[INPUT] promotion pending on {} -> {}",
                    algebraic(from),
                    algebraic(clicked)
                );
                continue;
            }
            match exec.rules.resolve_move(from, clicked, None) {
                Ok(mv) => {
                    if let Err(err) = execute_move("click", &mut exec, &mv) {
                        error!("[INPUT] move failed: {err}");
                    }
                }
                Err(err) => warn!("[INPUT] {err}"),
            }
            selection.clear();
            continue;
        }

        match exec.rules.piece_at(clicked) {
            Some((color, _)) if color == to_move => {
                let targets = exec.rules.legal_targets_from(clicked);
                selection.select(clicked, color, targets);
            }
            _ => selection.clear(),
        }
    }
}

/// Ctrl+Z undo, Ctrl+Y redo, H for an engine hint, R resigns.
///
/// Escape is owned by the pause overlay. The resignation handler ignores
/// the key once the game is over, so a stray R cannot corrupt a result.
pub fn keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    overlay: Res<OverlayState>,
    promotion: Res<PendingPromotion>,
    mut undo: MessageWriter<UndoRequested>,
    mut redo: MessageWriter<RedoRequested>,
    mut hint: MessageWriter<HintRequested>,
    mut resign: MessageWriter<ResignRequested>,
) {
    if overlay.open || promotion.is_active() {
        return;
    }
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if ctrl && keyboard.just_pressed(KeyCode::KeyZ) {
        undo.write(UndoRequested);
    }
    if ctrl && keyboard.just_pressed(KeyCode::KeyY) {
        redo.write(RedoRequested);
    }
    if !ctrl && keyboard.just_pressed(KeyCode::KeyH) {
        hint.write(HintRequested);
    }
    if !ctrl && keyboard.just_pressed(KeyCode::KeyR) {
        resign.write(ResignRequested);
    }
}
