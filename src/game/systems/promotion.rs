//! Completes a parked promotion move once the dialog reports a choice.

use bevy::prelude::*;

use crate::game::events::PromotionChoice;
use crate::game::resources::PendingPromotion;
use crate::game::systems::movement::{execute_move, MoveExecution};

pub fn resolve_promotion_choice(
    mut choices: MessageReader<PromotionChoice>,
    mut promotion: ResMut<PendingPromotion>,
    mut exec: MoveExecution,
) {
    for choice in choices.read() {
        let Some((from, to)) = promotion.squares() else {
            continue;
        };
        let color = exec.rules.turn();
        match exec.rules.resolve_move(from, to, Some(choice.kind)) {
            Ok(mv) => {
                exec.journal.log_promotion_choice(color, choice.kind);
                if let Err(err) = execute_move("promotion", &mut exec, &mv) {
                    error!("[PROMOTION] move failed: {err}");
                }
            }
            // Should not happen: the dialog only opens for a legal pair.
            Err(err) => error!("[PROMOTION] {err}"),
        }
        promotion.clear();
    }
}
