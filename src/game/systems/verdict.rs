//! End-of-game detection and resignation.
//!
//! # One writer, one moment
//!
//! [`scan_for_verdict`] runs after moves apply and asks the rules board
//! how the game stands. It writes [`GameVerdict`] at most once per finish:
//! once the verdict is terminal the scan stands down until undo or a new
//! session puts it back to `Playing`. Statistics are recorded at that
//! same transition, so undoing out of a mate and finishing again counts
//! as a new result, which is how casual analysis play expects it.
//!
//! # Detection order
//!
//! Checkmate wins over everything; fivefold repetition is checked before
//! stalemate and the fifty-move rule so a forced shuffle is reported for
//! what it is; insufficient material beats the fifty-move clock because
//! it is the stronger claim.

use bevy::prelude::*;

use crate::core::resources::GameStatistics;
use crate::game::events::{MoveApplied, ResignRequested};
use crate::game::resources::{
    GameJournal, GameVerdict, MoveHistory, PendingPromotion, VerdictDialog,
};
use crate::game::rules::RulesBoard;
use crate::rendering::pieces::PieceColor;

/// How the current position stands, by the book.
pub fn position_verdict(rules: &RulesBoard) -> GameVerdict {
    if rules.is_checkmate() {
        return match rules.turn() {
            PieceColor::White => GameVerdict::BlackWinsByCheckmate,
            PieceColor::Black => GameVerdict::WhiteWinsByCheckmate,
        };
    }
    if rules.is_fivefold_repetition() {
        return GameVerdict::FivefoldRepetition;
    }
    if rules.is_stalemate() {
        return GameVerdict::Stalemate;
    }
    if rules.is_insufficient_material() {
        return GameVerdict::InsufficientMaterial;
    }
    if rules.is_fifty_moves() {
        return GameVerdict::FiftyMoveRule;
    }
    GameVerdict::Playing
}

/// Checks the position after every applied move.
pub fn scan_for_verdict(
    mut applied: MessageReader<MoveApplied>,
    rules: Res<RulesBoard>,
    history: Res<MoveHistory>,
    mut verdict: ResMut<GameVerdict>,
    mut dialog: ResMut<VerdictDialog>,
    mut journal: ResMut<GameJournal>,
    mut stats: ResMut<GameStatistics>,
) {
    if applied.is_empty() {
        return;
    }
    applied.clear();
    if verdict.is_over() {
        return;
    }

    let result = position_verdict(&rules);
    if !result.is_over() {
        return;
    }

    *verdict = result;
    dialog.acknowledged = false;
    journal.log_game_end(result, history.len());
    stats.record_game(result.winner(), history.len() as u32);
    info!("[VERDICT] {}: {}", result.headline(), result.detail());
}

/// The side to move concedes.
pub fn handle_resignations(
    mut requests: MessageReader<ResignRequested>,
    rules: Res<RulesBoard>,
    history: Res<MoveHistory>,
    promotion: Res<PendingPromotion>,
    mut verdict: ResMut<GameVerdict>,
    mut dialog: ResMut<VerdictDialog>,
    mut journal: ResMut<GameJournal>,
    mut stats: ResMut<GameStatistics>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();
    if verdict.is_over() || promotion.is_active() {
        return;
    }

    let resigner = rules.turn();
    let result = match resigner {
        PieceColor::White => GameVerdict::BlackWinsByResignation,
        PieceColor::Black => GameVerdict::WhiteWinsByResignation,
    };
    journal.log_resignation(resigner);

    *verdict = result;
    dialog.acknowledged = false;
    journal.log_game_end(result, history.len());
    stats.record_game(result.winner(), history.len() as u32);
    info!("[VERDICT] {} resigns", resigner.label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_position_is_still_playing() {
        let rules = RulesBoard::default();
        assert_eq!(position_verdict(&rules), GameVerdict::Playing);
    }

    #[test]
    fn scholars_mate_reads_as_a_white_win() {
        let mut rules = RulesBoard::default();
        for (from, to) in [
            ((1, 4), (3, 4)),
            ((6, 4), (4, 4)),
            ((0, 5), (3, 2)),
            ((7, 1), (5, 2)),
            ((0, 3), (4, 7)),
            ((7, 6), (5, 5)),
            ((4, 7), (6, 5)),
        ] {
            rules.play_between(from, to, None).unwrap();
        }
        assert_eq!(position_verdict(&rules), GameVerdict::WhiteWinsByCheckmate);
    }

    #[test]
    fn bare_kings_read_as_insufficient_material() {
        let mut rules = RulesBoard::default();
        rules.restore("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            position_verdict(&rules),
            GameVerdict::InsufficientMaterial
        );
    }

    #[test]
    fn stalemate_outranks_the_fifty_move_clock() {
        //! A stalemated position with a full halfmove clock reports
        //! stalemate, not the fifty-move rule.
        let mut rules = RulesBoard::default();
        rules.restore("7k/5Q2/6K1/8/8/8/8/8 b - - 100 90").unwrap();
        assert_eq!(position_verdict(&rules), GameVerdict::Stalemate);
    }

    #[test]
    fn exhausted_halfmove_clock_reads_as_a_draw() {
        let mut rules = RulesBoard::default();
        rules
            .restore("4k2r/8/8/8/8/8/8/4K3 b k - 100 90")
            .unwrap();
        assert_eq!(position_verdict(&rules), GameVerdict::FiftyMoveRule);
    }
}
