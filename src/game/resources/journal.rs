//! Session journal: a timestamped, human-readable log of the game.
//!
//! # Purpose
//!
//! Every noteworthy event lands here as one line: moves with their
//! capture/check annotations, undo/redo, hints, resignation, the final
//! verdict. The HUD shows the tail of it; the same lines also go to the
//! application log under a `[JOURNAL]` prefix, so a bug report's log
//! carries the whole game.
//!
//! # Format
//!
//! ```text
//! ========== New game started at 14:32:05 (Human vs Human) ==========
//! 14:32:08  1. White e4 (e2 -> e4)
//! 14:32:15  1. Black Nf6 (g8 -> f6)
//! 14:35:40  undo: took back 1. Black Nf6
//! ========== Checkmate: White wins by checkmate. (8 moves, 3m 24s) ==========
//! ```

use bevy::prelude::*;
use chrono::{DateTime, Local};

use crate::game::resources::verdict::GameVerdict;
use crate::game::rules::{algebraic, PlayedMove};
use crate::rendering::pieces::{PieceColor, PieceKind};

#[derive(Resource, Debug, Clone)]
pub struct GameJournal {
    started_at: DateTime<Local>,
    lines: Vec<String>,
}

impl Default for GameJournal {
    fn default() -> Self {
        Self {
            started_at: Local::now(),
            lines: Vec::new(),
        }
    }
}

impl GameJournal {
    /// Starts a fresh journal with an opening banner.
    pub fn new_session(&mut self, mode_label: &str) {
        self.started_at = Local::now();
        self.lines.clear();
        self.push(format!(
            "========== New game started at {} ({mode_label}) ==========",
            self.started_at.format("%H:%M:%S")
        ));
    }

    /// Records a played move with its annotations.
    pub fn log_move(&mut self, number: u32, played: &PlayedMove) {
        let mut notes = vec![format!(
            "{} -> {}",
            algebraic(played.from),
            algebraic(played.to)
        )];
        if let Some(kind) = played.captured {
            notes.push(format!("takes {}", kind.label()));
        }
        if played.is_en_passant {
            notes.push("en passant".to_string());
        }
        if let Some(kind) = played.promotion {
            notes.push(format!("promotes to {}", kind.label()));
        }
        if played.gives_check {
            notes.push("check!".to_string());
        }
        self.push(format!(
            "{}  {number}. {} {} ({})",
            clock(),
            played.color.label(),
            played.san,
            notes.join(", ")
        ));
    }

    pub fn log_undo(&mut self, number: u32, played: &PlayedMove) {
        self.push(format!(
            "{}  undo: took back {number}. {} {}",
            clock(),
            played.color.label(),
            played.san
        ));
    }

    pub fn log_redo(&mut self, number: u32, played: &PlayedMove) {
        self.push(format!(
            "{}  redo: replayed {number}. {} {}",
            clock(),
            played.color.label(),
            played.san
        ));
    }

    pub fn log_suggestion(&mut self, color: PieceColor, from: (u8, u8), to: (u8, u8)) {
        self.push(format!(
            "{}  hint for {}: {} -> {}",
            clock(),
            color.label(),
            algebraic(from),
            algebraic(to)
        ));
    }

    pub fn log_promotion_choice(&mut self, color: PieceColor, kind: PieceKind) {
        self.push(format!(
            "{}  {} promotes to {}",
            clock(),
            color.label(),
            kind.label()
        ));
    }

    pub fn log_resignation(&mut self, color: PieceColor) {
        self.push(format!("{}  {} resigns", clock(), color.label()));
    }

    /// Closing banner with the result and the session length.
    pub fn log_game_end(&mut self, verdict: GameVerdict, moves: usize) {
        let elapsed = Local::now().signed_duration_since(self.started_at);
        let minutes = elapsed.num_seconds().max(0) / 60;
        let seconds = elapsed.num_seconds().max(0) % 60;
        self.push(format!(
            "========== {}: {} ({moves} moves, {minutes}m {seconds}s) ==========",
            verdict.headline(),
            verdict.detail()
        ));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, line: String) {
        info!("[JOURNAL] {line}");
        self.lines.push(line);
    }
}

fn clock() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::RulesBoard;

    #[test]
    fn new_session_opens_with_a_banner() {
        let mut journal = GameJournal::default();
        journal.new_session("Human vs Human");
        assert_eq!(journal.lines().len(), 1);
        let banner = &journal.lines()[0];
        assert!(banner.starts_with("========== New game started at "));
        assert!(banner.contains("(Human vs Human)"));
    }

    #[test]
    fn moves_are_annotated_with_squares_and_checks() {
        //! Scholar's mate: the mating move logs the capture and the check.
        let mut board = RulesBoard::default();
        board.play_between((1, 4), (3, 4), None).unwrap();
        board.play_between((6, 4), (4, 4), None).unwrap();
        board.play_between((0, 5), (3, 2), None).unwrap();
        board.play_between((7, 1), (5, 2), None).unwrap();
        board.play_between((0, 3), (4, 7), None).unwrap();
        board.play_between((7, 6), (5, 5), None).unwrap();
        let mate = board.play_between((4, 7), (6, 5), None).unwrap();

        let mut journal = GameJournal::default();
        journal.new_session("Human vs Human");
        journal.log_move(4, &mate);

        let line = journal.lines().last().unwrap();
        assert!(line.contains("4. White Qxf7#"), "line was: {line}");
        assert!(line.contains("h5 -> f7"));
        assert!(line.contains("takes Pawn"));
        assert!(line.contains("check!"));
    }

    #[test]
    fn session_restart_clears_old_lines() {
        let mut journal = GameJournal::default();
        journal.new_session("Human vs Human");
        journal.log_resignation(PieceColor::White);
        assert_eq!(journal.lines().len(), 2);

        journal.new_session("Human vs Engine");
        assert_eq!(journal.lines().len(), 1, "old session lines must be gone");
        assert!(journal.lines()[0].contains("Human vs Engine"));
    }

    #[test]
    fn game_end_banner_names_the_result() {
        let mut journal = GameJournal::default();
        journal.new_session("Human vs Human");
        journal.log_game_end(GameVerdict::Stalemate, 14);
        let line = journal.lines().last().unwrap();
        assert!(line.contains("Stalemate"));
        assert!(line.contains("14 moves"));
    }

    #[test]
    fn hints_name_both_squares() {
        let mut journal = GameJournal::default();
        journal.log_suggestion(PieceColor::Black, (6, 4), (4, 4));
        let line = journal.lines().last().unwrap();
        assert!(line.contains("hint for Black: e7 -> e5"));
    }
}
