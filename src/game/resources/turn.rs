//! Whose turn it is.
//!
//! The rules board is the authority on the side to move; this resource is
//! the UI-facing mirror of it, kept in step by [`CurrentTurn::sync`] after
//! every move, undo, redo, and restart. Splitting the two means the HUD
//! and the engine scheduler never need the rules board just to ask whose
//! turn it is.

use bevy::prelude::*;

use crate::rendering::pieces::PieceColor;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct CurrentTurn {
    pub color: PieceColor,
    /// Fullmove number, starting at 1 and advancing after Black's move.
    pub move_number: u32,
}

impl Default for CurrentTurn {
    fn default() -> Self {
        Self {
            color: PieceColor::White,
            move_number: 1,
        }
    }
}

impl CurrentTurn {
    /// Re-reads the side to move and fullmove number from the rules board.
    pub fn sync(&mut self, board: &crate::game::rules::RulesBoard) {
        self.color = board.turn();
        self.move_number = board.fullmove_number();
    }

    pub fn label(&self) -> &'static str {
        match self.color {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}
