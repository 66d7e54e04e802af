//! Captured piece tracking.
//!
//! # What lives here
//!
//! - [`CapturedPieces`]: the two capture lists, in capture order, as shown
//!   in the side panel
//! - [`piece_value`]: the conventional 1/3/3/5/9 material scale
//!
//! Undo support is the one wrinkle: taking back a capture must also take
//! back the list entry, so [`CapturedPieces::remove_capture`] removes the
//! most recent matching piece rather than popping blindly.

use bevy::prelude::*;

use crate::rendering::pieces::{PieceColor, PieceKind};

/// Pieces each side has taken, oldest first.
#[derive(Resource, Default, Debug, Clone)]
pub struct CapturedPieces {
    /// Black pieces that White has captured.
    pub by_white: Vec<PieceKind>,
    /// White pieces that Black has captured.
    pub by_black: Vec<PieceKind>,
}

impl CapturedPieces {
    /// Records a capture made by `captor`.
    pub fn add_capture(&mut self, captor: PieceColor, kind: PieceKind) {
        match captor {
            PieceColor::White => self.by_white.push(kind),
            PieceColor::Black => self.by_black.push(kind),
        }
    }

    /// Removes the most recent capture of `kind` made by `captor`.
    ///
    /// Used by undo; returns false when no such capture is recorded.
    pub fn remove_capture(&mut self, captor: PieceColor, kind: PieceKind) -> bool {
        let list = match captor {
            PieceColor::White => &mut self.by_white,
            PieceColor::Black => &mut self.by_black,
        };
        match list.iter().rposition(|taken| *taken == kind) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Material balance from White's point of view, in pawns.
    pub fn material_advantage(&self) -> i32 {
        let white: i32 = self.by_white.iter().map(|kind| piece_value(*kind)).sum();
        let black: i32 = self.by_black.iter().map(|kind| piece_value(*kind)).sum();
        white - black
    }

    pub fn clear(&mut self) {
        self.by_white.clear();
        self.by_black.clear();
    }
}

/// Conventional material value of a piece, in pawns.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}
