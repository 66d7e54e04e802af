//! Game-over verdict and its dialog state.
//!
//! # Verdict lifecycle
//!
//! [`GameVerdict`] starts at `Playing` and is written exactly once per
//! finish by the verdict scan (after each applied move) or by the
//! resignation handler. Undo moves it back to `Playing`: stepping out of
//! a mate to explore is allowed, and finishing again counts as a new
//! result in the statistics.
//!
//! [`VerdictDialog`] remembers whether the end-of-game dialog was closed,
//! so it does not reopen every frame while the finished position stays on
//! screen.

use bevy::prelude::*;

use crate::rendering::pieces::PieceColor;

/// How the game stands, or how it ended.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Resource)]
pub enum GameVerdict {
    #[default]
    Playing,
    WhiteWinsByCheckmate,
    BlackWinsByCheckmate,
    WhiteWinsByResignation,
    BlackWinsByResignation,
    Stalemate,
    InsufficientMaterial,
    FivefoldRepetition,
    FiftyMoveRule,
}

impl GameVerdict {
    pub fn is_over(&self) -> bool {
        *self != GameVerdict::Playing
    }

    /// The winning side, when the result is decisive.
    pub fn winner(&self) -> Option<PieceColor> {
        match self {
            GameVerdict::WhiteWinsByCheckmate | GameVerdict::WhiteWinsByResignation => {
                Some(PieceColor::White)
            }
            GameVerdict::BlackWinsByCheckmate | GameVerdict::BlackWinsByResignation => {
                Some(PieceColor::Black)
            }
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameVerdict::Stalemate
                | GameVerdict::InsufficientMaterial
                | GameVerdict::FivefoldRepetition
                | GameVerdict::FiftyMoveRule
        )
    }

    /// Dialog headline.
    pub fn headline(&self) -> &'static str {
        match self {
            GameVerdict::Playing => "Game in progress",
            GameVerdict::WhiteWinsByCheckmate | GameVerdict::BlackWinsByCheckmate => "Checkmate",
            GameVerdict::WhiteWinsByResignation | GameVerdict::BlackWinsByResignation => {
                "Resignation"
            }
            GameVerdict::Stalemate => "Stalemate",
            GameVerdict::InsufficientMaterial => "Draw",
            GameVerdict::FivefoldRepetition => "Draw",
            GameVerdict::FiftyMoveRule => "Draw",
        }
    }

    /// Dialog detail line.
    pub fn detail(&self) -> &'static str {
        match self {
            GameVerdict::Playing => "",
            GameVerdict::WhiteWinsByCheckmate => "White wins by checkmate.",
            GameVerdict::BlackWinsByCheckmate => "Black wins by checkmate.",
            GameVerdict::WhiteWinsByResignation => "Black resigned. White wins.",
            GameVerdict::BlackWinsByResignation => "White resigned. Black wins.",
            GameVerdict::Stalemate => "The side to move has no legal moves.",
            GameVerdict::InsufficientMaterial => "Neither side can deliver checkmate.",
            GameVerdict::FivefoldRepetition => "The same position occurred five times.",
            GameVerdict::FiftyMoveRule => "Fifty moves without a capture or pawn move.",
        }
    }
}

/// Whether the end-of-game dialog has been dismissed.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct VerdictDialog {
    pub acknowledged: bool,
}
