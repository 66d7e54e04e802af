//! Pending pawn promotion.
//!
//! When a pawn move reaches the last rank the executor does *not* play it;
//! it parks the move here and the promotion dialog takes over. The chosen
//! piece comes back as a `PromotionChoice` message and the executor plays
//! the full move in one step. While a promotion is pending, clicks, undo,
//! hints, and the engine scheduler all stand down.

use bevy::prelude::*;

use crate::rendering::pieces::PieceColor;

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PendingPromotion {
    pub from: Option<(u8, u8)>,
    pub to: Option<(u8, u8)>,
    pub color: Option<PieceColor>,
    pub is_pending: bool,
}

impl PendingPromotion {
    /// Parks a promotion move and opens the dialog.
    pub fn start(&mut self, from: (u8, u8), to: (u8, u8), color: PieceColor) {
        self.from = Some(from);
        self.to = Some(to);
        self.color = Some(color);
        self.is_pending = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.is_pending
    }

    /// The parked move, when one is pending.
    pub fn squares(&self) -> Option<((u8, u8), (u8, u8))> {
        match (self.is_pending, self.from, self.to) {
            (true, Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_clear_round_trip() {
        let mut pending = PendingPromotion::default();
        assert!(!pending.is_active());
        assert!(pending.squares().is_none());

        pending.start((6, 0), (7, 0), PieceColor::White);
        assert!(pending.is_active());
        assert_eq!(pending.squares(), Some(((6, 0), (7, 0))));
        assert_eq!(pending.color, Some(PieceColor::White));

        pending.clear();
        assert!(!pending.is_active());
        assert!(pending.squares().is_none());
    }
}
