//! Current piece selection.

use bevy::prelude::*;

use crate::rendering::pieces::PieceColor;

/// The square the player has picked up, if any, plus its legal targets.
#[derive(Resource, Default, Debug)]
pub struct Selection {
    pub square: Option<(u8, u8)>,
    pub color: Option<PieceColor>,
    pub targets: Vec<(u8, u8)>,
}

impl Selection {
    pub fn select(&mut self, square: (u8, u8), color: PieceColor, targets: Vec<(u8, u8)>) {
        self.square = Some(square);
        self.color = Some(color);
        self.targets = targets;
    }

    pub fn clear(&mut self) {
        self.square = None;
        self.color = None;
        self.targets.clear();
    }

    pub fn is_selected(&self, square: (u8, u8)) -> bool {
        self.square == Some(square)
    }

    pub fn is_target(&self, square: (u8, u8)) -> bool {
        self.targets.contains(&square)
    }
}
