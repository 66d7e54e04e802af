//! Board square component and the shared square materials.
//!
//! # Materials
//!
//! All 64 squares share two `StandardMaterial` handles, so switching the
//! board theme is two asset writes, not 64 entity updates. The highlight
//! materials (hints, last move, check, suggestion) are translucent and
//! sit on small overlay quads spawned as square children.

use bevy::prelude::*;

use crate::core::resources::{BoardTheme, GameSettings};

/// One square of the 8x8 grid. `x` is the rank index (0 = White's home
/// rank), `y` the file index (0 = the a-file).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct BoardSquare {
    pub x: u8,
    pub y: u8,
}

impl BoardSquare {
    /// Light square? a1 is dark, and colors alternate from there.
    pub fn is_light(&self) -> bool {
        (self.x + self.y + 1).is_multiple_of(2)
    }

    /// The square's name in algebraic notation, `a1` through `h8`.
    pub fn algebraic(&self) -> String {
        format!("{}{}", (b'a' + self.y) as char, self.x + 1)
    }
}

/// Shared material handles for squares and overlay quads.
#[derive(Resource)]
pub struct SquareMaterials {
    pub light: Handle<StandardMaterial>,
    pub dark: Handle<StandardMaterial>,
    pub hint: Handle<StandardMaterial>,
    pub last_move: Handle<StandardMaterial>,
    pub check: Handle<StandardMaterial>,
    pub suggestion: Handle<StandardMaterial>,
}

impl FromWorld for SquareMaterials {
    fn from_world(world: &mut World) -> Self {
        // Settings may not be loaded yet on the very first frame; the
        // theme watcher repaints as soon as they are.
        let theme = world
            .get_resource::<GameSettings>()
            .map(|settings| settings.board_theme)
            .unwrap_or(BoardTheme::Walnut);
        let (light_color, dark_color) = theme.colors();

        let mut materials = world
            .get_resource_mut::<Assets<StandardMaterial>>()
            .expect("Assets<StandardMaterial> should be initialized before SquareMaterials");

        let overlay = |color: Color| StandardMaterial {
            base_color: color,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        };

        Self {
            light: materials.add(StandardMaterial {
                base_color: light_color,
                perceptual_roughness: 0.9,
                ..default()
            }),
            dark: materials.add(StandardMaterial {
                base_color: dark_color,
                perceptual_roughness: 0.9,
                ..default()
            }),
            hint: materials.add(overlay(Color::srgba(0.35, 0.68, 0.35, 0.55))),
            last_move: materials.add(overlay(Color::srgba(0.95, 0.77, 0.25, 0.40))),
            check: materials.add(overlay(Color::srgba(0.90, 0.20, 0.15, 0.55))),
            suggestion: materials.add(overlay(Color::srgba(0.25, 0.55, 0.95, 0.45))),
        }
    }
}

/// Repaints the two square materials when the theme setting changes.
pub fn apply_board_theme(
    settings: Res<GameSettings>,
    square_materials: Res<SquareMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !settings.is_changed() {
        return;
    }
    let (light_color, dark_color) = settings.board_theme.colors();
    if let Some(material) = materials.get_mut(&square_materials.light) {
        material.base_color = light_color;
    }
    if let Some(material) = materials.get_mut(&square_materials.dark) {
        material.base_color = dark_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a1_is_dark_and_h1_is_light() {
        //! Standard board: the right-hand corner square is light.
        assert!(!BoardSquare { x: 0, y: 0 }.is_light());
        assert!(BoardSquare { x: 0, y: 7 }.is_light());
        assert!(BoardSquare { x: 7, y: 0 }.is_light());
        assert!(!BoardSquare { x: 7, y: 7 }.is_light());
    }

    #[test]
    fn neighbors_alternate() {
        for x in 0..8u8 {
            for y in 0..7u8 {
                let here = BoardSquare { x, y };
                let right = BoardSquare { x, y: y + 1 };
                assert_ne!(here.is_light(), right.is_light());
            }
        }
    }

    #[test]
    fn algebraic_names_match_the_grid() {
        assert_eq!(BoardSquare { x: 0, y: 0 }.algebraic(), "a1");
        assert_eq!(BoardSquare { x: 3, y: 4 }.algebraic(), "e4");
        assert_eq!(BoardSquare { x: 7, y: 7 }.algebraic(), "h8");
    }
}
