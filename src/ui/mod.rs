//! In-game UI: HUD, dialogs, and the Escape overlay
//!
//! Everything here renders with `bevy_egui` in the
//! `EguiPrimaryContextPass` schedule and only while a game is on screen:
//!
//! - **game_ui**: top bar and side panel (turn, captures, actions, journal)
//! - **promotion_ui**: modal promotion choice
//! - **verdict_ui**: modal end-of-game dialog
//! - **overlay**: the Escape menu over the board
//!
//! The systems are chained so the panels land in a stable order and the
//! modals paint over the HUD. Menu and settings screens live under
//! `crate::states`; the shared look lives in [`styles`].

pub mod game_ui;
pub mod overlay;
pub mod promotion_ui;
pub mod styles;
pub mod system_params;
pub mod verdict_ui;

pub use overlay::OverlayState;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::core::GameState;

/// Plugin for the in-game UI layer
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayState>();

        app.add_systems(
            Update,
            overlay::toggle_overlay.run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            EguiPrimaryContextPass,
            (
                game_ui::game_hud_wrapper,
                promotion_ui::promotion_ui_system,
                verdict_ui::verdict_ui_system,
                overlay::overlay_ui_wrapper,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}
