//! Application entry point
//!
//! Builds the Bevy app from the library's plugins. The window comes from
//! [`WindowConfig`] defaults; a plain `ClearColor` stands in for a skybox
//! since every state draws its own scene in front of it.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use tabia::core::{CorePlugin, WindowConfig};
use tabia::game::GamePlugin;
use tabia::rendering::{BoardPlugin, PiecePlugin};
use tabia::states::{MainMenuPlugin, SettingsPlugin};
use tabia::ui::UiPlugin;

fn main() {
    let window_config = WindowConfig::default();

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.03)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window_config.to_window()),
            ..default()
        }))
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        .add_plugins(MeshPickingPlugin)
        .add_plugins(CorePlugin)
        .add_plugins(GamePlugin)
        .add_plugins(BoardPlugin)
        .add_plugins(PiecePlugin)
        .add_plugins(UiPlugin)
        .add_plugins(MainMenuPlugin)
        .add_plugins(SettingsPlugin)
        .run();
}
