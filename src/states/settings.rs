//! Settings screen plugin
//!
//! Lets the player configure:
//! - Board theme
//! - Game preferences (move hints, last-move highlight)
//! - UCI engine (path, skill, thinking time)
//!
//! Edits apply immediately: the board repaints its theme live and the
//! engine watcher relaunches the process when its settings drift. The
//! screen returns to wherever it was opened from ([`PreviousState`]),
//! so settings opened mid-game resume the game.

use crate::core::{BoardTheme, GameSettings, GameState, PreviousState};
use crate::ui::styles::*;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

/// Plugin for the settings screen state
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            settings_ui_wrapper.run_if(in_state(GameState::Settings)),
        )
        .add_systems(
            Update,
            handle_settings_escape.run_if(in_state(GameState::Settings)),
        );
    }
}

/// Wrapper for settings_ui that handles Result
fn settings_ui_wrapper(
    contexts: EguiContexts,
    next_state: ResMut<NextState<GameState>>,
    previous_state: Res<PreviousState>,
    settings: ResMut<GameSettings>,
) {
    let _ = settings_ui(contexts, next_state, previous_state, settings);
}

/// Settings screen UI
fn settings_ui(
    mut contexts: EguiContexts,
    mut next_state: ResMut<NextState<GameState>>,
    previous_state: Res<PreviousState>,
    mut settings: ResMut<GameSettings>,
) -> Result<(), bevy::ecs::query::QuerySingleError> {
    let ctx = contexts.ctx_mut()?;

    // Widgets edit a scratch copy; it is written back only on a real
    // change, so the save-on-change watcher does not rewrite the file
    // every frame the screen is open.
    let mut edited = settings.clone();

    egui::CentralPanel::default()
        .frame(StyledPanel::main())
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                Layout::section_space(ui);

                ui.heading(TextStyle::heading("Settings", TextSize::LG));

                Layout::section_space(ui);

                // Board Theme
                StyledPanel::card().show(ui, |ui| {
                    ui.heading(TextStyle::heading("Board Theme", TextSize::MD));
                    Layout::item_space(ui);

                    ui.horizontal(|ui| {
                        for theme in [
                            BoardTheme::Walnut,
                            BoardTheme::Tournament,
                            BoardTheme::Slate,
                        ] {
                            ui.radio_value(&mut edited.board_theme, theme, theme.name());
                        }
                    });
                });

                Layout::item_space(ui);

                // Game Preferences
                StyledPanel::card().show(ui, |ui| {
                    ui.heading(TextStyle::heading("Game Preferences", TextSize::MD));
                    Layout::item_space(ui);

                    ui.checkbox(&mut edited.show_hints, "Show move hints");
                    ui.checkbox(&mut edited.highlight_last_move, "Highlight last move");
                });

                Layout::item_space(ui);

                // Engine
                StyledPanel::card().show(ui, |ui| {
                    ui.heading(TextStyle::heading("Engine", TextSize::MD));
                    Layout::item_space(ui);

                    ui.label(TextStyle::body("Engine command"));
                    ui.text_edit_singleline(&mut edited.engine_path).on_hover_text(
                        "Command name or absolute path of a UCI engine. \
                         When it cannot be launched the computer plays random moves.",
                    );

                    Layout::item_space(ui);

                    ui.label(TextStyle::body(format!(
                        "Skill level: {}",
                        edited.engine_skill
                    )));
                    ui.add(egui::Slider::new(&mut edited.engine_skill, 0..=20));

                    Layout::item_space(ui);

                    ui.label(TextStyle::body(format!(
                        "Thinking time: {} ms",
                        edited.engine_movetime_ms
                    )));
                    ui.add(egui::Slider::new(
                        &mut edited.engine_movetime_ms,
                        100..=5000,
                    ));

                    Layout::small_space(ui);
                    ui.label(TextStyle::caption(
                        "Engine changes take effect on the next move or hint",
                    ));
                });

                Layout::section_space(ui);

                // Back button
                if StyledButton::secondary(ui, "Back").clicked() {
                    next_state.set(previous_state.state);
                }

                Layout::small_space(ui);
                ui.label(TextStyle::caption("Escape also goes back"));
            });
        });

    if edited != *settings {
        *settings = edited;
    }

    Ok(())
}

/// Handle escape key to return to previous state
fn handle_settings_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    previous_state: Res<PreviousState>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        info!(
            "[SETTINGS] Escape pressed, returning to {:?}",
            previous_state.state
        );
        next_state.set(previous_state.state);
    }
}
