//! In-game menu overlay
//!
//! Escape opens a full-screen overlay over the running game carrying the
//! session controls that do not belong on the HUD: resume, restart,
//! settings, main menu, exit. The click handler and the keyboard
//! shortcuts check [`OverlayState`] and stand down while it is open.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::core::{GameState, PreviousState};
use crate::game::events::RestartRequested;
use crate::game::resources::PendingPromotion;
use crate::ui::styles::*;

/// Whether the Escape overlay is currently open.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct OverlayState {
    pub open: bool,
}

/// Escape opens and closes the overlay.
///
/// The promotion dialog keeps priority: while a choice is pending the
/// overlay stays closed.
pub fn toggle_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    promotion: Res<PendingPromotion>,
    mut overlay: ResMut<OverlayState>,
) {
    if keyboard.just_pressed(KeyCode::Escape) && !promotion.is_active() {
        overlay.open = !overlay.open;
    }
}

/// Wrapper for [`overlay_ui`] that handles Result
pub fn overlay_ui_wrapper(
    contexts: EguiContexts,
    overlay: ResMut<OverlayState>,
    next_state: ResMut<NextState<GameState>>,
    previous_state: ResMut<PreviousState>,
    restart: MessageWriter<RestartRequested>,
    exit: MessageWriter<AppExit>,
) {
    let _ = overlay_ui(contexts, overlay, next_state, previous_state, restart, exit);
}

/// The overlay menu itself
fn overlay_ui(
    mut contexts: EguiContexts,
    mut overlay: ResMut<OverlayState>,
    mut next_state: ResMut<NextState<GameState>>,
    mut previous_state: ResMut<PreviousState>,
    mut restart: MessageWriter<RestartRequested>,
    mut exit: MessageWriter<AppExit>,
) -> Result<(), bevy::ecs::query::QuerySingleError> {
    if !overlay.open {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    // Semi-transparent overlay
    egui::CentralPanel::default()
        .frame(StyledPanel::overlay())
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                Layout::section_space(ui);

                ui.heading(TextStyle::heading("Paused", TextSize::LG));

                Layout::section_space(ui);

                if StyledButton::primary(ui, "Resume").clicked() {
                    overlay.open = false;
                }

                Layout::item_space(ui);

                if StyledButton::secondary(ui, "Restart Game").clicked() {
                    info!("[OVERLAY] Restart requested");
                    restart.write(RestartRequested);
                    overlay.open = false;
                }

                Layout::item_space(ui);

                if StyledButton::secondary(ui, "Settings").clicked() {
                    previous_state.state = GameState::InGame;
                    next_state.set(GameState::Settings);
                    overlay.open = false;
                }

                Layout::item_space(ui);

                if StyledButton::danger(ui, "Main Menu").clicked() {
                    info!("[OVERLAY] Leaving the game for the main menu");
                    next_state.set(GameState::MainMenu);
                    overlay.open = false;
                }

                Layout::item_space(ui);

                if StyledButton::secondary(ui, "Exit").clicked() {
                    info!("[OVERLAY] Exit requested from the overlay");
                    exit.write(AppExit::Success);
                }

                Layout::section_space(ui);

                ui.label(TextStyle::caption("Escape resumes the game"));
            });
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_starts_closed() {
        assert!(!OverlayState::default().open);
    }
}
