//! End-of-game dialog
//!
//! A modal that opens when [`GameVerdict`] turns terminal. Cancel (or the
//! window close box) only sets `acknowledged`: the final position stays
//! on the board and undo can revive the game, which clears the verdict
//! and re-arms the dialog. The journal's closing banner is written when
//! the verdict is set, before any button here can fire.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::game::events::RestartRequested;
use crate::game::resources::{GameVerdict, VerdictDialog};
use crate::ui::styles::*;

/// Renders the verdict dialog while a finished game is unacknowledged.
pub fn verdict_ui_system(
    mut contexts: EguiContexts,
    verdict: Res<GameVerdict>,
    mut dialog: ResMut<VerdictDialog>,
    mut restart: MessageWriter<RestartRequested>,
    mut exit: MessageWriter<AppExit>,
) {
    if !verdict.is_over() || dialog.acknowledged {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    // Dim the board behind the dialog
    egui::Area::new(egui::Id::new("verdict_overlay"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .show(ctx, |ui| {
            let screen_rect = ui.ctx().screen_rect();
            ui.painter().rect_filled(
                screen_rect,
                0.0,
                ColorUtils::with_alpha(egui::Color32::BLACK, 180),
            );
        });

    // The close box doubles as Cancel.
    let mut open = true;

    egui::Window::new("Game Over")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::default()
                .fill(UiColors::BG_MID)
                .corner_radius(12.0)
                .inner_margin(20.0)
                .stroke(egui::Stroke::new(2.0, UiColors::BORDER)),
        )
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(verdict.headline())
                        .size(28.0)
                        .color(UiColors::ACCENT_GOLD)
                        .strong(),
                );
                Layout::small_space(ui);
                ui.label(TextStyle::body(verdict.detail()));
                Layout::item_space(ui);

                ui.horizontal(|ui| {
                    if StyledButton::secondary(ui, "Restart").clicked() {
                        info!("[VERDICT] Restart from the end-of-game dialog");
                        restart.write(RestartRequested);
                        // Keeps the dialog down for the frame before the
                        // restart clears the verdict.
                        dialog.acknowledged = true;
                    }
                    if StyledButton::secondary(ui, "Exit").clicked() {
                        info!("[VERDICT] Exit from the end-of-game dialog");
                        exit.write(AppExit::Success);
                    }
                    if StyledButton::secondary(ui, "Cancel").clicked() {
                        dialog.acknowledged = true;
                    }
                });
            });
        });

    if !open {
        dialog.acknowledged = true;
    }
}
